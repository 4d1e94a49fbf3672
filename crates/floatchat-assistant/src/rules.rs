// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{assistant_page, quick_panel, side_panel};

/// Which chat surface a rule table belongs to. Each surface keeps its own
/// templates, fallbacks and follow-up behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Compact overlay reachable from any data view.
    QuickPanel,
    /// Full-page assistant hosted by the chat view.
    AssistantPage,
    /// Narrow panel beside the assistant page with shorter answers.
    SidePanel,
}

impl Surface {
    pub const ALL: [Self; 3] = [Self::QuickPanel, Self::AssistantPage, Self::SidePanel];

    pub const fn label(self) -> &'static str {
        match self {
            Self::QuickPanel => "quick query",
            Self::AssistantPage => "assistant",
            Self::SidePanel => "side panel",
        }
    }

    pub const fn rules(self) -> &'static RuleSet {
        match self {
            Self::QuickPanel => &quick_panel::RULES,
            Self::AssistantPage => &assistant_page::RULES,
            Self::SidePanel => &side_panel::RULES,
        }
    }
}

/// Keyword test against lowercased input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    All(&'static [&'static str]),
    Any(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(self, lowered: &str) -> bool {
        match self {
            Self::All(keywords) => keywords.iter().all(|keyword| lowered.contains(keyword)),
            Self::Any(keywords) => keywords.iter().any(|keyword| lowered.contains(keyword)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub matcher: Matcher,
    /// May contain `{query}` and `{float_count}` placeholders.
    pub template: &'static str,
}

impl Rule {
    pub const fn new(matcher: Matcher, template: &'static str) -> Self {
        Self { matcher, template }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySuggestion {
    pub text: &'static str,
    pub category: &'static str,
    /// Shown while the input is still empty.
    pub example: bool,
}

impl QuerySuggestion {
    pub const fn example(text: &'static str, category: &'static str) -> Self {
        Self {
            text,
            category,
            example: true,
        }
    }

    pub const fn quick(text: &'static str, category: &'static str) -> Self {
        Self {
            text,
            category,
            example: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSet {
    pub surface: Surface,
    /// Scanned in order; the first match wins.
    pub rules: &'static [Rule],
    /// Never empty. One is picked uniformly when no rule matches.
    pub fallbacks: &'static [&'static str],
    pub greeting: &'static str,
    pub starter_queries: &'static [&'static str],
    /// How many starter queries ride along with the greeting.
    pub greeting_suggestions: usize,
    pub follow_ups: &'static [&'static str],
    pub follow_up_count: usize,
    /// Follow-ups attach when a uniform draw exceeds this value.
    pub follow_up_threshold: f64,
    /// Typing-ahead list; when empty, starter queries are used instead.
    pub completions: &'static [QuerySuggestion],
}

impl RuleSet {
    pub fn select(&self, query: &str) -> Option<&'static Rule> {
        let lowered = query.to_lowercase();
        self.rules.iter().find(|rule| rule.matcher.matches(&lowered))
    }

    pub fn greeting_suggestions(&self) -> Vec<String> {
        self.starter_queries
            .iter()
            .take(self.greeting_suggestions)
            .map(|query| (*query).to_owned())
            .collect()
    }

    pub fn follow_ups(&self) -> Vec<String> {
        self.follow_ups
            .iter()
            .take(self.follow_up_count)
            .map(|query| (*query).to_owned())
            .collect()
    }
}
