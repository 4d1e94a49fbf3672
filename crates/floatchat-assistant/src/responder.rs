// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use floatchat_app::{AssistantReply, ReplySource};
use std::time::Duration;
use tracing::debug;

use crate::rules::{RuleSet, Surface};

pub const MAX_COMPLETIONS: usize = 6;

/// Simulated think time before a reply lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1500),
            max: Duration::from_millis(2500),
        }
    }
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self> {
        if min > max {
            bail!(
                "reply delay minimum ({}ms) exceeds maximum ({}ms)",
                min.as_millis(),
                max.as_millis()
            );
        }
        Ok(Self { min, max })
    }

    pub const fn min(self) -> Duration {
        self.min
    }

    pub const fn max(self) -> Duration {
        self.max
    }

    /// Point in the range at `unit` in `[0, 1]`.
    pub fn at(self, unit: f64) -> Duration {
        let span = self.max.saturating_sub(self.min);
        self.min + span.mul_f64(unit.clamp(0.0, 1.0))
    }
}

/// Keyword-driven reply generator for one surface.
pub struct Responder {
    rules: &'static RuleSet,
    source: Box<dyn ReplySource + Send>,
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("surface", &self.rules.surface)
            .finish_non_exhaustive()
    }
}

impl Responder {
    pub fn new(surface: Surface, source: Box<dyn ReplySource + Send>) -> Self {
        Self {
            rules: surface.rules(),
            source,
        }
    }

    pub fn surface(&self) -> Surface {
        self.rules.surface
    }

    pub fn greeting(&self) -> AssistantReply {
        AssistantReply {
            content: self.rules.greeting.to_owned(),
            suggestions: self.rules.greeting_suggestions(),
        }
    }

    /// Pick the reply for `query`. Draws, in order: a fallback index when no
    /// rule matches, a float count when the template asks for one, then the
    /// follow-up roll when the surface has follow-ups.
    pub fn reply(&mut self, query: &str) -> AssistantReply {
        let matched = self.rules.select(query);
        let template = match matched {
            Some(rule) => rule.template,
            None => {
                let index = self.source.pick_index(self.rules.fallbacks.len());
                self.rules.fallbacks.get(index).copied().unwrap_or_default()
            }
        };

        let mut content = template.to_owned();
        if content.contains("{float_count}") {
            let count = (self.source.next_unit() * 200.0 + 50.0).floor() as u32;
            content = content.replace("{float_count}", &count.to_string());
        }
        content = content.replace("{query}", query);

        let suggestions = if self.rules.follow_up_count > 0
            && self.source.next_unit() > self.rules.follow_up_threshold
        {
            self.rules.follow_ups()
        } else {
            Vec::new()
        };

        debug!(
            surface = self.rules.surface.label(),
            matched = matched.is_some(),
            suggestions = suggestions.len(),
            "assistant reply composed"
        );
        AssistantReply {
            content,
            suggestions,
        }
    }

    pub fn delay(&mut self, range: DelayRange) -> Duration {
        range.at(self.source.next_unit())
    }

    /// Typing-ahead prompts for the current input: examples while empty,
    /// otherwise up to six case-insensitive substring matches.
    pub fn suggest_completions(&self, input: &str) -> Vec<&'static str> {
        let needle = input.trim().to_lowercase();
        if self.rules.completions.is_empty() {
            if needle.is_empty() {
                return self
                    .rules
                    .starter_queries
                    .iter()
                    .take(self.rules.greeting_suggestions)
                    .copied()
                    .collect();
            }
            return self
                .rules
                .starter_queries
                .iter()
                .filter(|query| query.to_lowercase().contains(&needle))
                .take(MAX_COMPLETIONS)
                .copied()
                .collect();
        }

        if needle.is_empty() {
            return self
                .rules
                .completions
                .iter()
                .filter(|suggestion| suggestion.example)
                .map(|suggestion| suggestion.text)
                .collect();
        }
        self.rules
            .completions
            .iter()
            .filter(|suggestion| suggestion.text.to_lowercase().contains(&needle))
            .take(MAX_COMPLETIONS)
            .map(|suggestion| suggestion.text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DelayRange;
    use std::time::Duration;

    #[test]
    fn delay_range_interpolates() {
        let range = DelayRange::default();
        assert_eq!(range.at(0.0), Duration::from_millis(1500));
        assert_eq!(range.at(1.0), Duration::from_millis(2500));
        assert_eq!(range.at(0.5), Duration::from_millis(2000));
        assert_eq!(range.at(7.0), Duration::from_millis(2500));
    }

    #[test]
    fn delay_range_rejects_inverted_bounds() {
        assert!(DelayRange::new(Duration::from_secs(3), Duration::from_secs(1)).is_err());
        assert!(DelayRange::new(Duration::ZERO, Duration::ZERO).is_ok());
    }
}
