// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod assistant_page;
mod quick_panel;
mod responder;
mod rules;
mod side_panel;
mod source;

pub use responder::{DelayRange, MAX_COMPLETIONS, Responder};
pub use rules::{Matcher, QuerySuggestion, Rule, RuleSet, Surface};
pub use source::SeededSource;
