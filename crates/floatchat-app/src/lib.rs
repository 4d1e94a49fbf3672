// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod chat;
pub mod filters;
pub mod ids;
pub mod insights;
pub mod model;
pub mod query;
pub mod state;

pub use chat::*;
pub use filters::*;
pub use ids::*;
pub use insights::*;
pub use model::*;
pub use query::*;
pub use state::*;
