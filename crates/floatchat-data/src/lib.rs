// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod export;
mod fixture;

pub use export::*;
pub use fixture::*;
