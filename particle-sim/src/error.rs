// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Error types
//!
//! The per-tick physics never fails; errors only arise when bodies or
//! scenarios are built from untrusted input.

use thiserror::Error;

/// Errors raised while constructing bodies or seeding a registry
#[derive(Debug, Error)]
pub enum SimError {
    /// A body attribute violated its invariant (e.g. non-positive mass)
    #[error("invalid body {field}: {value}")]
    InvalidBody {
        /// Name of the offending attribute
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A scenario description could not be turned into bodies
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// A scenario document failed to parse
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}
