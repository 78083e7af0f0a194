// Copyright 2025 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors reported by the headless viewer.
///
/// None of these reach the user; the presentation layer logs them and carries on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A control declared an action identifier no [`crate::action::Action`] uses.
    #[error("unknown control action `{0}`")]
    UnknownAction(String),
    /// Page configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
