use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use thiserror::Error;

/// A problem found while scanning one token.
///
/// `position` is the index of the flag token in the parsed token list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FlagError {
    /// A `-`-prefixed token that no flag matched (strict parsing only).
    #[error("Unknown flag `{token}` at index {position}")]
    UnknownFlag { position: usize, token: String },

    /// A value-taking flag at the end of the input or followed by another flag.
    #[error("Missing value for flag `{token}` at index {position}")]
    MissingValue { position: usize, token: String },

    /// The token after the flag could not be converted to the flag's type.
    #[error("Invalid value {value:?} for flag `{token}` at index {position}")]
    InvalidValue {
        position: usize,
        token: String,
        value: String,
    },
}

impl FlagError {
    pub fn position(&self) -> usize {
        match self {
            Self::UnknownFlag { position, .. }
            | Self::MissingValue { position, .. }
            | Self::InvalidValue { position, .. } => *position,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::UnknownFlag { token, .. }
            | Self::MissingValue { token, .. }
            | Self::InvalidValue { token, .. } => token,
        }
    }
}

/// Errors collected by one or more parse calls, in encounter order.
///
/// Renders as nothing when empty, otherwise as a line break followed by one
/// line per error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Errors(Vec<FlagError>);

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FlagError) {
        self.0.push(error);
    }

    /// `true` when at least one error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<FlagError> {
        self.0
    }
}

impl Deref for Errors {
    type Target = [FlagError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<FlagError>> for Errors {
    fn from(errors: Vec<FlagError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FlagError> for Errors {
    fn from_iter<I: IntoIterator<Item = FlagError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FlagError> for Errors {
    fn extend<I: IntoIterator<Item = FlagError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Errors {
    type Item = FlagError;
    type IntoIter = std::vec::IntoIter<FlagError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a FlagError;
    type IntoIter = std::slice::Iter<'a, FlagError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        for error in &self.0 {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

/// Why a token could not be converted into a flag's value type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValueError {
    reason: String,
}

impl ValueError {
    pub fn new(reason: impl fmt::Display) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A flag declared with a name or alias that can never match a flag token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagNameError {
    #[error("flag name is empty")]
    Empty,
    #[error("flag name `{0}` must start with `-`")]
    MissingPrefix(String),
    #[error("flag name cannot be `--`, it terminates flag scanning")]
    Terminator,
}
