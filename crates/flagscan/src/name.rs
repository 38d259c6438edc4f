use std::fmt;

use crate::error::FlagNameError;

/// The leading character that marks a token as a flag.
pub const MARKER: char = '-';

/// Ends flag scanning; every later token is positional.
pub const TERMINATOR: &str = "--";

/// Whether `name` may be used as a flag name or alias.
///
/// A valid name starts with `-` and is not the `--` terminator. `-` and `---`
/// are accepted.
pub const fn is_valid_flag_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes[0] != b'-' {
        return false;
    }
    !(bytes.len() == 2 && bytes[1] == b'-')
}

/// A validated flag name or alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagName(&'static str);

impl FlagName {
    /// Check a name that may be malformed, reporting which rule it breaks.
    pub fn new(name: &'static str) -> Result<Self, FlagNameError> {
        if is_valid_flag_name(name) {
            return Ok(Self(name));
        }
        Err(if name.is_empty() {
            FlagNameError::Empty
        } else if name == TERMINATOR {
            FlagNameError::Terminator
        } else {
            FlagNameError::MissingPrefix(name.to_string())
        })
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl AsRef<str> for FlagName {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl PartialEq<str> for FlagName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
