use std::any::type_name;
use std::fmt;

use crate::error::ValueError;
use crate::name::{FlagName, MARKER};
use crate::schema::FlagInfo;
use crate::value::FlagValue;

/// Outcome of offering one token (and the token after it) to a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assign {
    /// The token is not this flag.
    NotMatched,
    /// Switch flag set; consumed the flag token only.
    One,
    /// Value stored; consumed the flag token and its value.
    Two,
    /// Value-taking flag with no usable next token; consumed the flag token.
    Missing,
    /// The next token could not be converted; consumed both tokens.
    Invalid,
}

impl Assign {
    /// Number of tokens the parser advances by.
    pub fn consumed(self) -> usize {
        match self {
            Self::NotMatched | Self::One | Self::Missing => 1,
            Self::Two | Self::Invalid => 2,
        }
    }
}

trait Slot {
    fn switch_on(&mut self);
    fn assign_text(&mut self, text: &str) -> Result<(), ValueError>;
}

impl<T: FlagValue> Slot for T {
    fn switch_on(&mut self) {
        FlagValue::switch_on(self);
    }

    fn assign_text(&mut self, text: &str) -> Result<(), ValueError> {
        self.assign(text)
    }
}

/// One declared flag bound to the storage of its field.
pub struct Descriptor<'a> {
    name: FlagName,
    alias: FlagName,
    type_tag: &'static str,
    switch: bool,
    slot: &'a mut dyn Slot,
}

impl<'a> Descriptor<'a> {
    pub fn new<T: FlagValue>(name: FlagName, alias: FlagName, value: &'a mut T) -> Self {
        Self {
            name,
            alias,
            type_tag: type_name::<T>(),
            switch: T::SWITCH,
            slot: value,
        }
    }

    pub fn name(&self) -> FlagName {
        self.name
    }

    pub fn alias(&self) -> FlagName {
        self.alias
    }

    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    pub fn takes_value(&self) -> bool {
        !self.switch
    }

    pub fn matches(&self, token: &str) -> bool {
        self.name == *token || self.alias == *token
    }

    pub fn info(&self) -> FlagInfo {
        FlagInfo {
            name: self.name.as_str(),
            alias: self.alias.as_str(),
            type_tag: self.type_tag,
            takes_value: self.takes_value(),
        }
    }

    /// Offer `token` to this flag, with `next` as its candidate value.
    ///
    /// A `next` that starts with `-` is treated as absent, even when it would
    /// convert (e.g. `-5` for an integer flag).
    pub fn assign(&mut self, token: &str, next: Option<&str>) -> Assign {
        if !self.matches(token) {
            return Assign::NotMatched;
        }
        if self.switch {
            self.slot.switch_on();
            return Assign::One;
        }
        let Some(value) = next.filter(|v| !v.starts_with(MARKER)) else {
            return Assign::Missing;
        };
        match self.slot.assign_text(value) {
            Ok(()) => Assign::Two,
            Err(err) => {
                tracing::trace!(flag = token, value, reason = %err, "flag value rejected");
                Assign::Invalid
            }
        }
    }
}

impl fmt::Debug for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &'static str) -> FlagName {
        FlagName::new(s).unwrap()
    }

    #[test]
    fn matches_name_or_alias_exactly() {
        let mut port = 0u16;
        let d = Descriptor::new(name("--port"), name("-p"), &mut port);
        assert!(d.matches("--port"));
        assert!(d.matches("-p"));
        assert!(!d.matches("--por"));
        assert!(!d.matches("--port=1"));
        assert_eq!(d.type_tag(), "u16");
        assert!(d.takes_value());
    }

    #[test]
    fn switch_consumes_one_token_and_ignores_next() {
        let mut verbose = false;
        let mut d = Descriptor::new(name("-v"), name("-v"), &mut verbose);
        assert_eq!(d.assign("-v", Some("file.txt")), Assign::One);
        assert!(verbose);
    }

    #[test]
    fn value_flag_outcomes() {
        let mut count = 7i32;
        {
            let mut d = Descriptor::new(name("-n"), name("-n"), &mut count);
            assert_eq!(d.assign("-x", Some("1")), Assign::NotMatched);
            assert_eq!(d.assign("-n", None), Assign::Missing);
            assert_eq!(d.assign("-n", Some("-5")), Assign::Missing);
            assert_eq!(d.assign("-n", Some("abc")), Assign::Invalid);
        }
        assert_eq!(count, 7);

        let mut d = Descriptor::new(name("-n"), name("-n"), &mut count);
        assert_eq!(d.assign("-n", Some("42")), Assign::Two);
        drop(d);
        assert_eq!(count, 42);
    }

    #[test]
    fn consumed_tokens_per_outcome() {
        assert_eq!(Assign::NotMatched.consumed(), 1);
        assert_eq!(Assign::One.consumed(), 1);
        assert_eq!(Assign::Missing.consumed(), 1);
        assert_eq!(Assign::Two.consumed(), 2);
        assert_eq!(Assign::Invalid.consumed(), 2);
    }
}
