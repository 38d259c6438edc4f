use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::ValueError;

/// A type that can hold a flag's value.
///
/// Conversion always looks at the whole token: trailing characters the type
/// does not understand make the conversion fail.
pub trait FlagValue: Sized {
    /// Switch types are set by the flag's presence and never take a value.
    const SWITCH: bool = false;

    fn from_flag_text(text: &str) -> Result<Self, ValueError>;

    /// Store one occurrence of the flag. The default replaces the current
    /// value, so the last occurrence wins.
    ///
    /// On error the current value must be left untouched.
    fn assign(&mut self, text: &str) -> Result<(), ValueError> {
        *self = Self::from_flag_text(text)?;
        Ok(())
    }

    /// Set a switch to its "present" state. Only called when [`Self::SWITCH`]
    /// is `true`.
    fn switch_on(&mut self) {}
}

/// Implement [`FlagValue`] through [`FromStr`](std::str::FromStr).
///
/// ```
/// use std::str::FromStr;
///
/// #[derive(Debug, PartialEq)]
/// struct Level(u8);
///
/// impl FromStr for Level {
///     type Err = String;
///
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         s.strip_prefix('L')
///             .and_then(|n| n.parse().ok())
///             .map(Level)
///             .ok_or_else(|| format!("not a level: {s}"))
///     }
/// }
///
/// flagscan::flag_value_from_str!(Level);
///
/// use flagscan::FlagValue;
/// assert_eq!(Level::from_flag_text("L3").unwrap(), Level(3));
/// assert!(Level::from_flag_text("3").is_err());
/// ```
#[macro_export]
macro_rules! flag_value_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FlagValue for $ty {
                fn from_flag_text(text: &str) -> ::core::result::Result<Self, $crate::ValueError> {
                    <$ty as ::core::str::FromStr>::from_str(text).map_err($crate::ValueError::new)
                }
            }
        )+
    };
}

flag_value_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String, PathBuf,
    OsString, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr,
);

impl FlagValue for bool {
    const SWITCH: bool = true;

    fn from_flag_text(text: &str) -> Result<Self, ValueError> {
        text.parse().map_err(ValueError::new)
    }

    fn switch_on(&mut self) {
        *self = true;
    }
}

/// Exactly one Unicode scalar value.
impl FlagValue for char {
    fn from_flag_text(text: &str) -> Result<Self, ValueError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValueError::new(format!(
                "expected exactly one character, got {}",
                text.chars().count()
            ))),
        }
    }
}

/// Every occurrence appends one element.
impl<T: FlagValue> FlagValue for Vec<T> {
    fn from_flag_text(text: &str) -> Result<Self, ValueError> {
        Ok(vec![T::from_flag_text(text)?])
    }

    fn assign(&mut self, text: &str) -> Result<(), ValueError> {
        self.push(T::from_flag_text(text)?);
        Ok(())
    }
}

/// Every occurrence replaces the value with a freshly converted one.
impl<T: FlagValue> FlagValue for Option<T> {
    fn from_flag_text(text: &str) -> Result<Self, ValueError> {
        T::from_flag_text(text).map(Some)
    }
}
