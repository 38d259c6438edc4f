//! Declarative, typed command-line flag parsing.
//!
//! A flag set is a plain struct whose fields are the flag values. Each field
//! is registered, in declaration order, into a [`Schema`] that the [`Parser`]
//! walks for every token. Parsing never fails and never stops early: it
//! returns the populated flags, the leftover positional arguments and every
//! problem it found, all at once.
//!
//! ```
//! use flagscan::{Flags, Parsed};
//!
//! #[derive(Flags, Debug)]
//! struct ServerFlags {
//!     #[flag("--port", default = 8080)]
//!     port: u16,
//!     #[flag("--help", alias = "-h")]
//!     help: bool,
//! }
//!
//! let Parsed { flags, args, errors } = ServerFlags::parse(&["server", "--port", "9000"]);
//! assert_eq!(flags.port, 9000);
//! assert!(!flags.help);
//! assert_eq!(args, ["server"]);
//! assert!(errors.is_empty());
//! ```
//!
//! Flag sets can be layered: parse a shared set permissively first, then hand
//! the leftovers to a command-specific set with [`Flags::parse_chained`].
//!
//! Token rules:
//! - names and aliases match by exact string equality only (no `--name=value`);
//! - `--` ends flag scanning, everything after it is positional;
//! - a value that starts with `-` is never taken as a flag's value.

extern crate self as flagscan;

mod descriptor;
mod error;
mod flags;
mod name;
mod parser;
mod schema;
mod value;

pub use descriptor::{Assign, Descriptor};
pub use error::{Errors, FlagError, FlagNameError, ValueError};
pub use flags::{Flags, Parsed};
pub use name::{FlagName, MARKER, TERMINATOR, is_valid_flag_name};
pub use parser::{ParseOptions, Parser, UnknownFlags};
pub use schema::{FlagInfo, Schema, SchemaBuilder};
pub use value::FlagValue;

/// Derive [`Flags`] for a struct with named fields.
///
/// Every field needs a `#[flag("--name")]` attribute, optionally with
/// `alias = "-n"` and `default = <expr>`. Names are checked while the macro
/// expands, so a malformed name is a compile error. The derive also
/// implements [`Default`], using each field's `default` expression or
/// `Default::default()`.
///
/// ```
/// #[derive(flagscan::Flags)]
/// struct Accepted {
///     #[flag("--port", alias = "-p", default = 8080)]
///     port: u16,
///     #[flag("-")]
///     stdin: bool,
/// }
/// ```
///
/// A name must start with `-`:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct Unprefixed {
///     #[flag("port")]
///     port: u16,
/// }
/// ```
///
/// It cannot be empty:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct Empty {
///     #[flag("")]
///     port: u16,
/// }
/// ```
///
/// It cannot be the `--` terminator:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct Terminator {
///     #[flag("--")]
///     rest: bool,
/// }
/// ```
///
/// Aliases follow the same rules:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct BadAlias {
///     #[flag("--port", alias = "p")]
///     port: u16,
/// }
/// ```
///
/// Each key may appear once:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct TwoAliases {
///     #[flag("--port", alias = "-p", alias = "-P")]
///     port: u16,
/// }
/// ```
///
/// Only `alias` and `default` are known keys:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct UnknownKey {
///     #[flag("--port", short = "-p")]
///     port: u16,
/// }
/// ```
///
/// Every field must be a flag:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct Undeclared {
///     #[flag("--port")]
///     port: u16,
///     host: String,
/// }
/// ```
///
/// Fields must be named:
///
/// ```compile_fail
/// #[derive(flagscan::Flags)]
/// struct Tuple(#[flag("--port")] u16);
/// ```
#[cfg(feature = "derive")]
pub use flagscan_macros::Flags;
