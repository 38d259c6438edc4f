use crate::error::Errors;
use crate::parser::{ParseOptions, Parser};
use crate::schema::{FlagInfo, Schema};

/// A struct whose fields are flag values.
///
/// Usually derived with `#[derive(Flags)]`. A hand-written implementation
/// registers every field, in declaration order:
///
/// ```
/// use flagscan::{Flags, Schema};
///
/// #[derive(Default)]
/// struct Shared {
///     verbose: bool,
///     jobs: Option<u32>,
/// }
///
/// impl Flags for Shared {
///     fn schema(&mut self) -> Schema<'_> {
///         Schema::builder()
///             .aliased("--verbose", "-v", &mut self.verbose)
///             .aliased("--jobs", "-j", &mut self.jobs)
///             .build()
///     }
/// }
///
/// let parsed = Shared::parse(&["-v", "-j", "4"]);
/// assert!(parsed.flags.verbose);
/// assert_eq!(parsed.flags.jobs, Some(4));
/// ```
pub trait Flags: Default {
    fn schema(&mut self) -> Schema<'_>;

    /// Parse `tokens` into a default-initialized flag set. Unknown flags are
    /// errors.
    fn parse<S: AsRef<str>>(tokens: &[S]) -> Parsed<Self> {
        Self::parse_with(tokens, ParseOptions::strict())
    }

    fn parse_with<S: AsRef<str>>(tokens: &[S], options: ParseOptions) -> Parsed<Self> {
        let mut flags = Self::default();
        let (args, errors) = Parser::new(options).parse(&mut flags.schema(), tokens);
        Parsed {
            flags,
            args,
            errors,
        }
    }

    /// Parse the leftovers of a previous parse. `args` is replaced by this
    /// parse's positional arguments and its errors are appended to `errors`.
    /// Unknown flags are errors.
    fn parse_chained(args: &mut Vec<String>, errors: &mut Errors) -> Self {
        Self::parse_chained_with(args, errors, ParseOptions::strict())
    }

    fn parse_chained_with(
        args: &mut Vec<String>,
        errors: &mut Errors,
        options: ParseOptions,
    ) -> Self {
        let mut flags = Self::default();
        Parser::new(options).parse_chained(&mut flags.schema(), args, errors);
        flags
    }

    /// Declared flags of a default instance, in declaration order.
    fn describe() -> Vec<FlagInfo> {
        Self::default().schema().infos()
    }
}

/// Result of one parse call.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<F> {
    pub flags: F,
    /// Positional arguments in input order, including everything after `--`.
    pub args: Vec<String>,
    pub errors: Errors,
}

impl<F> Parsed<F> {
    pub fn into_parts(self) -> (F, Vec<String>, Errors) {
        (self.flags, self.args, self.errors)
    }
}

impl<F> From<Parsed<F>> for (F, Vec<String>, Errors) {
    fn from(parsed: Parsed<F>) -> Self {
        parsed.into_parts()
    }
}
