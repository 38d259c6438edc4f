use crate::descriptor::Assign;
use crate::error::{Errors, FlagError};
use crate::name::{MARKER, TERMINATOR};
use crate::schema::Schema;

/// What to do with a `-`-prefixed token that matches no declared flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFlags {
    /// Record [`FlagError::UnknownFlag`].
    #[default]
    Error,
    /// Keep it as a positional argument, for a later flag set to handle.
    Positional,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub unknown: UnknownFlags,
}

impl ParseOptions {
    /// Unknown flags are errors.
    pub fn strict() -> Self {
        Self {
            unknown: UnknownFlags::Error,
        }
    }

    /// Unknown flags pass through as positional arguments.
    pub fn permissive() -> Self {
        Self {
            unknown: UnknownFlags::Positional,
        }
    }
}

/// Single-pass token scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Scan `tokens` against `schema`, storing flag values through it.
    ///
    /// Returns the positional arguments and the errors, both in input order.
    /// Every token is accounted for: it is consumed by a flag, kept as a
    /// positional argument, or reported as an error.
    pub fn parse<S: AsRef<str>>(
        &self,
        schema: &mut Schema<'_>,
        tokens: &[S],
    ) -> (Vec<String>, Errors) {
        let mut args = Vec::new();
        let mut errors = Errors::new();

        let mut pos = 0;
        while pos < tokens.len() {
            let token = tokens[pos].as_ref();
            if token == TERMINATOR {
                args.extend(tokens[pos + 1..].iter().map(|t| t.as_ref().to_string()));
                break;
            }

            let next = tokens.get(pos + 1).map(AsRef::as_ref);
            let outcome = schema
                .find_mut(token)
                .map_or(Assign::NotMatched, |d| d.assign(token, next));

            match outcome {
                Assign::NotMatched => {
                    if token.starts_with(MARKER) && self.options.unknown == UnknownFlags::Error {
                        tracing::trace!(position = pos, token, "unknown flag");
                        errors.push(FlagError::UnknownFlag {
                            position: pos,
                            token: token.to_string(),
                        });
                    } else {
                        args.push(token.to_string());
                    }
                }
                Assign::One | Assign::Two => {
                    tracing::trace!(position = pos, token, "flag set");
                }
                Assign::Missing => errors.push(FlagError::MissingValue {
                    position: pos,
                    token: token.to_string(),
                }),
                Assign::Invalid => errors.push(FlagError::InvalidValue {
                    position: pos,
                    token: token.to_string(),
                    value: next.unwrap_or_default().to_string(),
                }),
            }
            pos += outcome.consumed();
        }

        tracing::debug!(
            tokens = tokens.len(),
            positional = args.len(),
            errors = errors.len(),
            "flags parsed"
        );
        (args, errors)
    }

    /// Parse `args` in place: on return it holds only the leftover
    /// positional arguments, and new errors are appended to `errors`.
    ///
    /// Error positions index into `args` as it was passed in.
    pub fn parse_chained(
        &self,
        schema: &mut Schema<'_>,
        args: &mut Vec<String>,
        errors: &mut Errors,
    ) {
        let (rest, new_errors) = self.parse(schema, args.as_slice());
        *args = rest;
        errors.extend(new_errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown(position: usize, token: &str) -> FlagError {
        FlagError::UnknownFlag {
            position,
            token: token.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut port = 1i32;
        let mut schema = Schema::builder().flag("--port", &mut port).build();
        let (args, errors) = Parser::default().parse::<&str>(&mut schema, &[]);
        assert!(args.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn terminator_is_sticky() {
        let mut port = 0i32;
        let mut schema = Schema::builder().flag("--port", &mut port).build();
        let tokens = ["--port", "1", "--", "a", "-b", "--port", "0"];
        let (args, errors) = Parser::default().parse(&mut schema, &tokens);
        drop(schema);

        assert_eq!(port, 1);
        assert_eq!(args, ["a", "-b", "--port", "0"]);
        assert!(errors.is_empty());
    }

    #[test]
    fn terminator_as_value_is_missing_value() {
        let mut port = 0i32;
        let mut schema = Schema::builder().flag("--port", &mut port).build();
        let (args, errors) = Parser::default().parse(&mut schema, &["--port", "--", "x"]);

        assert_eq!(args, ["x"]);
        assert_eq!(
            errors.into_vec(),
            [FlagError::MissingValue {
                position: 0,
                token: "--port".to_string()
            }]
        );
    }

    #[test]
    fn strict_and_permissive_unknown_flags() {
        let mut verbose = false;
        let mut schema = Schema::builder().flag("-v", &mut verbose).build();

        let (args, errors) = Parser::new(ParseOptions::strict()).parse(&mut schema, &["--bogus"]);
        assert!(args.is_empty());
        assert_eq!(errors.into_vec(), [unknown(0, "--bogus")]);

        let (args, errors) =
            Parser::new(ParseOptions::permissive()).parse(&mut schema, &["--bogus"]);
        assert_eq!(args, ["--bogus"]);
        assert!(errors.is_empty());
    }

    #[test]
    fn bare_dash_is_an_unknown_flag_in_strict_mode() {
        let mut verbose = false;
        let mut schema = Schema::builder().flag("-v", &mut verbose).build();
        let (args, errors) = Parser::default().parse(&mut schema, &["-", "", "file"]);
        assert_eq!(args, ["", "file"]);
        assert_eq!(errors.into_vec(), [unknown(0, "-")]);
    }

    #[test]
    fn invalid_value_is_not_rescanned() {
        let mut count = 0i32;
        let mut verbose = false;
        let mut schema = Schema::builder()
            .flag("-n", &mut count)
            .flag("-v", &mut verbose)
            .build();
        let (args, errors) = Parser::default().parse(&mut schema, &["-n", "abc", "-v"]);
        drop(schema);

        assert!(args.is_empty());
        assert!(verbose);
        assert_eq!(count, 0);
        assert_eq!(
            errors.into_vec(),
            [FlagError::InvalidValue {
                position: 0,
                token: "-n".to_string(),
                value: "abc".to_string()
            }]
        );
    }

    #[test]
    fn negative_number_is_treated_as_missing_value() {
        let mut count = 0i32;
        let mut schema = Schema::builder().flag("-n", &mut count).build();
        let (args, errors) = Parser::default().parse(&mut schema, &["-n", "-5"]);

        assert!(args.is_empty());
        assert_eq!(
            errors.into_vec(),
            [
                FlagError::MissingValue {
                    position: 0,
                    token: "-n".to_string()
                },
                unknown(1, "-5"),
            ]
        );
    }

    #[test]
    fn first_declared_flag_wins_a_shared_alias() {
        let (mut first, mut second) = (0u8, 0u8);
        let mut schema = Schema::builder()
            .aliased("--first", "-x", &mut first)
            .aliased("--second", "-x", &mut second)
            .build();
        let (_, errors) = Parser::default().parse(&mut schema, &["-x", "4"]);
        drop(schema);

        assert!(errors.is_empty());
        assert_eq!((first, second), (4, 0));
    }

    #[test]
    fn parse_chained_replaces_args_and_appends_errors() {
        let mut port = 0i32;
        let mut schema = Schema::builder().flag("--port", &mut port).build();
        let mut args: Vec<String> = ["--port", "8080", "--unknown", "value"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut errors: Errors = vec![unknown(9, "--earlier")].into();

        Parser::default().parse_chained(&mut schema, &mut args, &mut errors);
        drop(schema);

        assert_eq!(port, 8080);
        assert_eq!(args, ["value"]);
        assert_eq!(errors.into_vec(), [unknown(9, "--earlier"), unknown(2, "--unknown")]);
    }
}
