use std::env;
use thiserror::Error;

use crate::api::{FrozenRegistry, ParseResult};
use crate::matcher::{Feed, TokenMatcher};
use crate::model::ValueType;
use crate::parser::printer::{ErrorContext, Printer};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error encountered while parsing a command line.
///
/// Every error carries the `index` of the token it was detected at.
/// Errors detected once the tokens are exhausted (ex: `MissingRequired`) carry the token count.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token looked like an option, but no option (nor abbreviation) matches it.
    #[error("Parse error: unknown option '{name}' in '{token}'.")]
    UnknownOption {
        /// The offending token index.
        index: usize,
        /// The offending token.
        token: String,
        /// The option name, as written on the Cli.
        name: String,
    },
    /// A long option abbreviation matches more than one option.
    #[error("Parse error: '{token}' is ambiguous between {}.", quote(.candidates))]
    AmbiguousOption {
        /// The offending token index.
        index: usize,
        /// The offending token.
        token: String,
        /// The long names of every matching option.
        candidates: Vec<String>,
    },
    /// An option which requires a value was the final token.
    #[error("Parse error: option '{name}' requires a value.")]
    MissingValue {
        /// The index of the option token.
        index: usize,
        /// The option long name.
        name: String,
    },
    /// A value could not be converted to the declared type.
    #[error("Parse error: '{token}' cannot convert to {value_type} for '{name}'.")]
    TypeConversion {
        /// The offending token index.
        index: usize,
        /// The parameter identifier.
        name: String,
        /// The raw value.
        token: String,
        /// The declared type.
        value_type: ValueType,
    },
    /// A positional token with no remaining positional to absorb it.
    #[error("Parse error: unexpected positional '{token}'.")]
    UnexpectedPositional {
        /// The offending token index.
        index: usize,
        /// The offending token.
        token: String,
    },
    /// Required parameters which were not given, in registration order (options first).
    #[error("Parse error: missing required {}.", quote(.names))]
    MissingRequired {
        /// The token count.
        index: usize,
        /// The identifiers of every missing parameter.
        names: Vec<String>,
    },
}

fn quote(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<String>>()
        .join(", ")
}

impl ParseError {
    /// The index of the token at which the error was detected.
    pub fn index(&self) -> usize {
        match self {
            ParseError::UnknownOption { index, .. }
            | ParseError::AmbiguousOption { index, .. }
            | ParseError::MissingValue { index, .. }
            | ParseError::TypeConversion { index, .. }
            | ParseError::UnexpectedPositional { index, .. }
            | ParseError::MissingRequired { index, .. } => *index,
        }
    }

    /// Point out the error within the `tokens` it was parsed from.
    pub fn context<S: AsRef<str>>(&self, tokens: &[S]) -> ErrorContext {
        ErrorContext::new(self.index(), tokens)
    }
}

/// The successful outcome of a parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The tokens matched the registry.
    Parsed(ParseResult),
    /// Help was requested; carries the rendered help message.
    /// The caller decides whether to print it (and exit).
    Help(String),
}

impl Outcome {
    /// The parse result, unless help was requested.
    pub fn parsed(self) -> Option<ParseResult> {
        match self {
            Outcome::Parsed(result) => Some(result),
            Outcome::Help(_) => None,
        }
    }

    /// The help message, if help was requested.
    pub fn help(&self) -> Option<&str> {
        match self {
            Outcome::Parsed(_) => None,
            Outcome::Help(message) => Some(message.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelpWidth {
    Terminal,
    Fixed(usize),
}

/// The command line parser.
/// Built via `FrozenRegistry::parser` or `Parser::new`.
///
/// A parser holds no state between parses, and may be shared across threads.
///
/// ### Example
/// ```
/// # use command_line_builder as command_line;
/// use command_line::{OptionSpec, Outcome, Registry, ValueType};
///
/// let mut registry = Registry::new("greeter");
/// registry
///     .register_option(OptionSpec::flag("verbose", Some('v')))?
///     .register_option(OptionSpec::single("name", Some('n'), ValueType::String).required())?;
/// let parser = registry.freeze().parser();
///
/// let result = parser.parse(&["-v", "--name", "Alice"]).unwrap().parsed().unwrap();
/// assert_eq!(result.boolean("verbose"), Some(true));
/// assert_eq!(result.string("name"), Some("Alice"));
///
/// assert!(matches!(parser.parse(&["--help"]), Ok(Outcome::Help(_))));
/// # Ok::<(), command_line::RegistryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    registry: FrozenRegistry,
    abbreviations: bool,
    help_width: HelpWidth,
}

impl Parser {
    /// Create a parser over the frozen registry.
    /// Abbreviations are disabled, and help renders to the terminal width.
    pub fn new(registry: FrozenRegistry) -> Self {
        Self {
            registry,
            abbreviations: false,
            help_width: HelpWidth::Terminal,
        }
    }

    /// Allow long options to be given by any unambiguous prefix (ex: `--verb` for `--verbose`).
    pub fn abbreviations(mut self, enabled: bool) -> Self {
        self.abbreviations = enabled;
        self
    }

    /// Render help to a fixed `width`, rather than the terminal width.
    pub fn help_width(mut self, width: usize) -> Self {
        self.help_width = HelpWidth::Fixed(width);
        self
    }

    /// The registry this parser matches against.
    pub fn registry(&self) -> &FrozenRegistry {
        &self.registry
    }

    /// Parse the `tokens` (excluding the program name).
    ///
    /// Tokens are scanned once, left to right.
    /// The first error stops the scan and is returned, as is a help request.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Outcome, ParseError> {
        let mut matcher = TokenMatcher::new(self.registry.specification(), self.abbreviations);

        for token in tokens {
            match matcher.feed(token.as_ref()) {
                Ok(Feed::Continue) => {}
                Ok(Feed::Help) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Help requested.");
                    }

                    return Ok(Outcome::Help(self.help()));
                }
                Err(error) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Parse failed: {error}");
                    }

                    return Err(error);
                }
            }
        }

        let result = matcher.close()?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsed {} token(s): {result:?}.", tokens.len());
        }

        Ok(Outcome::Parsed(result))
    }

    /// Parse the process arguments (skipping the program name).
    pub fn parse_env(&self) -> Result<Outcome, ParseError> {
        let tokens: Vec<String> = env::args().skip(1).collect();
        self.parse(tokens.as_slice())
    }

    /// Render the help message.
    pub fn help(&self) -> String {
        let specification = self.registry.specification();

        match self.help_width {
            HelpWidth::Terminal => Printer::terminal(specification).render(),
            HelpWidth::Fixed(width) => Printer::new(specification, width).render(),
        }
    }
}
