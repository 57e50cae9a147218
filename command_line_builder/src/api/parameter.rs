use crate::model::{Arity, Value, ValueType};

/// A named parameter, specified on the Cli via `--NAME` (or the short name `-N`).
///
/// Options are optional unless marked [`OptionSpec::required`].
///
/// ### Example
/// ```
/// # use command_line_builder as command_line;
/// use command_line::{Arity, OptionSpec, ValueType};
///
/// let verbose = OptionSpec::flag("verbose", Some('v'));
/// let count = OptionSpec::single("count", None, ValueType::Integer)
///     .default(1i64)
///     .help("How many times to repeat.");
///
/// assert_eq!(verbose.arity(), Arity::Flag);
/// assert_eq!(count.short(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    name: String,
    short: Option<char>,
    arity: Arity,
    value_type: ValueType,
    required: bool,
    default: Option<Value>,
    help: Option<String>,
}

impl OptionSpec {
    fn new(name: impl Into<String>, short: Option<char>, arity: Arity, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            short,
            arity,
            value_type,
            required: false,
            default: None,
            help: None,
        }
    }

    /// Create a boolean option that takes no value (ex: `--verbose`).
    /// An absent flag resolves to `false`, unless another default is declared.
    pub fn flag(name: impl Into<String>, short: Option<char>) -> Self {
        Self::new(name, short, Arity::Flag, ValueType::Boolean)
    }

    /// Create an option taking precisely one value (ex: `--name Alice`).
    pub fn single(name: impl Into<String>, short: Option<char>, value_type: ValueType) -> Self {
        Self::new(name, short, Arity::Single, value_type)
    }

    /// Create an option which may be repeated, taking one value per occurrence (ex: `-I a -I b`).
    pub fn multi(name: impl Into<String>, short: Option<char>, value_type: ValueType) -> Self {
        Self::new(name, short, Arity::Multi, value_type)
    }

    /// Require this option to be resolved after parsing.
    /// A declared default satisfies the requirement.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declare the value used when the option is absent from the Cli.
    /// The value must match the option's `ValueType`, which is checked upon registration.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default.replace(value.into());
        self
    }

    /// Document the option for the help message.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// The long name, used as the identifier in the `ParseResult`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short name, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// How many values each occurrence takes.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// The declared type of the option's values.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Whether the option must be resolved after parsing.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The help message, if any.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// A parameter identified by its position on the Cli.
///
/// Positionals are required unless marked [`PositionalSpec::optional`].
/// The final positional may be [`PositionalSpec::variadic`], absorbing all remaining positional tokens.
///
/// ### Example
/// ```
/// # use command_line_builder as command_line;
/// use command_line::{PositionalSpec, ValueType};
///
/// let files = PositionalSpec::new("files", ValueType::String)
///     .variadic()
///     .help("The files to read.");
///
/// assert!(files.is_variadic());
/// assert!(files.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalSpec {
    name: String,
    value_type: ValueType,
    required: bool,
    variadic: bool,
    help: Option<String>,
}

impl PositionalSpec {
    /// Create a required positional taking precisely one value.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            required: true,
            variadic: false,
            help: None,
        }
    }

    /// Allow the positional to be absent from the Cli.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Absorb all remaining positional tokens into this parameter.
    /// When required, at least one value must be given.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Document the positional for the help message.
    /// If repeated, only the final help message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// The identifier of the positional in the `ParseResult`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the positional's values.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Whether the positional must be given.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the positional absorbs the remaining positional tokens.
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// The help message, if any.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }
}
