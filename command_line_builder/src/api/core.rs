use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::api::{OptionSpec, PositionalSpec};
use crate::constant::*;
use crate::parser::Parser;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error registering a parameter.
///
/// Registration fails fast: the offending call is rejected and the registry is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The long name, short name, or positional identifier is already taken.
    #[error("Config error: cannot duplicate the name '{0}'.")]
    DuplicateName(String),

    /// The parameter cannot be registered as declared.
    #[error("Config error: {0}")]
    InvalidSpec(String),

    /// The registry has been frozen and no longer accepts changes.
    #[error("Config error: the registry is frozen.")]
    RegistryFrozen,
}

/// The specification registry: the set of options and positionals a command line accepts.
///
/// Configure the registry via `register_option` and `register_positional`, and then `freeze` it.
/// The frozen registry is what a [`Parser`] matches tokens against.
///
/// ### Example
/// ```
/// # use command_line_builder as command_line;
/// use command_line::{OptionSpec, PositionalSpec, Registry, RegistryError, ValueType};
///
/// let mut registry = Registry::new("program");
/// registry
///     .register_option(OptionSpec::flag("verbose", Some('v')))?
///     .register_positional(PositionalSpec::new("file", ValueType::String))?;
/// let frozen = registry.freeze();
///
/// assert_eq!(
///     registry.register_option(OptionSpec::flag("quiet", Some('q'))).unwrap_err(),
///     RegistryError::RegistryFrozen,
/// );
/// assert_eq!(frozen.options().len(), 1);
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Debug)]
pub struct Registry {
    program: String,
    about: Option<String>,
    help: bool,
    options: Vec<OptionSpec>,
    positionals: Vec<PositionalSpec>,
    frozen: Option<FrozenRegistry>,
}

impl Registry {
    /// Create an empty registry for the named program.
    /// The built-in help option (`-h`, `--help`) is enabled.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            help: true,
            options: Vec::default(),
            positionals: Vec::default(),
            frozen: None,
        }
    }

    /// Document the about message for the help output.
    /// If repeated, only the final about message will apply.
    pub fn about(&mut self, description: impl Into<String>) -> Result<&mut Self, RegistryError> {
        self.check_mutable()?;
        self.about.replace(description.into());
        Ok(self)
    }

    /// Remove the built-in help option, releasing the names `help` and `h`.
    pub fn disable_help(&mut self) -> Result<&mut Self, RegistryError> {
        self.check_mutable()?;
        self.help = false;
        Ok(self)
    }

    /// Register an option.
    ///
    /// Fails with `DuplicateName` if the long or short name is already taken, including by the built-in help option.
    /// Fails with `InvalidSpec` if a name is malformed, or the default does not match the declared type.
    pub fn register_option(&mut self, spec: OptionSpec) -> Result<&mut Self, RegistryError> {
        self.check_mutable()?;
        check_long_name(spec.name())?;

        if let Some(short) = spec.short() {
            if short == VALUE_DELIMITER || short == '-' || short.is_whitespace() {
                return Err(RegistryError::InvalidSpec(format!(
                    "'{short}' is not a valid short name."
                )));
            }
        }

        if let Some(default) = spec.default_value() {
            if default.value_type() != spec.value_type() {
                return Err(RegistryError::InvalidSpec(format!(
                    "the default '{default}' of '{n}' is not of type {t}.",
                    n = spec.name(),
                    t = spec.value_type(),
                )));
            }
        }

        if self.name_taken(spec.name()) || (self.help && spec.name() == HELP_NAME) {
            return Err(RegistryError::DuplicateName(spec.name().to_string()));
        }

        if let Some(short) = spec.short() {
            if self.options.iter().any(|o| o.short() == Some(short))
                || (self.help && short == HELP_SHORT)
            {
                return Err(RegistryError::DuplicateName(short.to_string()));
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registered option: {spec:?}.");
        }

        self.options.push(spec);
        Ok(self)
    }

    /// Register a positional.
    /// Positionals are matched in the order they are registered.
    ///
    /// Fails with `DuplicateName` if the identifier is already taken.
    /// Fails with `InvalidSpec` if the positional follows a variadic positional, or is required and follows an optional positional.
    pub fn register_positional(&mut self, spec: PositionalSpec) -> Result<&mut Self, RegistryError> {
        self.check_mutable()?;
        check_long_name(spec.name())?;

        if self.name_taken(spec.name()) {
            return Err(RegistryError::DuplicateName(spec.name().to_string()));
        }

        if let Some(previous) = self.positionals.last() {
            if previous.is_variadic() {
                return Err(RegistryError::InvalidSpec(format!(
                    "'{n}' cannot follow the variadic positional '{p}'.",
                    n = spec.name(),
                    p = previous.name(),
                )));
            }

            if spec.is_required() && !previous.is_required() {
                return Err(RegistryError::InvalidSpec(format!(
                    "the required positional '{n}' cannot follow the optional positional '{p}'.",
                    n = spec.name(),
                    p = previous.name(),
                )));
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registered positional: {spec:?}.");
        }

        self.positionals.push(spec);
        Ok(self)
    }

    /// Finalize the registry.
    ///
    /// Returns the read-only snapshot used for parsing; repeated calls return the same snapshot.
    /// Any further mutation of this registry fails with `RegistryFrozen`.
    pub fn freeze(&mut self) -> FrozenRegistry {
        if let Some(frozen) = &self.frozen {
            return frozen.clone();
        }

        let frozen = FrozenRegistry {
            specification: Arc::new(Specification::new(
                self.program.clone(),
                self.about.clone(),
                self.help,
                self.options.clone(),
                self.positionals.clone(),
            )),
        };
        self.frozen.replace(frozen.clone());
        frozen
    }

    /// Whether `freeze` has been called.
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    fn check_mutable(&self) -> Result<(), RegistryError> {
        if self.is_frozen() {
            Err(RegistryError::RegistryFrozen)
        } else {
            Ok(())
        }
    }

    fn name_taken(&self, name: &str) -> bool {
        self.options.iter().any(|o| o.name() == name)
            || self.positionals.iter().any(|p| p.name() == name)
    }
}

fn check_long_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty()
        || name.starts_with('-')
        || name.contains(VALUE_DELIMITER)
        || name.contains(char::is_whitespace)
    {
        Err(RegistryError::InvalidSpec(format!(
            "'{name}' is not a valid name."
        )))
    } else {
        Ok(())
    }
}

/// The read-only snapshot of a [`Registry`].
///
/// Cloning is cheap, and the snapshot may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct FrozenRegistry {
    specification: Arc<Specification>,
}

impl FrozenRegistry {
    /// The program name, as shown in the help message.
    pub fn program(&self) -> &str {
        &self.specification.program
    }

    /// The registered options, in registration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.specification.options
    }

    /// The registered positionals, in registration order.
    pub fn positionals(&self) -> &[PositionalSpec] {
        &self.specification.positionals
    }

    /// Create a parser over this registry with the default settings.
    pub fn parser(&self) -> Parser {
        Parser::new(self.clone())
    }

    pub(crate) fn specification(&self) -> &Specification {
        &self.specification
    }
}

#[derive(Debug)]
pub(crate) struct Specification {
    pub(crate) program: String,
    pub(crate) about: Option<String>,
    pub(crate) help: bool,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) positionals: Vec<PositionalSpec>,
    longs: HashMap<String, usize>,
    shorts: HashMap<char, usize>,
}

impl Specification {
    fn new(
        program: String,
        about: Option<String>,
        help: bool,
        options: Vec<OptionSpec>,
        positionals: Vec<PositionalSpec>,
    ) -> Self {
        let mut longs = HashMap::default();
        let mut shorts = HashMap::default();

        for (index, option) in options.iter().enumerate() {
            longs.insert(option.name().to_string(), index);

            if let Some(short) = option.short() {
                shorts.insert(short, index);
            }
        }

        Self {
            program,
            about,
            help,
            options,
            positionals,
            longs,
            shorts,
        }
    }

    pub(crate) fn find_long(&self, name: &str) -> Option<usize> {
        self.longs.get(name).copied()
    }

    pub(crate) fn find_short(&self, short: char) -> Option<usize> {
        self.shorts.get(&short).copied()
    }

    /// The long names starting with `prefix`, sorted.
    pub(crate) fn long_candidates(&self, prefix: &str) -> Vec<&str> {
        let mut candidates: Vec<&str> = self
            .longs
            .keys()
            .map(String::as_str)
            .chain(self.help.then_some(HELP_NAME))
            .filter(|name| name.starts_with(prefix))
            .collect();
        candidates.sort();
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;
    use rstest::rstest;

    #[test]
    fn register_option() {
        let mut registry = Registry::new("program");
        registry
            .register_option(OptionSpec::flag("verbose", Some('v')))
            .unwrap()
            .register_option(OptionSpec::single("name", None, ValueType::String))
            .unwrap();

        let frozen = registry.freeze();
        assert_eq!(frozen.program(), "program");
        assert_eq!(
            frozen.options(),
            &[
                OptionSpec::flag("verbose", Some('v')),
                OptionSpec::single("name", None, ValueType::String),
            ]
        );
        assert!(frozen.positionals().is_empty());
    }

    #[rstest]
    #[case(OptionSpec::flag("verbose", None), "verbose")]
    #[case(OptionSpec::flag("other", Some('v')), "v")]
    #[case(OptionSpec::single("file", None, ValueType::String), "file")]
    #[case(OptionSpec::flag("help", None), "help")]
    #[case(OptionSpec::flag("host", Some('h')), "h")]
    fn register_option_duplicate(#[case] spec: OptionSpec, #[case] name: &str) {
        let mut registry = Registry::new("program");
        registry
            .register_option(OptionSpec::flag("verbose", Some('v')))
            .unwrap()
            .register_positional(PositionalSpec::new("file", ValueType::String))
            .unwrap();

        let error = registry.register_option(spec).unwrap_err();
        assert_eq!(error, RegistryError::DuplicateName(name.to_string()));
        assert_eq!(registry.freeze().options().len(), 1);
    }

    #[test]
    fn register_option_help_disabled() {
        let mut registry = Registry::new("program");
        registry
            .disable_help()
            .unwrap()
            .register_option(OptionSpec::single("host", Some('h'), ValueType::String))
            .unwrap()
            .register_option(OptionSpec::flag("help", None))
            .unwrap();

        let frozen = registry.freeze();
        assert_eq!(frozen.options().len(), 2);
        assert!(!frozen.specification().help);
    }

    #[rstest]
    #[case(OptionSpec::flag("", None))]
    #[case(OptionSpec::flag("-verbose", None))]
    #[case(OptionSpec::flag("a=b", None))]
    #[case(OptionSpec::flag("a b", None))]
    #[case(OptionSpec::flag("verbose", Some('-')))]
    #[case(OptionSpec::flag("verbose", Some('=')))]
    #[case(OptionSpec::flag("verbose", Some(' ')))]
    #[case(OptionSpec::flag("verbose", None).default(1i64))]
    #[case(OptionSpec::single("count", None, ValueType::Integer).default("1"))]
    #[case(OptionSpec::multi("ratio", None, ValueType::Float).default(1i64))]
    fn register_option_invalid(#[case] spec: OptionSpec) {
        let mut registry = Registry::new("program");
        assert_matches!(
            registry.register_option(spec),
            Err(RegistryError::InvalidSpec(_))
        );
    }

    #[test]
    fn register_positional() {
        let mut registry = Registry::new("program");
        registry
            .register_positional(PositionalSpec::new("a", ValueType::Integer))
            .unwrap()
            .register_positional(PositionalSpec::new("b", ValueType::String).optional())
            .unwrap()
            .register_positional(
                PositionalSpec::new("c", ValueType::String)
                    .optional()
                    .variadic(),
            )
            .unwrap();

        let frozen = registry.freeze();
        let names: Vec<&str> = frozen
            .positionals()
            .iter()
            .map(PositionalSpec::name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[rstest]
    #[case(PositionalSpec::new("after", ValueType::String))]
    #[case(PositionalSpec::new("after", ValueType::String).optional())]
    #[case(PositionalSpec::new("after", ValueType::String).variadic())]
    fn register_positional_after_variadic(#[case] spec: PositionalSpec) {
        let mut registry = Registry::new("program");
        registry
            .register_positional(PositionalSpec::new("files", ValueType::String).variadic())
            .unwrap();

        let error = registry.register_positional(spec).unwrap_err();
        assert_matches!(error, RegistryError::InvalidSpec(message) => {
            assert_eq!(message, "'after' cannot follow the variadic positional 'files'.");
        });
    }

    #[test]
    fn register_positional_required_after_optional() {
        let mut registry = Registry::new("program");
        registry
            .register_positional(PositionalSpec::new("a", ValueType::String).optional())
            .unwrap();

        assert_matches!(
            registry.register_positional(PositionalSpec::new("b", ValueType::String)),
            Err(RegistryError::InvalidSpec(_))
        );
    }

    #[test]
    fn register_positional_duplicate() {
        let mut registry = Registry::new("program");
        registry
            .register_option(OptionSpec::single("name", Some('n'), ValueType::String))
            .unwrap();

        assert_eq!(
            registry
                .register_positional(PositionalSpec::new("name", ValueType::String))
                .unwrap_err(),
            RegistryError::DuplicateName("name".to_string())
        );
    }

    #[test]
    fn freeze() {
        let mut registry = Registry::new("program");
        assert!(!registry.is_frozen());
        registry
            .register_option(OptionSpec::flag("verbose", None))
            .unwrap();

        let frozen = registry.freeze();
        assert!(registry.is_frozen());
        assert!(Arc::ptr_eq(
            &frozen.specification,
            &registry.freeze().specification
        ));

        assert_eq!(
            registry
                .register_option(OptionSpec::flag("quiet", None))
                .unwrap_err(),
            RegistryError::RegistryFrozen
        );
        assert_eq!(
            registry
                .register_positional(PositionalSpec::new("file", ValueType::String))
                .unwrap_err(),
            RegistryError::RegistryFrozen
        );
        assert_eq!(
            registry.about("about").unwrap_err(),
            RegistryError::RegistryFrozen
        );
        assert_eq!(
            registry.disable_help().unwrap_err(),
            RegistryError::RegistryFrozen
        );
        assert_eq!(frozen.options().len(), 1);
    }

    #[test]
    fn frozen_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrozenRegistry>();
    }

    #[rstest]
    #[case("", vec!["alpha", "beta", "help"])]
    #[case("al", vec!["alpha"])]
    #[case("h", vec!["help"])]
    #[case("x", vec![])]
    fn long_candidates(#[case] prefix: &str, #[case] expected: Vec<&str>) {
        let mut registry = Registry::new("program");
        registry
            .register_option(OptionSpec::flag("beta", None))
            .unwrap()
            .register_option(OptionSpec::flag("alpha", None))
            .unwrap();
        let frozen = registry.freeze();

        assert_eq!(frozen.specification().long_candidates(prefix), expected);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            RegistryError::DuplicateName("name".to_string()).to_string(),
            "Config error: cannot duplicate the name 'name'."
        );
        assert_eq!(
            RegistryError::RegistryFrozen.to_string(),
            "Config error: the registry is frozen."
        );
    }
}
