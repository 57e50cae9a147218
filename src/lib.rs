//! `command_line` is a small command line parser for Rust.
//!
//! It prioritizes the following design concerns:
//! * *Declare, then freeze*:
//! Parameters are declared against a mutable [`Registry`].
//! Freezing the registry produces an immutable, shareable [`FrozenRegistry`], which is all a [`Parser`] ever reads.
//! * *Option vs. positional paradigm*:
//! Options are specified via `--..` or `-..` syntax, and may be flags, single-value or multi-value.
//! Positionals are specified by position, and may be optional or variadic.
//! * *Typed values*:
//! Every value is converted to its declared [`ValueType`] during the parse.
//! * *Single pass*:
//! Tokens are scanned once, left to right, and the first error stops the scan.
//! * *No side effects*:
//! The parser never prints nor exits.
//! Help requests and errors are returned, and the caller decides what to do with them.
//!
//! # Usage
//! More examples are outlined in [the source](https://github.com/ltjax/command_line/tree/main/demos).
//!
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ summer -h
//! usage: summer [-h] ITEM [...]
//!
//! positional arguments:
//!  ITEM [...]  The items to sum. (required)
//!
//! options:
//!  -h, --help  Show this help message and exit.
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer
//! Parse error: missing required 'item'.
//!
//! ^
//!
//! $ summer 1 blah
//! Parse error: 'blah' cannot convert to integer for 'item'.
//! 1 blah
//!   ^
//! ```
//!
//! # Registry
//! Declare parameters on a [`Registry`] via [`Registry::register_option`] and [`Registry::register_positional`].
//! Every declaration is validated immediately (ex: duplicate names are rejected with [`RegistryError::DuplicateName`]).
//!
//! Options ([`OptionSpec`]) come in three arities:
//! * [`OptionSpec::flag`]: takes no value (ex: `--verbose`), and resolves to `false` when absent.
//! * [`OptionSpec::single`]: takes exactly one value (ex: `--name Alice`); when repeated, the last value wins.
//! * [`OptionSpec::multi`]: takes one value per occurrence (ex: `-I a -I b`), accumulating them in order.
//!
//! Positionals ([`PositionalSpec`]) are matched in registration order.
//! They are required by default, and the final positional may be variadic.
//!
//! A registry includes the `-h, --help` option, unless [`Registry::disable_help`] is called.
//!
//! ```
//! use command_line::{OptionSpec, PositionalSpec, Registry, RegistryError, ValueType};
//!
//! let mut registry = Registry::new("program");
//! registry
//!     .register_option(OptionSpec::single("name", Some('n'), ValueType::String))?
//!     .register_positional(PositionalSpec::new("file", ValueType::String))?;
//!
//! assert_eq!(
//!     registry.register_option(OptionSpec::flag("file", None)).unwrap_err(),
//!     RegistryError::DuplicateName("file".to_string())
//! );
//! # Ok::<(), RegistryError>(())
//! ```
//!
//! # Parsing
//! Freeze the registry with [`Registry::freeze`], and parse with [`Parser::parse`] (or [`Parser::parse_env`]).
//! The frozen registry may be cloned and shared across threads; any number of parses may run against it concurrently.
//!
//! The Cli syntax follows the conventional shapes:
//! * `--name VALUE`, `--name=VALUE`.
//! * `-n VALUE`, `-nVALUE`, `-n=VALUE`.
//! * `-abc` bundles flags; a value-taking option ends the bundle (ex: `-vnAlice`).
//! * `--` ends the options; every later token is a positional.
//! * `-` and negative numbers (ex: `-5`) are positionals.
//!
//! ```
//! use command_line::{OptionSpec, Outcome, PositionalSpec, Registry, ValueType};
//!
//! let mut registry = Registry::new("program");
//! registry
//!     .register_option(OptionSpec::flag("verbose", Some('v')))?
//!     .register_option(OptionSpec::multi("include", Some('I'), ValueType::String))?
//!     .register_positional(PositionalSpec::new("offset", ValueType::Integer))?;
//! let frozen = registry.freeze();
//! let parser = frozen.parser();
//!
//! let result = parser.parse(&["-vIa", "-I", "b", "--", "-3"])?.parsed().unwrap();
//! assert_eq!(result.boolean("verbose"), Some(true));
//! assert_eq!(result.values("include").len(), 2);
//! assert_eq!(result.integer("offset"), Some(-3));
//!
//! assert!(matches!(parser.parse(&["-h"])?, Outcome::Help(_)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//! * `tracing_debug`: emits `tracing` debug events while matching tokens.
pub use command_line_builder::*;
