use terminal_size::{terminal_size, Width};

use crate::api::Specification;
use crate::constant::*;
use crate::model::{Arity, Value};
use crate::parser::column::{chunk, target_width, ColumnRenderer, MINIMUM_MIDDLE_WIDTH};

// The total width to render to when the terminal width cannot be detected.
pub(crate) const DEFAULT_TOTAL_WIDTH: usize = 80;
const PADDING_WIDTH: usize = 2;
const MAIN_INDENT: usize = 1;

/// Produces the help message for a specification.
pub(crate) struct Printer<'s> {
    specification: &'s Specification,
    total_width: usize,
}

impl<'s> Printer<'s> {
    pub(crate) fn terminal(specification: &'s Specification) -> Self {
        let total_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            terminal_width as usize
        } else {
            DEFAULT_TOTAL_WIDTH
        };

        Self::new(specification, total_width)
    }

    pub(crate) fn new(specification: &'s Specification, total_width: usize) -> Self {
        Self {
            specification,
            total_width,
        }
    }

    pub(crate) fn render(&self) -> String {
        let specification = self.specification;
        let mut summary = Vec::default();
        let mut option_rows: Vec<(String, String)> = Vec::default();
        let mut argument_rows: Vec<(String, String)> = Vec::default();

        if specification.help {
            summary.push(format!("[-{HELP_SHORT}]"));
            option_rows.push((
                format!("-{HELP_SHORT}, --{HELP_NAME}"),
                HELP_MESSAGE.to_string(),
            ));
        }

        let mut options: Vec<_> = specification.options.iter().collect();
        options.sort_by(|a, b| a.name().cmp(b.name()));

        for option in options {
            let name = option.name();
            let grammar = match option.arity() {
                Arity::Flag => "".to_string(),
                Arity::Single | Arity::Multi => format!(" {}", metavar(name)),
            };
            let (flags, usage) = match option.short() {
                Some(s) => (format!("-{s}, --{name}{grammar}"), format!("-{s}{grammar}")),
                None => (format!("--{name}{grammar}"), format!("--{name}{grammar}")),
            };
            let usage = if option.is_required() {
                usage
            } else {
                format!("[{usage}]")
            };

            summary.push(match option.arity() {
                Arity::Multi => format!("{usage}..."),
                Arity::Flag | Arity::Single => usage,
            });
            option_rows.push((
                flags,
                describe(option.help_text(), option.is_required(), option.default_value()),
            ));
        }

        for positional in &specification.positionals {
            let name = metavar(positional.name());
            let grammar = match (positional.is_required(), positional.is_variadic()) {
                (true, false) => name,
                (true, true) => format!("{name} [...]"),
                (false, false) => format!("[{name}]"),
                (false, true) => format!("[{name} ...]"),
            };

            summary.push(grammar.clone());
            argument_rows.push((
                grammar,
                describe(positional.help_text(), positional.is_required(), None),
            ));
        }

        let left_column_width = option_rows
            .iter()
            .chain(argument_rows.iter())
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);
        let column_renderer = ColumnRenderer::guided(
            MAIN_INDENT,
            PADDING_WIDTH,
            left_column_width,
            self.total_width,
        );

        let mut lines = Vec::default();

        if summary.is_empty() {
            lines.push(format!("usage: {p}", p = specification.program));
        } else {
            lines.push(format!(
                "usage: {p} {s}",
                p = specification.program,
                s = summary.join(" ")
            ));
        }

        if let Some(about) = &specification.about {
            lines.push("".to_string());
            lines.extend(chunk(
                about,
                std::cmp::max(target_width(self.total_width), MINIMUM_MIDDLE_WIDTH),
            ));
        }

        for (title, rows) in [
            ("positional arguments:", argument_rows),
            ("options:", option_rows),
        ] {
            if rows.is_empty() {
                continue;
            }

            lines.push("".to_string());
            lines.push(title.to_string());

            for (left, middle) in rows {
                lines.extend(column_renderer.render(MAIN_INDENT, &left, &middle));
            }
        }

        lines.join("\n")
    }
}

fn metavar(name: &str) -> String {
    name.to_ascii_uppercase().replace('-', "_")
}

fn describe(help: Option<&str>, required: bool, default: Option<&Value>) -> String {
    let mut parts = Vec::default();

    if let Some(help) = help {
        parts.push(help.to_string());
    }

    if required {
        parts.push("(required)".to_string());
    }

    if let Some(default) = default {
        parts.push(format!("[default: {default}]"));
    }

    parts.join(" ")
}

/// The tokens of a failed parse, with a caret pointing at the offending token.
///
/// ### Example
/// ```
/// # use command_line_builder as command_line;
/// use command_line::{OptionSpec, Registry, ValueType};
///
/// let mut registry = Registry::new("program");
/// registry.register_option(OptionSpec::single("count", None, ValueType::Integer))?;
/// let parser = registry.freeze().parser();
///
/// let tokens = ["--count", "abc"];
/// let error = parser.parse(&tokens).unwrap_err();
/// assert_eq!(error.context(&tokens).to_string(), "--count abc\n        ^");
/// # Ok::<(), command_line::RegistryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    index: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new<S: AsRef<str>>(index: usize, tokens: &[S]) -> Self {
        Self {
            index,
            tokens: tokens.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Each token before the offending one is followed by a single space.
        let offset: usize = self
            .tokens
            .iter()
            .take(self.index)
            .map(|token| token.chars().count() + 1)
            .sum();

        write!(f, "{}\n{:offset$}^", self.tokens.join(" "), "")
    }
}
