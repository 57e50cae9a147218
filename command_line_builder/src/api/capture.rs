use std::collections::HashMap;

use crate::model::Value;

/// The resolution of a single declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A single value (flags, single-value options, non-variadic positionals).
    Single(Value),
    /// All values, in Cli order (multi-value options, variadic positionals).
    Multiple(Vec<Value>),
    /// Not given on the Cli, and no default was declared.
    Unset,
}

/// The values parsed from one invocation, keyed by parameter identifier.
///
/// Every declared option (by long name) and positional (by name) is present.
/// The result is owned by the caller and has no tie to the registry it was parsed against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseResult {
    order: Vec<String>,
    entries: HashMap<String, (Entry, usize)>,
}

impl ParseResult {
    pub(crate) fn insert(&mut self, name: impl Into<String>, entry: Entry, occurrences: usize) {
        let name = name.into();
        if self
            .entries
            .insert(name.clone(), (entry, occurrences))
            .is_some()
        {
            unreachable!("internal error - parameter names are unique");
        }
        self.order.push(name);
    }

    /// The resolution of the named parameter, or `None` if it was never declared.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name).map(|(entry, _)| entry)
    }

    /// The (first) value of the named parameter.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.get(name)? {
            Entry::Single(value) => Some(value),
            Entry::Multiple(values) => values.first(),
            Entry::Unset => None,
        }
    }

    /// All values of the named parameter; empty when unset or undeclared.
    pub fn values(&self, name: &str) -> &[Value] {
        match self.get(name) {
            Some(Entry::Single(value)) => std::slice::from_ref(value),
            Some(Entry::Multiple(values)) => values.as_slice(),
            Some(Entry::Unset) | None => &[],
        }
    }

    /// The value of a `ValueType::String` parameter.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_str)
    }

    /// The value of a `ValueType::Integer` parameter.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(Value::as_integer)
    }

    /// The value of a `ValueType::Float` parameter.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_float)
    }

    /// The value of a `ValueType::Boolean` parameter (including flags).
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(Value::as_boolean)
    }

    /// Whether the named parameter resolved to a value (from the Cli or its default).
    pub fn is_set(&self, name: &str) -> bool {
        !matches!(self.get(name), Some(Entry::Unset) | None)
    }

    /// How many times the named parameter was given on the Cli.
    ///
    /// This is `0` for a parameter resolved from its default.
    /// Repeated flags count each occurrence (ex: `-vvv` counts `3`).
    pub fn count(&self, name: &str) -> usize {
        self.entries
            .get(name)
            .map(|(_, occurrences)| *occurrences)
            .unwrap_or(0)
    }

    /// The declared parameters and their resolutions, options first, each in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.order.iter().map(|name| {
            let (entry, _) = self
                .entries
                .get(name)
                .expect("internal error - order and entries must align");
            (name.as_str(), entry)
        })
    }
}
