use crate::api::Entry;
use crate::model::{InvalidConversion, Value, ValueType};

/// How repeated values are kept in a `CaptureBuffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Retain {
    /// Keep the last value only.
    Last,
    /// Keep every value, in order.
    All,
}

/// The values captured for a single parameter while the tokens are being fed.
#[derive(Debug)]
pub(crate) struct CaptureBuffer {
    value_type: ValueType,
    retain: Retain,
    values: Vec<Value>,
    occurrences: usize,
}

impl CaptureBuffer {
    pub(crate) fn new(value_type: ValueType, retain: Retain) -> Self {
        Self {
            value_type,
            retain,
            values: Vec::default(),
            occurrences: 0,
        }
    }

    /// Record that the parameter appeared on the Cli.
    pub(crate) fn occur(&mut self) {
        self.occurrences += 1;
    }

    /// Convert the raw token and keep it.
    pub(crate) fn capture(&mut self, token: &str) -> Result<(), InvalidConversion> {
        let value = self.value_type.convert(token)?;
        self.push(value);
        Ok(())
    }

    pub(crate) fn push(&mut self, value: Value) {
        if self.retain == Retain::Last {
            self.values.clear();
        }

        self.values.push(value);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// Resolve the captured values into an `Entry`, falling back to `default` when nothing was captured.
    pub(crate) fn close(self, default: Option<&Value>) -> Entry {
        let CaptureBuffer {
            retain, mut values, ..
        } = self;

        match (retain, values.pop(), default) {
            (Retain::Last, Some(value), _) => Entry::Single(value),
            (Retain::Last, None, Some(default)) => Entry::Single(default.clone()),
            (Retain::All, Some(value), _) => {
                values.push(value);
                Entry::Multiple(values)
            }
            (Retain::All, None, Some(default)) => Entry::Multiple(vec![default.clone()]),
            (_, None, None) => Entry::Unset,
        }
    }
}

/// An option which has been matched, but is still waiting on its value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pending {
    pub option: usize,
    pub index: usize,
}

/// Split `name=value` at the first delimiter.
pub(crate) fn split_value_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once(crate::constant::VALUE_DELIMITER) {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    }
}
