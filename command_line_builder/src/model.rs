use thiserror::Error;

/// The number of command line values an option takes per occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No value token; presence means `true`.
    Flag,
    /// Precisely one value; a repeated option keeps the last value.
    Single,
    /// One value per occurrence; repeated occurrences accumulate.
    Multi,
}

impl Arity {
    pub(crate) fn takes_value(&self) -> bool {
        !matches!(self, Arity::Flag)
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The declared type of a parameter's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Any text, taken verbatim.
    String,
    /// A signed 64 bit integer.
    Integer,
    /// A 64 bit floating point number.
    Float,
    /// `true`/`false` (also accepting `1`/`0`, `yes`/`no`, `on`/`off`).
    Boolean,
}

/// A token could not be converted to the declared `ValueType`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{token}' cannot convert to {value_type}.")]
pub struct InvalidConversion {
    pub(crate) token: String,
    pub(crate) value_type: ValueType,
}

impl InvalidConversion {
    /// The token which failed to convert.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The type the token was meant to convert to.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl ValueType {
    /// Convert a raw command line token into a typed `Value`.
    ///
    /// ### Example
    /// ```
    /// # use command_line_builder as command_line;
    /// use command_line::{Value, ValueType};
    ///
    /// assert_eq!(ValueType::Integer.convert("-12").unwrap(), Value::Integer(-12));
    /// assert!(ValueType::Integer.convert("abc").is_err());
    /// ```
    pub fn convert(&self, token: &str) -> Result<Value, InvalidConversion> {
        match self {
            ValueType::String => Ok(Value::String(token.to_string())),
            ValueType::Integer => convert_integer(token).map(Value::Integer),
            ValueType::Float => convert_float(token).map(Value::Float),
            ValueType::Boolean => convert_boolean(token).map(Value::Boolean),
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
        };
        write!(f, "{name}")
    }
}

fn convert_integer(token: &str) -> Result<i64, InvalidConversion> {
    token.parse::<i64>().map_err(|_| InvalidConversion {
        token: token.to_string(),
        value_type: ValueType::Integer,
    })
}

fn convert_float(token: &str) -> Result<f64, InvalidConversion> {
    token.parse::<f64>().map_err(|_| InvalidConversion {
        token: token.to_string(),
        value_type: ValueType::Float,
    })
}

fn convert_boolean(token: &str) -> Result<bool, InvalidConversion> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(InvalidConversion {
            token: token.to_string(),
            value_type: ValueType::Boolean,
        }),
    }
}

/// A typed command line value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A `ValueType::String` value.
    String(String),
    /// A `ValueType::Integer` value.
    Integer(i64),
    /// A `ValueType::Float` value.
    Float(f64),
    /// A `ValueType::Boolean` value.
    Boolean(bool),
}

impl Value {
    /// The `ValueType` this value belongs to.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    /// The text of a `Value::String`, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The number of a `Value::Integer`, otherwise `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The number of a `Value::Float`, otherwise `None`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The truth of a `Value::Boolean`, otherwise `None`.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ValueType::String, "abc", Value::String("abc".to_string()))]
    #[case(ValueType::String, "", Value::String("".to_string()))]
    #[case(ValueType::Integer, "1", Value::Integer(1))]
    #[case(ValueType::Integer, "01", Value::Integer(1))]
    #[case(ValueType::Integer, "-7", Value::Integer(-7))]
    #[case(ValueType::Float, "1.5", Value::Float(1.5))]
    #[case(ValueType::Float, "-2", Value::Float(-2.0))]
    #[case(ValueType::Boolean, "true", Value::Boolean(true))]
    #[case(ValueType::Boolean, "TRUE", Value::Boolean(true))]
    #[case(ValueType::Boolean, "1", Value::Boolean(true))]
    #[case(ValueType::Boolean, "yes", Value::Boolean(true))]
    #[case(ValueType::Boolean, "off", Value::Boolean(false))]
    #[case(ValueType::Boolean, "0", Value::Boolean(false))]
    fn convert(#[case] value_type: ValueType, #[case] token: &str, #[case] expected: Value) {
        let value = value_type.convert(token).unwrap();
        assert_eq!(value, expected);
        assert_eq!(value.value_type(), value_type);
    }

    #[rstest]
    #[case(ValueType::Integer, "abc")]
    #[case(ValueType::Integer, "1.5")]
    #[case(ValueType::Integer, "")]
    #[case(ValueType::Integer, "99999999999999999999")]
    #[case(ValueType::Float, "abc")]
    #[case(ValueType::Float, "1.5.5")]
    #[case(ValueType::Boolean, "maybe")]
    #[case(ValueType::Boolean, "")]
    fn convert_invalid(#[case] value_type: ValueType, #[case] token: &str) {
        let error = value_type.convert(token).unwrap_err();
        assert_eq!(
            error,
            InvalidConversion {
                token: token.to_string(),
                value_type,
            }
        );
        assert_eq!(
            error.to_string(),
            format!("'{token}' cannot convert to {value_type}.")
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from("abc").as_integer(), None);
        assert_eq!(Value::from(3i64).as_integer(), Some(3));
        assert_eq!(Value::from(1.5f64).as_float(), Some(1.5));
        assert_eq!(Value::from(true).as_boolean(), Some(true));
        assert_eq!(Value::from(true).as_str(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(3i64).to_string(), "3");
        assert_eq!(Value::from(1.5f64).to_string(), "1.5");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(ValueType::Float.to_string(), "float");
        assert_eq!(Arity::Multi.to_string(), "Multi");
    }
}
