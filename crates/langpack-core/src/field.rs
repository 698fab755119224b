use serde::{Deserialize, Serialize};

/// A scalar value carried by a [`Field`] override.
///
/// A closed union instead of a dynamic "any" type: every coercion the
/// engine performs is explicit here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value set. Skipped during text resolution; false in conditions.
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce to a boolean for condition evaluation.
    ///
    /// Numbers are true when positive. Text is true for "true", and for any
    /// string other than "false" and "0", case-insensitively.
    pub fn as_bool(&self) -> bool {
        match self {
            FieldValue::Absent => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n > 0.0,
            FieldValue::Text(s) => {
                s.eq_ignore_ascii_case("true")
                    || (!s.eq_ignore_ascii_case("false") && s != "0")
            }
        }
    }

    /// Render as substitution text. `Absent` renders nothing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Absent => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) if n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Absent,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => {
                FieldValue::Number(n.as_f64().unwrap_or_default())
            }
            serde_json::Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

/// A caller-supplied key/value substitution that outranks the catalog.
///
/// Matching is by exact key; field keys are not lowercased the way catalog
/// lookups are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    key: String,
    value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
    }

    /// Whether this field answers for the given key (exact match).
    pub fn is_key(&self, key: &str) -> bool {
        self.key == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_coercion() {
        assert!(!FieldValue::Absent.as_bool());
        assert!(FieldValue::Bool(true).as_bool());
        assert!(!FieldValue::Bool(false).as_bool());
        assert!(FieldValue::Number(1.0).as_bool());
        assert!(FieldValue::Number(0.5).as_bool());
        assert!(!FieldValue::Number(0.0).as_bool());
        assert!(!FieldValue::Number(-3.0).as_bool());
        assert!(FieldValue::Text("true".into()).as_bool());
        assert!(FieldValue::Text("TRUE".into()).as_bool());
        assert!(!FieldValue::Text("false".into()).as_bool());
        assert!(!FieldValue::Text("FALSE".into()).as_bool());
        assert!(!FieldValue::Text("0".into()).as_bool());
        // Any other string is truthy.
        assert!(FieldValue::Text("yes".into()).as_bool());
        assert!(FieldValue::Text("".into()).as_bool());
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(FieldValue::Absent.as_text(), None);
        assert_eq!(FieldValue::Bool(true).as_text().as_deref(), Some("true"));
        assert_eq!(FieldValue::Number(3.0).as_text().as_deref(), Some("3"));
        assert_eq!(FieldValue::Number(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(
            FieldValue::Text("hi".into()).as_text().as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(
            FieldValue::from(serde_json::json!(null)),
            FieldValue::Absent
        );
        assert_eq!(
            FieldValue::from(serde_json::json!(true)),
            FieldValue::Bool(true)
        );
        assert_eq!(
            FieldValue::from(serde_json::json!(7)),
            FieldValue::Number(7.0)
        );
        assert_eq!(
            FieldValue::from(serde_json::json!("hello")),
            FieldValue::Text("hello".into())
        );
    }

    #[test]
    fn test_field_exact_key_match() {
        let field = Field::new("Player", "Jab");
        assert!(field.is_key("Player"));
        assert!(!field.is_key("player"));
    }
}
