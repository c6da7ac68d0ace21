//! Serde helpers for lenient request payloads and record ids
//!
//! 管理端表单提交的数据类型不严格 (布尔值可能是 `"on"` / `1`)，
//! 这里统一做类型强转。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce any JSON value into a bool using truthy rules
///
/// - `bool` → itself
/// - number → non-zero
/// - string → `"true" | "1" | "yes" | "on"` (case-insensitive)
/// - `null` / array / object → `false` / non-empty
pub fn truthy_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Deserialize an optional bool with truthy coercion
///
/// Use together with `#[serde(default)]`: absent field → `None`, present → `Some(coerced)`.
pub fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| Some(truthy_value(&v)))
}

/// Deserialize an optional string where `null` becomes `""`
///
/// Use together with `#[serde(default)]`: absent field → `None`.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }))
}

/// Record id rendered as `"table:key"`
///
/// 数据库返回原生 RecordId，API JSON 使用字符串；`db` feature 下两种格式都接受。
pub mod record_key {
    use super::*;

    #[cfg(feature = "db")]
    pub fn deserialize<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;
        use surrealdb::RecordId;

        struct FlexibleVisitor;

        impl<'de> Visitor<'de> for FlexibleVisitor {
            type Value = Option<String>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string 'table:id' or RecordId")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D2>(self, d: D2) -> Result<Self::Value, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                d.deserialize_any(FlexibleVisitor)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(value.to_string()))
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(|id| Some(id.to_string()))
            }
        }

        d.deserialize_any(FlexibleVisitor)
    }

    #[cfg(not(feature = "db"))]
    pub fn deserialize<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "truthy")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "string_or_empty")]
        text: Option<String>,
    }

    #[test]
    fn truthy_values() {
        assert!(truthy_value(&json!(true)));
        assert!(truthy_value(&json!(1)));
        assert!(truthy_value(&json!("on")));
        assert!(truthy_value(&json!(" YES ")));
        assert!(!truthy_value(&json!("false")));
        assert!(!truthy_value(&json!("")));
        assert!(!truthy_value(&json!(0)));
        assert!(!truthy_value(&json!(null)));
    }

    #[test]
    fn absent_fields_stay_none() {
        let form: Form = serde_json::from_value(json!({})).unwrap();
        assert_eq!(form.flag, None);
        assert_eq!(form.text, None);
    }

    #[test]
    fn present_fields_are_coerced() {
        let form: Form = serde_json::from_value(json!({"flag": "1", "text": null})).unwrap();
        assert_eq!(form.flag, Some(true));
        assert_eq!(form.text, Some(String::new()));

        let form: Form = serde_json::from_value(json!({"flag": 0, "text": 17})).unwrap();
        assert_eq!(form.flag, Some(false));
        assert_eq!(form.text, Some("17".to_string()));
    }
}
