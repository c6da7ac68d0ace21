//! Company Name Directory Model
//!
//! 公司名录：用于报名码自动填充，以及区分已报名 / 未报名公司

use serde::{Deserialize, Serialize};

use crate::serde_helpers;

/// Company name entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyName {
    #[serde(
        default,
        deserialize_with = "serde_helpers::record_key::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    /// 报名码 (唯一，不区分大小写)
    pub code: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Create company name payload (also one import row)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyNameCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub mobile_number: String,
}

/// Update company name payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyNameUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

/// Bulk import payload (rows already parsed from the spreadsheet)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyNameImport {
    pub rows: Vec<CompanyNameCreate>,
    /// true = 先清空名录再导入
    #[serde(default)]
    pub replace: bool,
}

/// Bulk import result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Normalised registration code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_case_insensitive() {
        assert_eq!(normalize_code(" ab-12 "), "AB-12");
        assert_eq!(normalize_code("AB-12"), normalize_code("ab-12"));
    }

    #[test]
    fn import_replace_defaults_to_false() {
        let import: CompanyNameImport =
            serde_json::from_str(r#"{"rows":[{"name":"Acme","code":"A1"}]}"#).unwrap();
        assert!(!import.replace);
        assert_eq!(import.rows[0].contact_name, "");
    }
}
