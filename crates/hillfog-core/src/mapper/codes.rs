//! Enumerated legacy codes <-> readable labels
//!
//! Each table is bidirectional. Lookups are case-insensitive and an unknown
//! value passes through unchanged in both directions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Fixed bidirectional code/label table
#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl CodeTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Label for a code, if the code is known.
    pub fn label_of(&self, code: &str) -> Option<&'static str> {
        let code = code.trim();
        self.entries
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(_, label)| *label)
    }

    /// Code for a label, if the label is known.
    pub fn code_of(&self, label: &str) -> Option<&'static str> {
        let label = label.trim();
        self.entries
            .iter()
            .find(|(_, l)| l.eq_ignore_ascii_case(label))
            .map(|(code, _)| *code)
    }

    /// Decode a code into its label; unknown codes pass through.
    pub fn decode(&self, code: &str) -> String {
        self.label_of(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    /// Encode a label into its code; unknown labels pass through.
    pub fn encode(&self, label: &str) -> String {
        self.code_of(label)
            .map(str::to_string)
            .unwrap_or_else(|| label.to_string())
    }

    /// Decode a wire value. Only strings are looked up.
    pub fn decode_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.decode(s)),
            other => other.clone(),
        }
    }

    /// Encode a canonical value. Only strings are looked up.
    pub fn encode_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.encode(s)),
            other => other.clone(),
        }
    }
}

pub const FREQUENCY: CodeTable = CodeTable::new(
    "frequency",
    &[
        ("D", "Daily"),
        ("W", "Weekly"),
        ("M", "Monthly"),
        ("Q", "Quarterly"),
        ("H", "Half-yearly"),
        ("Y", "Yearly"),
    ],
);

/// KPI management direction
pub const MANAGEMENT: CodeTable = CodeTable::new(
    "management",
    &[
        ("1", "Higher is better"),
        ("2", "Lower is better"),
        ("3", "Closer to target is better"),
    ],
);

/// KPI comparison operator
pub const COMPARE_TYPE: CodeTable = CodeTable::new(
    "compareType",
    &[
        ("1", "Greater than or equal"),
        ("2", "Less than or equal"),
        ("3", "Equal"),
        ("4", "Between"),
    ],
);

/// KPI value type
pub const DATA_TYPE: CodeTable = CodeTable::new(
    "dataType",
    &[("1", "Number"), ("2", "Percentage"), ("3", "Currency")],
);

/// Measurement frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::HalfYearly,
        Frequency::Yearly,
    ];

    /// Single-letter wire code
    pub fn code(self) -> &'static str {
        match self {
            Frequency::Daily => "D",
            Frequency::Weekly => "W",
            Frequency::Monthly => "M",
            Frequency::Quarterly => "Q",
            Frequency::HalfYearly => "H",
            Frequency::Yearly => "Y",
        }
    }

    pub fn label(self) -> &'static str {
        FREQUENCY.label_of(self.code()).unwrap_or("")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    /// Accepts either the wire code (`M`) or the label (`monthly`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = FREQUENCY
            .label_of(s)
            .and(Some(s.trim()))
            .or_else(|| FREQUENCY.code_of(s))
            .ok_or_else(|| CoreError::InvalidValue(format!("unknown frequency: {}", s)))?;

        Frequency::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CoreError::InvalidValue(format!("unknown frequency: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frequency_decode() {
        assert_eq!(FREQUENCY.decode("M"), "Monthly");
        assert_eq!(FREQUENCY.decode("h"), "Half-yearly");
        assert_eq!(FREQUENCY.decode("X"), "X");
        assert_eq!(FREQUENCY.decode(""), "");
    }

    #[test]
    fn test_frequency_encode() {
        assert_eq!(FREQUENCY.encode("monthly"), "M");
        assert_eq!(FREQUENCY.encode("Half-Yearly"), "H");
        assert_eq!(FREQUENCY.encode("Biweekly"), "Biweekly");
    }

    #[test]
    fn test_management_and_compare_tables() {
        assert_eq!(MANAGEMENT.decode("2"), "Lower is better");
        assert_eq!(MANAGEMENT.encode("Lower is better"), "2");
        assert_eq!(COMPARE_TYPE.decode("4"), "Between");
        assert_eq!(COMPARE_TYPE.decode("9"), "9");
        assert_eq!(DATA_TYPE.decode("2"), "Percentage");
        assert_eq!(DATA_TYPE.encode("currency"), "3");
    }

    #[test]
    fn test_decode_value_non_string_passthrough() {
        assert_eq!(MANAGEMENT.decode_value(&json!(1)), json!(1));
        assert_eq!(MANAGEMENT.decode_value(&json!("1")), json!("Higher is better"));
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("M".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("quarterly".parse::<Frequency>().unwrap(), Frequency::Quarterly);
        assert_eq!("half-yearly".parse::<Frequency>().unwrap(), Frequency::HalfYearly);
        assert!("fortnightly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_frequency_code_and_label() {
        assert_eq!(Frequency::Yearly.code(), "Y");
        assert_eq!(Frequency::Yearly.label(), "Yearly");
        assert_eq!(Frequency::Weekly.to_string(), "Weekly");
    }
}
