use std::str::FromStr;

use fractic_server_error::ServerError;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidAmount;

/// Monetary amount as stored by either backend: a JSON number, or a string
/// such as `"1,234.50"` (remote numeric columns, CSV cells). Parenthesised
/// values are negative, as in accounting notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AmountModel(pub f64);

impl FromStr for AmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.replace(",", "");
        let is_negative = raw.trim().starts_with("(") && raw.trim().ends_with(")");
        let numeric_part = raw.trim().trim_matches(|c| c == '(' || c == ')').trim();
        let amount = numeric_part
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| InvalidAmount::new(s))?;
        Ok(AmountModel(if is_negative { -amount } else { amount }))
    }
}

impl<'de> Deserialize<'de> for AmountModel {
    fn deserialize<D>(deserializer: D) -> Result<AmountModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde_derive::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(AmountModel(n)),
            Raw::Text(s) => AmountModel::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for AmountModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl From<AmountModel> for f64 {
    fn from(model: AmountModel) -> Self {
        model.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_accounting_notation() {
        assert_eq!(AmountModel::from_str("1,234.50").unwrap().0, 1234.5);
        assert_eq!(AmountModel::from_str("(52.99)").unwrap().0, -52.99);
        assert_eq!(AmountModel::from_str(" 800 ").unwrap().0, 800.0);
        assert!(AmountModel::from_str("twelve").is_err());
        assert!(AmountModel::from_str("inf").is_err());
    }

    #[test]
    fn deserializes_numbers_and_numeric_strings() {
        let amounts: Vec<AmountModel> = serde_json::from_str(r#"[3500, 24.5, "1200.00"]"#).unwrap();
        assert_eq!(
            amounts.into_iter().map(f64::from).collect::<Vec<_>>(),
            vec![3500.0, 24.5, 1200.0]
        );
    }
}
