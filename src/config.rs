use std::fs;

use fractic_server_error::ServerError;
use iso_currency::Currency;

use crate::errors::{InvalidIsoCurrencyCode, InvalidRon, ReadError};

/// How much of an order's cost counts as earned income. Every report derived
/// from one `BooksConfig` uses the same rule, so dashboard totals,
/// profit/loss and client rankings always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_derive::Deserialize)]
pub enum RevenueRecognition {
    /// Paid orders count in full, partial orders count for half of their
    /// cost, unpaid orders count for nothing.
    #[default]
    HalfOfCost,
    /// Paid orders count in full, partial orders count for their recorded
    /// `amount_paid` (half of cost if it was never recorded), unpaid orders
    /// count for nothing.
    AmountPaid,
}

/// What happens to a client's orders when the client is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_derive::Deserialize)]
pub enum ClientDeletionPolicy {
    #[default]
    CascadeOrders,
    /// Orders survive and are shown against "Unknown Client".
    KeepOrders,
}

#[derive(Debug, Clone, PartialEq, serde_derive::Deserialize)]
#[serde(default)]
pub struct BooksConfig {
    pub revenue_recognition: RevenueRecognition,
    pub client_deletion: ClientDeletionPolicy,
    /// ISO 4217 code used when printing reports.
    pub currency: String,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            revenue_recognition: RevenueRecognition::default(),
            client_deletion: ClientDeletionPolicy::default(),
            currency: "USD".to_string(),
        }
    }
}

impl BooksConfig {
    /// Parses a RON document such as
    /// `(revenue_recognition: AmountPaid, currency: "EUR")`. Omitted fields
    /// take their defaults.
    pub fn from_ron_str(s: &str) -> Result<Self, ServerError> {
        let config: BooksConfig =
            ron::from_str(s).map_err(|e| InvalidRon::with_debug("BooksConfig", &e))?;
        config.currency()?;
        Ok(config)
    }

    pub fn from_file<P>(path: P) -> Result<Self, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        Self::from_ron_str(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }

    pub fn currency(&self) -> Result<Currency, ServerError> {
        Currency::from_code(self.currency.trim())
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&self.currency))
    }
}
