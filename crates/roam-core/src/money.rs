//! # Money Types
//!
//! Prices are stored in the smallest currency unit (cents / santim) to
//! avoid floating-point drift in persisted records. The gateway wire
//! format wants decimal strings, so conversion helpers go both ways.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Ethiopian birr — the gateway's home currency
    ETB,
    USD,
    EUR,
    GBP,
    KES,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::ETB => "ETB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::KES => "KES",
        }
    }

    /// Convert a decimal amount to the smallest currency unit
    pub fn to_minor_units(&self, amount: f64) -> i64 {
        (amount * 100.0).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_minor_units(&self, amount: i64) -> f64 {
        amount as f64 / 100.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::ETB
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (santim for ETB)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_minor_units(amount),
            currency,
        }
    }

    /// Create a price from smallest units
    pub fn from_minor_units(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        self.currency.from_minor_units(self.amount)
    }

    /// Decimal string for gateway payloads (e.g. "250.00")
    pub fn to_wire(&self) -> String {
        format!("{:.2}", self.as_decimal())
    }

    /// Format for display (e.g. "250.00 ETB")
    pub fn display(&self) -> String {
        format!("{:.2} {}", self.as_decimal(), self.currency)
    }
}
