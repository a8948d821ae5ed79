//! Fixed-rate currency conversion for trip budgeting.
//!
//! Rates are expressed as the value of one unit in Indian rupees, so any pair
//! converts through INR: `rate = rate_in_inr(from) / rate_in_inr(to)`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Value of one unit of each supported currency, in INR.
const RATES_IN_INR: [(&str, f64); 7] = [
    ("USD", 83.5),
    ("EUR", 90.25),
    ("GBP", 105.8),
    ("JPY", 0.56),
    ("CAD", 61.45),
    ("AUD", 54.2),
    ("INR", 1.0),
];

/// Outcome of a single conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    /// `amount * rate`, rounded to two decimal places.
    pub converted_amount: f64,
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

/// Converts amounts between the supported currencies.
#[derive(Clone)]
pub struct CurrencyConverter {
    clock: Arc<dyn Clock>,
}

impl CurrencyConverter {
    /// Create a converter stamping results with `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use backend::domain::CurrencyConverter;
    /// use mockable::DefaultClock;
    ///
    /// let converter = CurrencyConverter::new(Arc::new(DefaultClock));
    /// let result = converter.convert("usd", "INR", 10.0).expect("supported pair");
    /// assert_eq!(result.converted_amount, 835.0);
    /// ```
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Upper-cased codes of every supported currency.
    pub fn supported_currencies() -> impl Iterator<Item = &'static str> {
        RATES_IN_INR.iter().map(|(code, _)| *code)
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Codes are matched case-insensitively. Unknown codes and negative or
    /// non-finite amounts are rejected with [`DomainError::invalid_request`].
    pub fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<CurrencyConversion, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::invalid_request(format!(
                "amount must be a non-negative number, got {amount}"
            )));
        }
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();
        let rate = rate_in_inr(&from)? / rate_in_inr(&to)?;

        Ok(CurrencyConversion {
            converted_amount: round_cents(amount * rate),
            from,
            to,
            amount,
            rate,
            timestamp: self.clock.utc(),
        })
    }
}

fn rate_in_inr(code: &str) -> Result<f64, DomainError> {
    RATES_IN_INR
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, rate)| *rate)
        .ok_or_else(|| DomainError::invalid_request(format!("unsupported currency: {code}")))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
