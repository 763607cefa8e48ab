//! Money type for variation prices.
//!
//! Uses cents-based integer representation. The storefront backend sends
//! prices as plain decimals (`49.99` or `"49.99"`), so deserialization
//! accepts those as well as the structured `{ amount_cents, currency }` form.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    INR,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::INR => "INR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::INR => "\u{20b9}",
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "INR" => Some(Currency::INR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use lumen_catalog::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Wire forms a price may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Decimal(f64),
    Text(String),
    Structured {
        amount_cents: i64,
        #[serde(default)]
        currency: Currency,
    },
}

impl PriceRepr {
    fn into_money(self) -> Option<Money> {
        match self {
            PriceRepr::Decimal(amount) if amount.is_finite() => {
                Some(Money::from_decimal(amount, Currency::default()))
            }
            PriceRepr::Decimal(_) => None,
            PriceRepr::Text(text) => {
                let cleaned = text.trim().trim_start_matches('$').replace(',', "");
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|amount| amount.is_finite())
                    .map(|amount| Money::from_decimal(amount, Currency::default()))
            }
            PriceRepr::Structured {
                amount_cents,
                currency,
            } => Some(Money::new(amount_cents, currency)),
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        PriceRepr::deserialize(deserializer)?
            .into_money()
            .ok_or_else(|| serde::de::Error::custom("unparseable price"))
    }
}

/// Deserialize an optional price, treating anything unparseable as absent.
pub(crate) fn lenient_price<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Money>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value::<PriceRepr>(value)
        .ok()
        .and_then(PriceRepr::into_money))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");
        assert_eq!(Money::new(1250, Currency::GBP).to_string(), "\u{00a3}12.50");
    }

    #[test]
    fn test_deserialize_price_forms() {
        let m: Money = serde_json::from_str("19.5").unwrap();
        assert_eq!(m.amount_cents, 1950);

        let m: Money = serde_json::from_str("\"$1,200.00\"").unwrap();
        assert_eq!(m.amount_cents, 120000);

        let m: Money = serde_json::from_str(r#"{"amount_cents": 700, "currency": "EUR"}"#).unwrap();
        assert_eq!(m, Money::new(700, Currency::EUR));

        assert!(serde_json::from_str::<Money>("\"call us\"").is_err());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
