use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::ModelError;

/// Number of fractional digits a stored price keeps.
pub const PRICE_SCALE: u32 = 2;

/// Non-negative amount rounded to two decimals, at most [`Price::MAX`].
///
/// JSON numbers are read through their shortest decimal text, so `70.005`
/// is the exact decimal `70.005` and rounds half away from zero to `70.01`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Largest storable price. JSON numbers are written as `f64`, which keeps
    /// every cent exact well past this bound.
    pub const MAX: Price = Price(Decimal::from_parts(3_567_587_328, 232, 0, false, 0));

    /// Round `value` to two decimals; negative values and values above
    /// [`Price::MAX`] are rejected.
    pub fn new(value: Decimal) -> Result<Self, ModelError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ModelError::Validation("price must not be negative".into()));
        }
        let rounded = round_price(value);
        if rounded > Self::MAX.0 {
            return Err(ModelError::Validation("price out of range".into()));
        }
        if rounded.is_zero() {
            return Ok(Self::ZERO);
        }
        Ok(Self(rounded))
    }

    /// Parse decimal text such as `70`, ` 70.5 `, `1e3`.
    pub fn parse_str(input: &str) -> Result<Self, ModelError> {
        Self::new(parse_decimal(input)?)
    }

    /// Accept a JSON number or a numeric string; anything else is invalid.
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        match value {
            Value::Number(n) => Self::parse_str(&n.to_string()),
            Value::String(s) => Self::parse_str(s),
            _ => Err(ModelError::invalid("price")),
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

/// Half-away-from-zero rounding to [`PRICE_SCALE`] digits.
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse trimmed decimal text, falling back to scientific notation.
pub fn parse_decimal(input: &str) -> Result<Decimal, ModelError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ModelError::invalid("price"));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ModelError::invalid("price"))
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0.normalize();
        if value.scale() == 0 {
            if let Some(whole) = value.to_u64() {
                return serializer.serialize_u64(whole);
            }
        }
        // nearest f64 to the decimal text, so the written number reads back unchanged
        match value.to_string().parse::<f64>() {
            Ok(f) if f.is_finite() => serializer.serialize_f64(f),
            _ => Err(serde::ser::Error::custom("price out of range")),
        }
    }
}

/// Same rules as [`Price::from_json`], so hand-edited rows such as
/// `"price": "70"` still read.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Price::from_json(&value).map_err(de::Error::custom)
    }
}
