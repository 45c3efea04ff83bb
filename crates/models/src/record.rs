use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ModelError;
use crate::patch::RecordPatch;
use crate::price::Price;

/// Availability flag, stored as `"SI"` / `"NO"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnSale {
    #[serde(rename = "SI")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

impl OnSale {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnSale::Yes => "SI",
            OnSale::No => "NO",
        }
    }

    /// Only the exact strings `"SI"` and `"NO"` are accepted.
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        value
            .as_str()
            .ok_or_else(|| ModelError::invalid("on_sale"))?
            .parse()
    }

    pub fn toggled(self) -> Self {
        match self {
            OnSale::Yes => OnSale::No,
            OnSale::No => OnSale::Yes,
        }
    }
}

impl fmt::Display for OnSale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnSale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SI" => Ok(OnSale::Yes),
            "NO" => Ok(OnSale::No),
            _ => Err(ModelError::invalid("on_sale")),
        }
    }
}

/// One priced service entry.
///
/// Only `price` and `on_sale` change after seeding; see [`Record::apply`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub on_sale: OnSale,
    pub price: Price,
    pub location: String,
    pub provider: String,
    pub service_name: String,
    pub company_code: String,
    pub company_service_name: String,
}

impl Record {
    /// Shallow-merge the fields present in `patch`.
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(on_sale) = patch.on_sale {
            self.on_sale = on_sale;
        }
    }

    /// Copy of `self` with `patch` applied.
    pub fn patched(&self, patch: &RecordPatch) -> Record {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Record {
        Record {
            id: "W-001".into(),
            on_sale: OnSale::Yes,
            price: Price::parse_str("70").unwrap(),
            location: "Roma Eur".into(),
            provider: "Dr. Bianchi".into(),
            service_name: "Visita cardiologica".into(),
            company_code: "CARD01".into(),
            company_service_name: "Cardiologia - prima visita".into(),
        }
    }

    #[test]
    fn on_sale_accepts_exact_values_only() {
        assert_eq!(OnSale::from_json(&json!("SI")).unwrap(), OnSale::Yes);
        assert_eq!(OnSale::from_json(&json!("NO")).unwrap(), OnSale::No);
        for bad in [json!("si"), json!("yes"), json!(" NO"), json!(true), json!(null), json!(1)] {
            assert!(OnSale::from_json(&bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn record_round_trips_store_layout() -> Result<(), serde_json::Error> {
        let raw = json!({
            "id": "W-001",
            "on_sale": "SI",
            "price": 70,
            "location": "Roma Eur",
            "provider": "Dr. Bianchi",
            "service_name": "Visita cardiologica",
            "company_code": "CARD01",
            "company_service_name": "Cardiologia - prima visita"
        });
        let rec: Record = serde_json::from_value(raw.clone())?;
        assert_eq!(rec, sample());
        assert_eq!(serde_json::to_value(&rec)?, raw);
        Ok(())
    }

    #[test]
    fn apply_only_touches_patched_fields() {
        let before = sample();
        let patch = RecordPatch { price: Some(Price::parse_str("80.5").unwrap()), on_sale: None };
        let after = before.patched(&patch);
        assert_eq!(after.price.to_string(), "80.5");
        assert_eq!(after.on_sale, before.on_sale);
        assert_eq!(after.location, before.location);
        assert_eq!(after.company_service_name, before.company_service_name);

        let after = before.patched(&RecordPatch { price: None, on_sale: Some(OnSale::No) });
        assert_eq!(after.on_sale, OnSale::No);
        assert_eq!(after.price, before.price);
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(OnSale::Yes.toggled(), OnSale::No);
        assert_eq!(OnSale::No.toggled(), OnSale::Yes);
    }
}
