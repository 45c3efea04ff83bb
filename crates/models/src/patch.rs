use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ModelError;
use crate::price::Price;
use crate::record::OnSale;

/// Validated partial update of a record. Absent fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<OnSale>,
}

impl RecordPatch {
    pub fn price(price: Price) -> Self {
        Self { price: Some(price), on_sale: None }
    }

    pub fn on_sale(on_sale: OnSale) -> Self {
        Self { price: None, on_sale: Some(on_sale) }
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.on_sale.is_none()
    }

    /// Validate a raw request body.
    ///
    /// A key that is present is validated even when its value is `null`.
    /// Keys other than `price` and `on_sale` are ignored.
    pub fn from_json(body: &Value) -> Result<Self, ModelError> {
        let obj = body
            .as_object()
            .ok_or_else(|| ModelError::Validation("patch body must be a JSON object".into()))?;

        let on_sale = obj.get("on_sale").map(OnSale::from_json).transpose()?;
        let price = obj.get("price").map(Price::from_json).transpose()?;

        Ok(Self { price, on_sale })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_both_fields() {
        let patch = RecordPatch::from_json(&json!({"price": "70.5", "on_sale": "NO"})).unwrap();
        assert_eq!(patch.price.unwrap().to_string(), "70.5");
        assert_eq!(patch.on_sale, Some(OnSale::No));
    }

    #[test]
    fn empty_object_is_empty_patch() {
        let patch = RecordPatch::from_json(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn ignores_immutable_fields() {
        let patch = RecordPatch::from_json(&json!({"location": "Milano", "id": "X"})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            RecordPatch::from_json(&json!({"on_sale": "MAYBE"})).unwrap_err(),
            ModelError::Validation("invalid on_sale".into())
        );
        assert_eq!(
            RecordPatch::from_json(&json!({"price": "abc"})).unwrap_err(),
            ModelError::Validation("invalid price".into())
        );
        assert!(RecordPatch::from_json(&json!({"price": null})).is_err());
        assert!(RecordPatch::from_json(&json!({"price": -5})).is_err());
        assert!(RecordPatch::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn serializes_only_present_fields() -> Result<(), serde_json::Error> {
        let patch = RecordPatch::on_sale(OnSale::Yes);
        assert_eq!(serde_json::to_value(patch)?, json!({"on_sale": "SI"}));
        let patch = RecordPatch::price(Price::parse_str("12.30").unwrap());
        assert_eq!(serde_json::to_value(patch)?, json!({"price": 12.3}));
        Ok(())
    }
}
