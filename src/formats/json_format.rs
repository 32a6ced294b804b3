use crate::domain::model::{Decoded, Part};
use crate::domain::ports::PartCodec;
use crate::utils::error::Result;
use serde::Deserialize;

/// Pretty-printed JSON array of `{name, price, quantity}` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

// Wide numeric types so out-of-range values reject one record instead of
// failing the document.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    name: String,
    price: f64,
    quantity: i64,
}

impl PartCodec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    /// A malformed document fails as a whole; there is no partial result.
    /// Well-formed records with a negative price or quantity are skipped.
    fn decode(&self, data: &[u8]) -> Result<Decoded> {
        let records: Vec<JsonRecord> = serde_json::from_slice(data)?;
        let total = records.len();

        let mut parts = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            match u32::try_from(record.quantity) {
                Ok(quantity) if record.price.is_finite() && record.price >= 0.0 => {
                    parts.push(Part::new(record.name, record.price, quantity))
                }
                _ => tracing::warn!(
                    "Skipping JSON record {} '{}': invalid price {} or quantity {}",
                    index + 1,
                    record.name,
                    record.price,
                    record.quantity
                ),
            }
        }

        let skipped = total - parts.len();
        Ok(Decoded::new(parts, skipped))
    }

    fn encode(&self, parts: &[Part]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(parts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ShopError;

    #[test]
    fn test_encode_uses_lowercase_keys_in_order() {
        let encoded = JsonCodec
            .encode(&[Part::new("Mouse", 9.99, 5), Part::new("SSD", 80.0, 1)])
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();

        assert_eq!(value[0]["name"], "Mouse");
        assert_eq!(value[0]["price"], 9.99);
        assert_eq!(value[0]["quantity"], 5);
        assert_eq!(value[1]["name"], "SSD");
        assert!(String::from_utf8(encoded).unwrap().contains('\n'));
    }

    #[test]
    fn test_empty_list_is_empty_array() {
        assert_eq!(JsonCodec.encode(&[]).unwrap(), b"[]");
    }

    #[test]
    fn test_malformed_document_fails_whole_load() {
        let data = br#"[{"name": "Mouse", "price": 9.99, "quantity": 5}, {"name": "Bad""#;
        assert!(matches!(JsonCodec.decode(data), Err(ShopError::JsonError(_))));
    }

    #[test]
    fn test_negative_price_is_skipped() {
        let data = br#"[{"name": "Mouse", "price": -1.0, "quantity": 5}, {"name": "Pad", "price": 3, "quantity": 2}]"#;
        let decoded = JsonCodec.decode(data).unwrap();

        assert_eq!(decoded.parts, vec![Part::new("Pad", 3.0, 2)]);
        assert_eq!(decoded.skipped, 1);
    }

    #[test]
    fn test_negative_quantity_is_skipped_like_price() {
        let data = br#"[
            {"name": "Mouse", "price": 9.99, "quantity": -5},
            {"name": "Hub", "price": 12, "quantity": 99999999999},
            {"name": "Pad", "price": 3, "quantity": 2}
        ]"#;
        let decoded = JsonCodec.decode(data).unwrap();

        assert_eq!(decoded.parts, vec![Part::new("Pad", 3.0, 2)]);
        assert_eq!(decoded.skipped, 2);
    }

    #[test]
    fn test_fractional_quantity_fails_whole_load() {
        let data = br#"[{"name": "Mouse", "price": 9.99, "quantity": 2.5}]"#;
        assert!(matches!(JsonCodec.decode(data), Err(ShopError::JsonError(_))));
    }
}
