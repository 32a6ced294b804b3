use crate::domain::model::{Decoded, Part};
use crate::domain::ports::PartCodec;
use crate::utils::error::{Result, ShopError};
use ::csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};

pub const CSV_HEADER: [&str; 3] = ["Name", "Price", "Quantity"];

/// Comma separated values with a `Name,Price,Quantity` header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

impl PartCodec for CsvCodec {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn decode(&self, data: &[u8]) -> Result<Decoded> {
        // 第一列一律視為標題列
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data);

        let mut parts = Vec::new();
        let mut skipped = 0;

        for row in reader.records() {
            let record = match row {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping unreadable CSV row: {}", e);
                    skipped += 1;
                    continue;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            if record.len() != 3 {
                tracing::warn!(
                    "Skipping CSV line {}: expected 3 fields, found {}",
                    line,
                    record.len()
                );
                skipped += 1;
                continue;
            }

            match Part::from_fields(&record[0], &record[1], &record[2]) {
                Some(part) => parts.push(part),
                None => {
                    tracing::warn!(
                        "Skipping CSV line {}: invalid price '{}' or quantity '{}'",
                        line,
                        &record[1],
                        &record[2]
                    );
                    skipped += 1;
                }
            }
        }

        Ok(Decoded::new(parts, skipped))
    }

    fn encode(&self, parts: &[Part]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;
        for part in parts {
            let price = part.price.to_string();
            let quantity = part.quantity.to_string();
            writer.write_record([part.name.as_str(), price.as_str(), quantity.as_str()])?;
        }

        writer
            .into_inner()
            .map_err(|e| ShopError::IoError(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_skips_header_and_trims() {
        let data = b"Name,Price,Quantity\n Mouse , 9.99 , 5\nKeyboard,29.5,2\n";
        let decoded = CsvCodec.decode(data).unwrap();

        assert_eq!(
            decoded.parts,
            vec![Part::new("Mouse", 9.99, 5), Part::new("Keyboard", 29.5, 2)]
        );
        assert_eq!(decoded.skipped, 0);
    }

    #[test]
    fn test_decode_skips_malformed_rows_only() {
        let data = b"Name,Price,Quantity\nMouse,9.99,5\nBroken,abc,1\nShort,1.0\nToo,1,2,3\nCable,2.5,10\n";
        let decoded = CsvCodec.decode(data).unwrap();

        assert_eq!(decoded.parts.len(), 2);
        assert_eq!(decoded.parts[1], Part::new("Cable", 2.5, 10));
        assert_eq!(decoded.skipped, 3);
    }

    #[test]
    fn test_quoted_name_with_comma() {
        let parts = vec![Part::new("Cable, USB-C", 4.25, 3)];
        let encoded = CsvCodec.encode(&parts).unwrap();
        let text = String::from_utf8(encoded.clone()).unwrap();

        assert_eq!(text, "Name,Price,Quantity\n\"Cable, USB-C\",4.25,3\n");
        assert_eq!(CsvCodec.decode(&encoded).unwrap().parts, parts);
    }

    #[test]
    fn test_empty_list_writes_header_only() {
        let encoded = CsvCodec.encode(&[]).unwrap();
        assert_eq!(String::from_utf8(encoded).unwrap(), "Name,Price,Quantity\n");
    }
}
