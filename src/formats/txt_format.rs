use crate::domain::model::{Decoded, Part};
use crate::domain::ports::PartCodec;
use crate::utils::error::{Result, ShopError};

const TXT_DELIMITER: char = '\t';

/// Tab separated text, one record per line, no header.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtCodec;

impl PartCodec for TxtCodec {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn decode(&self, data: &[u8]) -> Result<Decoded> {
        let text = std::str::from_utf8(data).map_err(|_| ShopError::EncodingError {
            path: "<txt input>".to_string(),
        })?;

        let mut parts = Vec::new();
        let mut skipped = 0;

        for (index, line) in text.lines().enumerate() {
            // Trailing empty fields are dropped, so "a\t1\t2\t" is still a record.
            let fields: Vec<&str> = line
                .trim_end_matches(TXT_DELIMITER)
                .split(TXT_DELIMITER)
                .collect();
            if fields.len() != 3 {
                tracing::warn!(
                    "Skipping text line {}: expected 3 tab separated fields, found {}",
                    index + 1,
                    fields.len()
                );
                skipped += 1;
                continue;
            }

            match Part::from_fields(fields[0], fields[1], fields[2]) {
                Some(part) => parts.push(part),
                None => {
                    tracing::warn!(
                        "Skipping text line {}: invalid price '{}' or quantity '{}'",
                        index + 1,
                        fields[1].trim(),
                        fields[2].trim()
                    );
                    skipped += 1;
                }
            }
        }

        Ok(Decoded::new(parts, skipped))
    }

    fn encode(&self, parts: &[Part]) -> Result<Vec<u8>> {
        let mut out = String::new();
        for part in parts {
            out.push_str(&sanitize_name(&part.name));
            out.push(TXT_DELIMITER);
            out.push_str(&part.price.to_string());
            out.push(TXT_DELIMITER);
            out.push_str(&part.quantity.to_string());
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}

// A tab or line break inside a name would split the record on reload.
fn sanitize_name(name: &str) -> String {
    if !name.contains(['\t', '\n', '\r']) {
        return name.to_string();
    }
    tracing::warn!("Replacing tab/line break characters in part name '{}'", name.escape_debug());
    name.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_example_content() {
        let decoded = TxtCodec
            .decode(b"Mouse\t9.99\t5\nKeyboard\t29.5\t2\n")
            .unwrap();

        assert_eq!(
            decoded.parts,
            vec![Part::new("Mouse", 9.99, 5), Part::new("Keyboard", 29.5, 2)]
        );
    }

    #[test]
    fn test_decode_counts_bad_lines() {
        let data = b"Mouse\t9.99\t5\nno tabs here\nMonitor\tcheap\t1\r\nHub\t12\t4\r\n\n";
        let decoded = TxtCodec.decode(data).unwrap();

        assert_eq!(
            decoded.parts,
            vec![Part::new("Mouse", 9.99, 5), Part::new("Hub", 12.0, 4)]
        );
        assert_eq!(decoded.skipped, 3);
    }

    #[test]
    fn test_decode_ignores_trailing_tabs() {
        let decoded = TxtCodec.decode(b"Mouse\t9.99\t5\t\nHub\t12\t\t\n").unwrap();

        assert_eq!(decoded.parts, vec![Part::new("Mouse", 9.99, 5)]);
        assert_eq!(decoded.skipped, 1);
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(matches!(
            TxtCodec.decode(&[0xff, 0xfe, b'\t']),
            Err(ShopError::EncodingError { .. })
        ));
    }

    #[test]
    fn test_encode_is_empty_for_empty_list() {
        assert!(TxtCodec.encode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_encode_sanitizes_tabs_in_name() {
        let encoded = TxtCodec.encode(&[Part::new("Fan\t120mm", 8.0, 1)]).unwrap();
        assert_eq!(String::from_utf8(encoded).unwrap(), "Fan 120mm\t8\t1\n");
    }
}
