//! Encoding helpers for list-valued columns.
//!
//! Action lists, media references, and acknowledged-index snapshots are
//! stored as JSON text. JSON (rather than a delimiter join) keeps action
//! text with embedded punctuation round-trippable and lets the summary views
//! use `json_array_length`.

use crate::error::Result;

impl super::Database {
    /// Encode a list of strings for storage.
    pub(crate) fn encode_string_list(items: &[String]) -> Result<String> {
        Ok(serde_json::to_string(items)?)
    }

    /// Decode a stored string list; `NULL` decodes to an empty list.
    pub(crate) fn decode_string_list(raw: Option<String>) -> Result<Vec<String>> {
        match raw {
            Some(raw) if !raw.is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Encode a list of acknowledged indices for storage.
    pub(crate) fn encode_index_list(indices: &[usize]) -> Result<String> {
        Ok(serde_json::to_string(indices)?)
    }

    /// Decode a stored index list.
    pub(crate) fn decode_index_list(raw: &str) -> Result<Vec<usize>> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Database;

    #[test]
    fn string_list_round_trips_with_commas_and_quotes() {
        let items = vec![
            "Stop using the product".to_string(),
            "Call 1-800-555-0100, option \"2\"".to_string(),
        ];
        let encoded = Database::encode_string_list(&items).unwrap();
        let decoded = Database::decode_string_list(Some(encoded)).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn missing_string_list_decodes_empty() {
        assert!(Database::decode_string_list(None).unwrap().is_empty());
    }

    #[test]
    fn index_list_round_trips() {
        let indices = vec![0, 2, 5];
        let encoded = Database::encode_index_list(&indices).unwrap();
        assert_eq!(Database::decode_index_list(&encoded).unwrap(), indices);
    }
}
