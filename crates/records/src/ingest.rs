//! Loose JSON to typed records.
//!
//! Every corpus is a JSON array. Elements are decoded one at a time so a single
//! malformed entry is rejected (and reported) without losing the rest of the
//! corpus. Survivors keep their corpus order.

use crate::error::{RecordsError, Result};
use crate::types::{Asset, AttestationRecord, AttestationType, Recipe};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A record type that can be ingested from a corpus array
pub trait CorpusRecord: DeserializeOwned + Sized {
    /// Corpus name used in reports and errors
    const CORPUS: &'static str;

    /// Normalize optional fields and check required ones
    fn normalize(self) -> std::result::Result<Self, String>;
}

/// Outcome of ingesting one corpus
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    pub corpus: String,
    pub accepted: usize,
    #[serde(skip)]
    pub rejected: Vec<RecordsError>,
}

impl IngestReport {
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parse a corpus from raw JSON text
pub fn ingest_str<T: CorpusRecord>(raw: &str) -> Result<(Vec<T>, IngestReport)> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| RecordsError::corpus_unavailable(T::CORPUS, e.to_string()))?;
    ingest_value(value)
}

/// Decode a parsed corpus, rejecting malformed elements
pub fn ingest_value<T: CorpusRecord>(value: Value) -> Result<(Vec<T>, IngestReport)> {
    let Value::Array(elements) = value else {
        return Err(RecordsError::corpus_unavailable(
            T::CORPUS,
            "expected a JSON array at the top level",
        ));
    };

    let mut report = IngestReport {
        corpus: T::CORPUS.to_string(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(elements.len());

    for (position, element) in elements.into_iter().enumerate() {
        let decoded = serde_json::from_value::<T>(element)
            .map_err(|e| e.to_string())
            .and_then(CorpusRecord::normalize);
        match decoded {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::warn!("Rejecting {} entry #{position}: {reason}", T::CORPUS);
                report
                    .rejected
                    .push(RecordsError::invalid_record(T::CORPUS, position, reason));
            }
        }
    }

    report.accepted = records.len();
    Ok((records, report))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(field: &str, value: String) -> std::result::Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("missing required field `{field}`"));
    }
    Ok(trimmed.to_string())
}

impl CorpusRecord for Asset {
    const CORPUS: &'static str = "assets";

    fn normalize(self) -> std::result::Result<Self, String> {
        Ok(Self {
            name: required("name", self.name)?,
            ticker: non_empty(self.ticker),
            issuer: non_empty(self.issuer),
            asset_image: non_empty(self.asset_image),
            blockchain_logo: non_empty(self.blockchain_logo),
            token_standard: non_empty(self.token_standard),
            blockchain: non_empty(self.blockchain),
        })
    }
}

impl CorpusRecord for AttestationRecord {
    const CORPUS: &'static str = "attestations";

    fn normalize(self) -> std::result::Result<Self, String> {
        Ok(Self {
            asset_name: required("assetName", self.asset_name)?,
            attestor: required("attestor", self.attestor)?,
            attestation_type_id: non_empty(self.attestation_type_id),
            schema: non_empty(self.schema),
            attestation_date: required("attestationDate", self.attestation_date)?,
            expiry_date: non_empty(self.expiry_date),
            note: non_empty(self.note),
            link: non_empty(self.link),
            ..self
        })
    }
}

impl CorpusRecord for AttestationType {
    const CORPUS: &'static str = "attestation types";

    fn normalize(self) -> std::result::Result<Self, String> {
        Ok(Self {
            id: required("id", self.id)?,
            name: required("name", self.name)?,
            attestor_type: non_empty(self.attestor_type),
            description: non_empty(self.description),
        })
    }
}

impl CorpusRecord for Recipe {
    const CORPUS: &'static str = "recipes";

    fn normalize(self) -> std::result::Result<Self, String> {
        let name = required("name", self.name)?;
        let mut items = Vec::with_capacity(self.items.len());
        for (position, mut item) in self.items.into_iter().enumerate() {
            item.attestation_type_id = required(
                &format!("attestationTypes[{position}].attestationTypeId"),
                item.attestation_type_id,
            )?;
            item.note = non_empty(item.note);
            items.push(item);
        }
        Ok(Self {
            name,
            author: non_empty(self.author),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttestationStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_malformed_entries_are_rejected_individually() {
        let raw = r#"[
            {"assetName": "A", "attestor": "X", "attestationDate": "2024-01-01"},
            {"assetName": "A", "attestationDate": "2024-01-01"},
            {"assetName": "", "attestor": "Y", "attestationDate": "2024-01-01"},
            {"assetName": "B", "attestor": "Z", "attestationDate": "2024-02-01", "status": "revoked"}
        ]"#;

        let (records, report) = ingest_str::<AttestationRecord>(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].attestor, "X");
        assert_eq!(records[1].status, AttestationStatus::Revoked);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected_count(), 2);
        assert!(matches!(
            report.rejected[0],
            RecordsError::InvalidRecord { position: 1, .. }
        ));
    }

    #[test]
    fn test_empty_optionals_become_absent() {
        let raw = r#"[{
            "assetName": "A", "attestor": "X", "attestationDate": "2024-01-01",
            "expiryDate": "", "note": "  ", "link": ""
        }]"#;
        let (records, report) = ingest_str::<AttestationRecord>(raw).unwrap();
        assert!(report.is_clean());
        assert_eq!(records[0].expiry_date, None);
        assert_eq!(records[0].note, None);
        assert_eq!(records[0].link, None);
    }

    #[test]
    fn test_non_array_corpus_is_unavailable() {
        let err = ingest_str::<Asset>(r#"{"name": "A"}"#).unwrap_err();
        assert!(matches!(err, RecordsError::CorpusUnavailable { .. }));

        let err = ingest_str::<Asset>("not json").unwrap_err();
        assert!(matches!(err, RecordsError::CorpusUnavailable { .. }));
    }

    #[test]
    fn test_recipe_items_keep_order() {
        let raw = r#"[{
            "name": "Basic", "author": "Alice",
            "attestationTypes": [
                {"attestationTypeId": "kyc", "required": true},
                {"attestationTypeId": "audit", "required": false, "note": "nice to have"}
            ]
        }]"#;
        let (recipes, _) = ingest_str::<Recipe>(raw).unwrap();
        let ids: Vec<_> = recipes[0]
            .items
            .iter()
            .map(|item| item.attestation_type_id.as_str())
            .collect();
        assert_eq!(ids, vec!["kyc", "audit"]);
        assert!(recipes[0].items[0].required);
        assert_eq!(recipes[0].items[1].note.as_deref(), Some("nice to have"));
    }

    #[test]
    fn test_recipe_with_blank_item_is_rejected() {
        let raw = r#"[{"name": "Broken", "attestationTypes": [{"attestationTypeId": " "}]}]"#;
        let (recipes, report) = ingest_str::<Recipe>(raw).unwrap();
        assert!(recipes.is_empty());
        assert_eq!(report.rejected_count(), 1);
    }
}
