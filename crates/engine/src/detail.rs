use crate::resolver::{Slot, SlotKind};
use attest_lens_records::{AttestationRecord, AttestationStatus, Catalog, RecipeItem};
use serde::Serialize;

/// Shown where a missing attestation has no value
pub const NOT_APPLICABLE: &str = "—";

/// Expiry column of the detail dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "date", rename_all = "snake_case")]
pub enum ExpiryDisplay {
    Date(String),
    Permanent,
}

impl ExpiryDisplay {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Date(date) => date,
            Self::Permanent => "Permanent",
        }
    }
}

/// Detail of a real attestation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttestationDetail {
    pub title: String,
    pub attestor: String,
    pub issued: String,
    pub expiry: ExpiryDisplay,
    pub status: AttestationStatus,
    pub onchain: bool,
    pub note: Option<String>,
    /// Only real links; placeholders are dropped
    pub link: Option<String>,
}

/// Detail of an unmet recipe requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDetail {
    pub title: String,
    /// Attestor category the type expects
    pub expected_attestor: Option<String>,
    pub required: bool,
    /// Recipe note, else the type description
    pub note: Option<String>,
}

/// View-model for the attestation detail dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Attestation(AttestationDetail),
    Missing(MissingDetail),
}

impl DetailView {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Attestation(detail) => &detail.title,
            Self::Missing(detail) => &detail.title,
        }
    }

    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Attestation(detail) => detail.link.as_deref(),
            Self::Missing(_) => None,
        }
    }

    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Attestation(detail) => detail.note.as_deref(),
            Self::Missing(detail) => detail.note.as_deref(),
        }
    }

    /// Labelled rows as the dialog prints them
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = match self {
            Self::Attestation(detail) => vec![
                ("Attestor", detail.attestor.clone()),
                ("Date", detail.issued.clone()),
                ("Expiry", detail.expiry.text().to_string()),
                ("Status", detail.status.to_string()),
                (
                    "Type",
                    if detail.onchain { "Onchain" } else { "Offchain" }.to_string(),
                ),
            ],
            Self::Missing(detail) => vec![
                (
                    "Attestor",
                    detail
                        .expected_attestor
                        .clone()
                        .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
                ),
                ("Date", NOT_APPLICABLE.to_string()),
                ("Expiry", NOT_APPLICABLE.to_string()),
                ("Status", "Missing".to_string()),
                (
                    "Type",
                    if detail.required { "Required" } else { "Optional" }.to_string(),
                ),
            ],
        };
        if let Some(note) = self.note() {
            rows.push(("Note", note.to_string()));
        }
        rows
    }
}

/// Project a slot into its detail view
#[must_use]
pub fn project(slot: &Slot, catalog: &Catalog) -> DetailView {
    match &slot.kind {
        SlotKind::Filled { attestation, .. } => DetailView::Attestation(attestation_detail(attestation)),
        SlotKind::Empty { recipe_item, .. } => DetailView::Missing(missing_detail(recipe_item, catalog)),
    }
}

fn attestation_detail(record: &AttestationRecord) -> AttestationDetail {
    AttestationDetail {
        title: record.display_label().to_string(),
        attestor: record.attestor.clone(),
        issued: record.attestation_date.clone(),
        expiry: record
            .expiry_date
            .clone()
            .map_or(ExpiryDisplay::Permanent, ExpiryDisplay::Date),
        status: record.status.clone(),
        onchain: record.onchain,
        note: record.note.clone(),
        link: record.external_link().map(str::to_string),
    }
}

fn missing_detail(item: &RecipeItem, catalog: &Catalog) -> MissingDetail {
    let definition = catalog.attestation_type(&item.attestation_type_id);
    MissingDetail {
        title: catalog.type_label(&item.attestation_type_id).to_string(),
        expected_attestor: definition.and_then(|t| t.attestor_type.clone()),
        required: item.required,
        note: item
            .note
            .clone()
            .or_else(|| definition.and_then(|t| t.description.clone())),
    }
}
