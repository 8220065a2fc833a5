use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder link value that must never be surfaced as an external link
pub const PLACEHOLDER_LINK: &str = "#";

/// Label used when a freeform attestation carries neither a schema nor a type id
pub const GENERIC_ATTESTATION_LABEL: &str = "Attestation";

/// A tokenized asset as listed in the asset corpus
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    /// Display name, also the foreign key used by attestation records
    pub name: String,

    /// Optional ticker symbol
    #[serde(default)]
    pub ticker: Option<String>,

    /// Attestor identity of the issuer
    #[serde(default)]
    pub issuer: Option<String>,

    /// Card artwork URI
    #[serde(default)]
    pub asset_image: Option<String>,

    /// Chain logo URI
    #[serde(default)]
    pub blockchain_logo: Option<String>,

    /// Token standard label (e.g. "ERC-20")
    #[serde(default, rename = "tokenStandard")]
    pub token_standard: Option<String>,

    /// Chain the token lives on
    #[serde(default)]
    pub blockchain: Option<String>,
}

impl Asset {
    /// Create an asset with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: None,
            issuer: None,
            asset_image: None,
            blockchain_logo: None,
            token_standard: None,
            blockchain: None,
        }
    }

    /// Builder: set ticker
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Builder: set issuer
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Builder: set token standard
    #[must_use]
    pub fn token_standard(mut self, standard: impl Into<String>) -> Self {
        self.token_standard = Some(standard.into());
        self
    }

    /// Builder: set chain
    #[must_use]
    pub fn blockchain(mut self, chain: impl Into<String>) -> Self {
        self.blockchain = Some(chain.into());
        self
    }

    /// Whether `text` mentions this asset by name or ticker
    #[must_use]
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        if text.contains(&self.name) {
            return true;
        }
        self.ticker
            .as_deref()
            .is_some_and(|ticker| text.contains(ticker))
    }
}

/// Lifecycle status of an attestation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttestationStatus {
    #[default]
    Active,
    Expired,
    Revoked,
    /// Any other status, kept verbatim for display
    Other(String),
}

impl AttestationStatus {
    /// Status as it appears in the corpus
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::Other(raw) => raw,
        }
    }

    /// Expired or revoked, regardless of dates
    #[must_use]
    pub const fn forces_expiry(&self) -> bool {
        matches!(self, Self::Expired | Self::Revoked)
    }
}

impl From<String> for AttestationStatus {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("active") {
            Self::Active
        } else if trimmed.eq_ignore_ascii_case("expired") {
            Self::Expired
        } else if trimmed.eq_ignore_ascii_case("revoked") {
            Self::Revoked
        } else {
            Self::Other(raw)
        }
    }
}

impl From<&str> for AttestationStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AttestationStatus> for String {
    fn from(status: AttestationStatus) -> Self {
        match status {
            AttestationStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AttestationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claim made by an attestor about an asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRecord {
    /// Name of the asset this record is about
    pub asset_name: String,

    /// Identity of the issuing attestor
    pub attestor: String,

    /// Link into the attestation type table
    #[serde(default)]
    pub attestation_type_id: Option<String>,

    /// Display label
    #[serde(default)]
    pub schema: Option<String>,

    #[serde(default)]
    pub onchain: bool,

    /// Issue date, raw as it appears in the corpus
    pub attestation_date: String,

    /// Expiry date, raw; absent means permanent
    #[serde(default)]
    pub expiry_date: Option<String>,

    #[serde(default)]
    pub status: AttestationStatus,

    #[serde(default)]
    pub note: Option<String>,

    /// External URI with further evidence
    #[serde(default)]
    pub link: Option<String>,
}

impl AttestationRecord {
    /// Create an active, off-chain, permanent record
    pub fn new(
        asset_name: impl Into<String>,
        attestor: impl Into<String>,
        attestation_date: impl Into<String>,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            attestor: attestor.into(),
            attestation_type_id: None,
            schema: None,
            onchain: false,
            attestation_date: attestation_date.into(),
            expiry_date: None,
            status: AttestationStatus::Active,
            note: None,
            link: None,
        }
    }

    /// Builder: set attestation type id
    #[must_use]
    pub fn type_id(mut self, type_id: impl Into<String>) -> Self {
        self.attestation_type_id = Some(type_id.into());
        self
    }

    /// Builder: set schema label
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Builder: mark as on-chain
    #[must_use]
    pub const fn onchain(mut self, onchain: bool) -> Self {
        self.onchain = onchain;
        self
    }

    /// Builder: set expiry date
    #[must_use]
    pub fn expires(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    /// Builder: set status
    #[must_use]
    pub fn status(mut self, status: impl Into<AttestationStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder: set note
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Builder: set link
    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Label used when the record is shown without a recipe:
    /// schema, then type id, then a generic placeholder
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.schema
            .as_deref()
            .or(self.attestation_type_id.as_deref())
            .unwrap_or(GENERIC_ATTESTATION_LABEL)
    }

    /// External link, unless absent or a placeholder
    #[must_use]
    pub fn external_link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .filter(|link| !link.trim().is_empty() && *link != PLACEHOLDER_LINK)
    }

    /// Whether the record carries the given attestation type
    #[must_use]
    pub fn has_type(&self, type_id: &str) -> bool {
        self.attestation_type_id.as_deref() == Some(type_id)
    }
}

/// Definition of an attestation type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttestationType {
    pub id: String,

    /// Display label
    pub name: String,

    /// Category of attestor expected to issue this type
    #[serde(default)]
    pub attestor_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl AttestationType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attestor_type: None,
            description: None,
        }
    }

    /// Builder: set expected attestor category
    #[must_use]
    pub fn attestor_type(mut self, attestor_type: impl Into<String>) -> Self {
        self.attestor_type = Some(attestor_type.into());
        self
    }

    /// Builder: set description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One entry of a recipe checklist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    pub attestation_type_id: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub note: Option<String>,
}

impl RecipeItem {
    pub fn required(type_id: impl Into<String>) -> Self {
        Self {
            attestation_type_id: type_id.into(),
            required: true,
            note: None,
        }
    }

    pub fn optional(type_id: impl Into<String>) -> Self {
        Self {
            attestation_type_id: type_id.into(),
            required: false,
            note: None,
        }
    }

    /// Builder: set note
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A named, ordered checklist of attestation types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,

    #[serde(default)]
    pub author: Option<String>,

    /// Checklist in display order; position decides slot index
    #[serde(rename = "attestationTypes", default)]
    pub items: Vec<RecipeItem>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, items: Vec<RecipeItem>) -> Self {
        Self {
            name: name.into(),
            author: None,
            items,
        }
    }

    /// Builder: set author
    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Label for recipe pickers: "name (author)"
    #[must_use]
    pub fn option_label(&self) -> String {
        match self.author.as_deref() {
            Some(author) => format!("{} ({author})", self.name),
            None => self.name.clone(),
        }
    }
}
