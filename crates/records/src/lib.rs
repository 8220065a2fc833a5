//! # Attest Lens Records
//!
//! Typed attestation corpora and the boundary that turns loosely structured
//! JSON into them.
//!
//! ## Architecture
//!
//! ```text
//! corpus directory
//!     │
//!     ├──> Loader (tokio, all four files concurrently, fail closed)
//!     │
//!     ├──> Ingestion (per-element decode, normalize, reject + report)
//!     │
//!     └──> Catalog
//!          ├─> assets by name / by mention in a table row
//!          ├─> attestation records in corpus order
//!          ├─> attestation types by id
//!          └─> recipes by name
//! ```

mod catalog;
mod error;
mod ingest;
mod loader;
mod types;

pub use catalog::Catalog;
pub use error::{RecordsError, Result};
pub use ingest::{ingest_str, ingest_value, CorpusRecord, IngestReport};
pub use loader::{
    load_catalog, LoadedCatalog, ASSETS_FILE, ATTESTATIONS_FILE, ATTESTATION_TYPES_FILE,
    RECIPES_FILE,
};
pub use types::{
    Asset, AttestationRecord, AttestationStatus, AttestationType, Recipe, RecipeItem,
    GENERIC_ATTESTATION_LABEL, PLACEHOLDER_LINK,
};
