use crate::catalog::Catalog;
use crate::error::{RecordsError, Result};
use crate::ingest::{ingest_str, CorpusRecord, IngestReport};
use crate::types::{Asset, AttestationRecord, AttestationType, Recipe};
use std::path::{Path, PathBuf};

pub const ASSETS_FILE: &str = "rwa-assets-db.json";
pub const ATTESTATIONS_FILE: &str = "attestations-db.json";
pub const ATTESTATION_TYPES_FILE: &str = "attestation-types.json";
pub const RECIPES_FILE: &str = "recipes-db.json";

/// A catalog together with the per-corpus ingestion reports
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub reports: Vec<IngestReport>,
}

impl LoadedCatalog {
    /// Total number of rejected entries across all corpora
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.reports.iter().map(IngestReport::rejected_count).sum()
    }
}

/// Load all four corpora from `dir`.
///
/// Fails closed: if any corpus cannot be read or is not a JSON array the whole
/// load fails with [`RecordsError::CorpusUnavailable`].
pub async fn load_catalog(dir: impl AsRef<Path>) -> Result<LoadedCatalog> {
    let dir = dir.as_ref();

    let (assets, attestations, types, recipes) = tokio::try_join!(
        load_corpus::<Asset>(dir.join(ASSETS_FILE)),
        load_corpus::<AttestationRecord>(dir.join(ATTESTATIONS_FILE)),
        load_corpus::<AttestationType>(dir.join(ATTESTATION_TYPES_FILE)),
        load_corpus::<Recipe>(dir.join(RECIPES_FILE)),
    )?;

    let reports = vec![assets.1, attestations.1, types.1, recipes.1];
    let loaded = LoadedCatalog {
        catalog: Catalog::new(assets.0, attestations.0, types.0, recipes.0),
        reports,
    };

    log::info!(
        "Loaded corpora from {}: {} assets, {} attestations, {} types, {} recipes ({} rejected)",
        dir.display(),
        loaded.catalog.assets().len(),
        loaded.catalog.attestations().len(),
        loaded.catalog.attestation_types().len(),
        loaded.catalog.recipes().len(),
        loaded.rejected_count()
    );

    Ok(loaded)
}

async fn load_corpus<T: CorpusRecord>(path: PathBuf) -> Result<(Vec<T>, IngestReport)> {
    let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
        RecordsError::corpus_unavailable(T::CORPUS, format!("{}: {e}", path.display()))
    })?;
    ingest_str::<T>(&raw)
}
