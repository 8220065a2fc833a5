use crate::card::AssetCard;
use crate::config::{EngineConfig, LayoutConfig};
use crate::detail::{self, DetailView};
use crate::error::{EngineError, Result};
use crate::lens::{Lens, OnchainFilter, RecipeSelection};
use crate::render::{self, RingView};
use crate::resolver::{Resolution, SlotResolver};
use attest_lens_records::{Asset, Catalog, RecordsError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Load state of the corpora
#[derive(Debug, Clone)]
enum CorpusState {
    Loading,
    Ready(Arc<Catalog>),
    Failed(String),
}

/// Owns the corpora and the cross-asset recipe choice; opens asset views
#[derive(Debug)]
pub struct Viewer {
    corpus: CorpusState,
    config: EngineConfig,
    recipe: RecipeSelection,
}

impl Viewer {
    /// Viewer whose corpora are still loading
    pub fn new(config: EngineConfig) -> Self {
        Self {
            corpus: CorpusState::Loading,
            config,
            recipe: RecipeSelection::None,
        }
    }

    pub fn with_catalog(catalog: Catalog, config: EngineConfig) -> Self {
        let mut viewer = Self::new(config);
        viewer.corpus = CorpusState::Ready(Arc::new(catalog));
        viewer
    }

    /// Record the outcome of the corpus load
    pub fn finish_loading(&mut self, outcome: std::result::Result<Catalog, RecordsError>) {
        self.corpus = match outcome {
            Ok(catalog) => CorpusState::Ready(Arc::new(catalog)),
            Err(err) => {
                log::error!("Corpus load failed: {err}");
                CorpusState::Failed(err.to_string())
            }
        };
    }

    /// Loaded catalog, or `CorpusUnavailable`
    pub fn catalog(&self) -> Result<&Arc<Catalog>> {
        match &self.corpus {
            CorpusState::Ready(catalog) => Ok(catalog),
            CorpusState::Loading => Err(EngineError::corpus_unavailable("corpora still loading")),
            CorpusState::Failed(reason) => Err(EngineError::corpus_unavailable(reason.clone())),
        }
    }

    #[must_use]
    pub const fn recipe_choice(&self) -> &RecipeSelection {
        &self.recipe
    }

    /// Change the recipe choice used by subsequently opened views
    pub fn select_recipe(&mut self, recipe: RecipeSelection) {
        self.recipe = recipe;
    }

    /// Open the view of the named asset with a freshly reset lens
    pub fn open(&self, asset_name: &str) -> Result<AssetSession> {
        let catalog = self.catalog()?;
        let asset = catalog
            .asset(asset_name)
            .cloned()
            .ok_or_else(|| EngineError::AssetNotFound(asset_name.to_string()))?;
        Ok(self.session_for(catalog, asset))
    }

    /// Open the view of the first asset named or tickered in a table row
    pub fn open_row(&self, row_text: &str) -> Result<AssetSession> {
        let catalog = self.catalog()?;
        let asset = catalog
            .find_asset(row_text)
            .cloned()
            .ok_or_else(|| EngineError::AssetNotFound(row_text.trim().to_string()))?;
        Ok(self.session_for(catalog, asset))
    }

    /// Recipe picker entries, marking the global choice
    pub fn recipe_options(&self) -> Result<Vec<RecipeOption>> {
        Ok(recipe_options(self.catalog()?, &self.recipe))
    }

    /// Close a view; its recipe choice becomes the global one
    pub fn close(&mut self, session: AssetSession) {
        self.recipe = session.lens.recipe().clone();
    }

    fn session_for(&self, catalog: &Arc<Catalog>, asset: Asset) -> AssetSession {
        log::debug!("Opening asset view for {:?}", asset.name);
        AssetSession {
            catalog: Arc::clone(catalog),
            asset,
            lens: Lens::new(self.recipe.clone()),
            layout: self.config.layout,
        }
    }
}

/// Entry of the attestor picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttestorOption {
    pub attestor: String,
    pub label: String,
    pub is_issuer: bool,
}

/// Entry of the recipe picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeOption {
    pub name: String,
    pub label: String,
    pub selected: bool,
}

/// One open asset view: the bound asset and its own lens
#[derive(Debug, Clone)]
pub struct AssetSession {
    catalog: Arc<Catalog>,
    asset: Asset,
    lens: Lens,
    layout: LayoutConfig,
}

impl AssetSession {
    #[must_use]
    pub const fn asset(&self) -> &Asset {
        &self.asset
    }

    #[must_use]
    pub const fn lens(&self) -> &Lens {
        &self.lens
    }

    #[must_use]
    pub fn card(&self) -> AssetCard {
        AssetCard::for_asset(&self.asset)
    }

    pub fn add_attestor(&mut self, attestor: impl Into<String>) -> bool {
        self.lens.add_attestor(attestor)
    }

    pub fn remove_attestor(&mut self, attestor: &str) -> bool {
        self.lens.remove_attestor(attestor)
    }

    pub fn set_onchain_filter(&mut self, filter: OnchainFilter) {
        self.lens.set_onchain_filter(filter);
    }

    pub fn set_onchain_mode(&mut self, mode: &str) -> Result<()> {
        self.lens.set_onchain_mode(mode)
    }

    pub fn set_recipe(&mut self, recipe: RecipeSelection) {
        self.lens.set_recipe(recipe);
    }

    /// Rebind to `asset` with a reset lens carrying `recipe`
    pub fn reset(&mut self, asset: Asset, recipe: RecipeSelection) {
        self.asset = asset;
        self.lens.reset(recipe);
    }

    /// Resolve slots for the current lens
    #[must_use]
    pub fn resolve(&self) -> Resolution {
        SlotResolver::new(&self.catalog, self.layout.max_slots()).resolve(&self.asset, &self.lens)
    }

    /// Full pass: resolve, place and evaluate every badge at `now`
    #[must_use]
    pub fn render(&self, now: DateTime<Utc>) -> RingView {
        render::compose(&self.asset.name, self.resolve(), &self.layout, now)
    }

    /// Detail view of the slot at `index` in a fresh pass
    pub fn detail(&self, index: usize) -> Result<DetailView> {
        let resolution = self.resolve();
        let count = resolution.slots.len();
        resolution
            .slots
            .iter()
            .find(|slot| slot.index == index)
            .map(|slot| detail::project(slot, &self.catalog))
            .ok_or(EngineError::SlotOutOfRange { index, count })
    }

    /// Attestors that can still be added to the lens
    #[must_use]
    pub fn attestor_options(&self) -> Vec<AttestorOption> {
        let issuer = self.asset.issuer.as_deref();
        self.catalog
            .attestor_universe(&self.asset)
            .into_iter()
            .filter(|attestor| !self.lens.has_attestor(attestor))
            .map(|attestor| {
                let is_issuer = issuer == Some(attestor.as_str());
                let label = if is_issuer {
                    format!("{attestor} (issuer)")
                } else {
                    attestor.clone()
                };
                AttestorOption {
                    attestor,
                    label,
                    is_issuer,
                }
            })
            .collect()
    }

    /// Every recipe in corpus order, marking the current choice
    #[must_use]
    pub fn recipe_options(&self) -> Vec<RecipeOption> {
        recipe_options(&self.catalog, self.lens.recipe())
    }
}

fn recipe_options(catalog: &Catalog, current: &RecipeSelection) -> Vec<RecipeOption> {
    catalog
        .recipes()
        .iter()
        .map(|recipe| RecipeOption {
            name: recipe.name.clone(),
            label: recipe.option_label(),
            selected: current.name() == Some(recipe.name.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_lens_records::{AttestationRecord, Recipe, RecipeItem};
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Asset::named("Acme Bond").ticker("ACME").issuer("Acme Corp"),
                Asset::named("Gold Note"),
            ],
            vec![
                AttestationRecord::new("Acme Bond", "X", "2024-01-01").type_id("kyc"),
                AttestationRecord::new("Gold Note", "Y", "2024-01-01"),
            ],
            vec![],
            vec![
                Recipe::new("Basic", vec![RecipeItem::required("kyc")]).author("Alice"),
                Recipe::new("Full", vec![]),
            ],
        )
    }

    #[test]
    fn test_open_requires_loaded_corpus() {
        let mut viewer = Viewer::new(EngineConfig::default());
        assert!(matches!(
            viewer.open("Acme Bond"),
            Err(EngineError::CorpusUnavailable(_))
        ));

        viewer.finish_loading(Err(RecordsError::corpus_unavailable("recipes", "timeout")));
        assert!(matches!(
            viewer.open("Acme Bond"),
            Err(EngineError::CorpusUnavailable(_))
        ));

        viewer.finish_loading(Ok(catalog()));
        assert!(viewer.open("Acme Bond").is_ok());
        assert_eq!(
            viewer.open("Silver").unwrap_err(),
            EngineError::AssetNotFound("Silver".into())
        );
    }

    #[test]
    fn test_recipe_choice_carries_across_views() {
        let mut viewer = Viewer::with_catalog(catalog(), EngineConfig::default());
        viewer.select_recipe(RecipeSelection::parse("Basic"));

        let mut session = viewer.open("Acme Bond").unwrap();
        assert_eq!(session.lens().recipe().name(), Some("Basic"));
        session.add_attestor("X");
        session.set_onchain_filter(OnchainFilter::Onchain);
        session.set_recipe(RecipeSelection::parse("Full"));
        viewer.close(session);

        let session = viewer.open_row("  ACME  ").unwrap();
        assert_eq!(session.asset().name, "Acme Bond");
        assert_eq!(session.lens().recipe().name(), Some("Full"));
        assert_eq!(session.lens().attestors().count(), 0);
        assert_eq!(session.lens().onchain(), OnchainFilter::All);
    }

    #[test]
    fn test_attestor_options_exclude_selected_and_mark_issuer() {
        let viewer = Viewer::with_catalog(catalog(), EngineConfig::default());
        let mut session = viewer.open("Acme Bond").unwrap();
        session.add_attestor("Y");

        let labels: Vec<_> = session
            .attestor_options()
            .into_iter()
            .map(|option| option.label)
            .collect();
        assert_eq!(labels, vec!["X", "Acme Corp (issuer)"]);
    }

    #[test]
    fn test_recipe_options_mark_current() {
        let mut viewer = Viewer::with_catalog(catalog(), EngineConfig::default());
        viewer.select_recipe(RecipeSelection::parse("Full"));
        let session = viewer.open("Acme Bond").unwrap();

        let options = session.recipe_options();
        assert_eq!(options[0].label, "Basic (Alice)");
        assert!(!options[0].selected);
        assert_eq!(options[1].label, "Full");
        assert!(options[1].selected);
        assert_eq!(viewer.recipe_options().unwrap(), options);

        assert!(Viewer::new(EngineConfig::default()).recipe_options().is_err());
    }

    #[test]
    fn test_detail_out_of_range() {
        let viewer = Viewer::with_catalog(catalog(), EngineConfig::default());
        let session = viewer.open("Acme Bond").unwrap();
        assert!(session.detail(0).is_ok());
        assert_eq!(
            session.detail(5).unwrap_err(),
            EngineError::SlotOutOfRange { index: 5, count: 1 }
        );
    }

    #[test]
    fn test_reset_rebinds_asset() {
        let viewer = Viewer::with_catalog(catalog(), EngineConfig::default());
        let mut session = viewer.open("Acme Bond").unwrap();
        session.add_attestor("X");

        let gold = viewer.catalog().unwrap().asset("Gold Note").cloned().unwrap();
        session.reset(gold, RecipeSelection::None);
        assert_eq!(session.asset().name, "Gold Note");
        assert!(!session.lens().restricts_attestors());
        assert_eq!(session.resolve().slots.len(), 1);
    }
}
