use crate::types::{Asset, AttestationRecord, AttestationType, Recipe};
use std::collections::{HashMap, HashSet};

/// The four loaded corpora with lookup tables.
///
/// Attestation records and recipes keep corpus order; lookups by key return
/// the first entry with that key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    assets: Vec<Asset>,
    attestations: Vec<AttestationRecord>,
    types: Vec<AttestationType>,
    recipes: Vec<Recipe>,

    asset_index: HashMap<String, usize>,
    type_index: HashMap<String, usize>,
    recipe_index: HashMap<String, usize>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        assets: Vec<Asset>,
        attestations: Vec<AttestationRecord>,
        types: Vec<AttestationType>,
        recipes: Vec<Recipe>,
    ) -> Self {
        let asset_index = first_index(assets.iter().map(|a| a.name.as_str()));
        let type_index = first_index(types.iter().map(|t| t.id.as_str()));
        let recipe_index = first_index(recipes.iter().map(|r| r.name.as_str()));

        Self {
            assets,
            attestations,
            types,
            recipes,
            asset_index,
            type_index,
            recipe_index,
        }
    }

    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    #[must_use]
    pub fn attestations(&self) -> &[AttestationRecord] {
        &self.attestations
    }

    #[must_use]
    pub fn attestation_types(&self) -> &[AttestationType] {
        &self.types
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Find asset by exact name
    #[must_use]
    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.asset_index.get(name).map(|&idx| &self.assets[idx])
    }

    /// First asset whose name or ticker appears in `text` (table-row lookup)
    #[must_use]
    pub fn find_asset(&self, text: &str) -> Option<&Asset> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.assets.iter().find(|asset| asset.is_mentioned_in(text))
    }

    /// Records about the named asset, in corpus order
    pub fn attestations_for<'a>(
        &'a self,
        asset_name: &'a str,
    ) -> impl Iterator<Item = &'a AttestationRecord> + 'a {
        self.attestations
            .iter()
            .filter(move |record| record.asset_name == asset_name)
    }

    #[must_use]
    pub fn attestation_type(&self, id: &str) -> Option<&AttestationType> {
        self.type_index.get(id).map(|&idx| &self.types[idx])
    }

    #[must_use]
    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipe_index.get(name).map(|&idx| &self.recipes[idx])
    }

    /// Display label for an attestation type id, falling back to the raw id
    #[must_use]
    pub fn type_label<'a>(&'a self, id: &'a str) -> &'a str {
        self.attestation_type(id).map_or(id, |t| t.name.as_str())
    }

    /// Every distinct attestor in the corpus (first seen order), plus the
    /// asset's issuer when it never attested anything itself
    #[must_use]
    pub fn attestor_universe(&self, asset: &Asset) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut attestors = Vec::new();
        let issuer = asset.issuer.as_deref();

        for attestor in self
            .attestations
            .iter()
            .map(|r| r.attestor.as_str())
            .chain(issuer)
        {
            if seen.insert(attestor) {
                attestors.push(attestor.to_string());
            }
        }

        attestors
    }
}

fn first_index<'a>(keys: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (idx, key) in keys.enumerate() {
        index.entry(key.to_string()).or_insert(idx);
    }
    index
}
