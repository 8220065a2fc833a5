use crate::lens::Lens;
use attest_lens_records::{Asset, AttestationRecord, Catalog, Recipe, RecipeItem};
use serde::Serialize;

/// Why a recipe slot has no attestation behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// No record of this type exists for the asset
    Missing,
    /// A record exists but the on-chain filter excludes it
    FilteredOnchain,
    /// A record exists but its attestor is outside the lens
    FilteredAttestor,
}

impl EmptyReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::FilteredOnchain => "filtered by on-chain mode",
            Self::FilteredAttestor => "filtered by attestor",
        }
    }
}

/// Fill state of a slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotKind {
    Filled {
        attestation: AttestationRecord,
        /// Recipe entry the record satisfies (recipe mode only)
        recipe_item: Option<RecipeItem>,
    },
    Empty {
        recipe_item: RecipeItem,
        reason: EmptyReason,
    },
}

impl SlotKind {
    #[must_use]
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Self::Empty { reason, .. } => Some(*reason),
            Self::Filled { .. } => None,
        }
    }
}

/// One badge position in a resolution pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    /// Position in the pass; decides perimeter placement
    pub index: usize,
    pub label: String,
    #[serde(flatten)]
    pub kind: SlotKind,
}

impl Slot {
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self.kind, SlotKind::Filled { .. })
    }

    #[must_use]
    pub fn attestation(&self) -> Option<&AttestationRecord> {
        match &self.kind {
            SlotKind::Filled { attestation, .. } => Some(attestation),
            SlotKind::Empty { .. } => None,
        }
    }

    #[must_use]
    pub fn recipe_item(&self) -> Option<&RecipeItem> {
        match &self.kind {
            SlotKind::Filled { recipe_item, .. } => recipe_item.as_ref(),
            SlotKind::Empty { recipe_item, .. } => Some(recipe_item),
        }
    }
}

/// Which strategy produced a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "recipe", rename_all = "snake_case")]
pub enum ResolutionMode {
    Recipe(String),
    Freeform,
}

/// Output of one resolution pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub mode: ResolutionMode,
    pub slots: Vec<Slot>,
    /// Eligible entries dropped for lack of perimeter capacity
    pub truncated: usize,
}

/// Resolves the visible slots for an asset through a lens
pub struct SlotResolver<'a> {
    catalog: &'a Catalog,
    max_slots: usize,
}

impl<'a> SlotResolver<'a> {
    pub fn new(catalog: &'a Catalog, max_slots: usize) -> Self {
        Self { catalog, max_slots }
    }

    /// Full resolution pass. Recipe mode when the lens names a known recipe,
    /// freeform otherwise.
    pub fn resolve(&self, asset: &Asset, lens: &Lens) -> Resolution {
        let recipe = lens.recipe().name().and_then(|name| {
            let found = self.catalog.recipe(name);
            if found.is_none() {
                log::debug!("Unknown recipe {name:?}, resolving freeform");
            }
            found
        });

        let resolution = match recipe {
            Some(recipe) => self.resolve_recipe(asset, recipe, lens),
            None => self.resolve_freeform(asset, lens),
        };

        log::debug!(
            "Resolved {} slots for {:?} ({:?}, {} truncated)",
            resolution.slots.len(),
            asset.name,
            resolution.mode,
            resolution.truncated
        );

        resolution
    }

    fn resolve_recipe(&self, asset: &Asset, recipe: &Recipe, lens: &Lens) -> Resolution {
        let truncated = recipe.items.len().saturating_sub(self.max_slots);

        let slots = recipe
            .items
            .iter()
            .take(self.max_slots)
            .enumerate()
            .map(|(index, item)| {
                let label = self.catalog.type_label(&item.attestation_type_id).to_string();
                let matched = self
                    .catalog
                    .attestations_for(&asset.name)
                    .find(|record| record.has_type(&item.attestation_type_id));

                let kind = match matched {
                    None => empty(item, EmptyReason::Missing),
                    Some(record) if !lens.onchain().admits(record.onchain) => {
                        empty(item, EmptyReason::FilteredOnchain)
                    }
                    Some(record) if !lens.admits_attestor(&record.attestor) => {
                        empty(item, EmptyReason::FilteredAttestor)
                    }
                    Some(record) => SlotKind::Filled {
                        attestation: record.clone(),
                        recipe_item: Some(item.clone()),
                    },
                };

                Slot { index, label, kind }
            })
            .collect();

        Resolution {
            mode: ResolutionMode::Recipe(recipe.name.clone()),
            slots,
            truncated,
        }
    }

    fn resolve_freeform(&self, asset: &Asset, lens: &Lens) -> Resolution {
        let mut eligible = self
            .catalog
            .attestations_for(&asset.name)
            .filter(|record| lens.admits_attestor(&record.attestor))
            .filter(|record| lens.onchain().admits(record.onchain));

        let slots: Vec<Slot> = eligible
            .by_ref()
            .take(self.max_slots)
            .enumerate()
            .map(|(index, record)| Slot {
                index,
                label: record.display_label().to_string(),
                kind: SlotKind::Filled {
                    attestation: record.clone(),
                    recipe_item: None,
                },
            })
            .collect();

        Resolution {
            mode: ResolutionMode::Freeform,
            slots,
            truncated: eligible.count(),
        }
    }
}

fn empty(item: &RecipeItem, reason: EmptyReason) -> SlotKind {
    SlotKind::Empty {
        recipe_item: item.clone(),
        reason,
    }
}
