use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// On-chain filter tri-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnchainFilter {
    #[default]
    All,
    Onchain,
    Offchain,
}

impl OnchainFilter {
    /// Whether a record with the given on-chain flag passes the filter
    #[must_use]
    pub const fn admits(self, onchain: bool) -> bool {
        match self {
            Self::All => true,
            Self::Onchain => onchain,
            Self::Offchain => !onchain,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Onchain => "onchain",
            Self::Offchain => "offchain",
        }
    }
}

impl FromStr for OnchainFilter {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "all" => Ok(Self::All),
            "onchain" => Ok(Self::Onchain),
            "offchain" => Ok(Self::Offchain),
            other => Err(EngineError::UnknownOnchainMode(other.to_string())),
        }
    }
}

impl fmt::Display for OnchainFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipe choice: freeform (no recipe) or a recipe by name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSelection {
    #[default]
    None,
    Named(String),
}

impl RecipeSelection {
    /// Parse a picker value; "", "all" and "none" select freeform mode
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" | "none" => Self::None,
            name => Self::Named(name.to_string()),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for RecipeSelection {
    fn from(name: Option<String>) -> Self {
        name.map_or(Self::None, |n| Self::parse(&n))
    }
}

/// Active filter combination for one asset view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lens {
    attestors: BTreeSet<String>,
    onchain: OnchainFilter,
    recipe: RecipeSelection,
}

impl Lens {
    /// Fresh lens carrying the given recipe choice
    pub fn new(recipe: RecipeSelection) -> Self {
        Self {
            recipe,
            ..Default::default()
        }
    }

    /// Add an attestor to the restriction; returns false if already present
    pub fn add_attestor(&mut self, attestor: impl Into<String>) -> bool {
        self.attestors.insert(attestor.into())
    }

    /// Remove an attestor from the restriction; returns false if absent
    pub fn remove_attestor(&mut self, attestor: &str) -> bool {
        self.attestors.remove(attestor)
    }

    pub fn set_onchain_filter(&mut self, filter: OnchainFilter) {
        self.onchain = filter;
    }

    /// Set the on-chain filter from its string form, rejecting unknown modes
    pub fn set_onchain_mode(&mut self, mode: &str) -> crate::Result<()> {
        self.onchain = mode.parse()?;
        Ok(())
    }

    pub fn set_recipe(&mut self, recipe: RecipeSelection) {
        self.recipe = recipe;
    }

    /// Clear attestors, show all on/off-chain records, adopt `recipe`
    pub fn reset(&mut self, recipe: RecipeSelection) {
        self.attestors.clear();
        self.onchain = OnchainFilter::All;
        self.recipe = recipe;
    }

    pub fn attestors(&self) -> impl Iterator<Item = &str> {
        self.attestors.iter().map(String::as_str)
    }

    #[must_use]
    pub fn has_attestor(&self, attestor: &str) -> bool {
        self.attestors.contains(attestor)
    }

    /// Whether an attestor restriction is active
    #[must_use]
    pub fn restricts_attestors(&self) -> bool {
        !self.attestors.is_empty()
    }

    /// Whether a record by `attestor` passes the attestor restriction.
    /// An empty set places no restriction.
    #[must_use]
    pub fn admits_attestor(&self, attestor: &str) -> bool {
        self.attestors.is_empty() || self.attestors.contains(attestor)
    }

    #[must_use]
    pub const fn onchain(&self) -> OnchainFilter {
        self.onchain
    }

    #[must_use]
    pub const fn recipe(&self) -> &RecipeSelection {
        &self.recipe
    }
}
