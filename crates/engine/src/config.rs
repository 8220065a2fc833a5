use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on the badges a single edge may hold
pub const MAX_EDGE_CAPACITY: usize = 100;

/// Number of badges each card edge can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeCapacities {
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
    pub top: usize,
}

impl Default for EdgeCapacities {
    fn default() -> Self {
        Self {
            left: 9,
            bottom: 6,
            right: 9,
            top: 6,
        }
    }
}

impl EdgeCapacities {
    /// Total perimeter capacity, saturating at `usize::MAX`
    #[must_use]
    pub const fn total(&self) -> usize {
        self.left
            .saturating_add(self.bottom)
            .saturating_add(self.right)
            .saturating_add(self.top)
    }
}

/// Card geometry and badge sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Card width in px
    pub card_width: f64,

    /// Card height in px
    pub card_height: f64,

    /// Badge diameter in px
    pub badge_diameter: f64,

    /// Decay ring stroke width in px
    pub stroke_width: f64,

    /// Per-edge badge capacities
    pub edges: EdgeCapacities,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 280.0,
            card_height: 420.0,
            badge_diameter: 24.0,
            stroke_width: 3.0,
            edges: EdgeCapacities::default(),
        }
    }
}

impl LayoutConfig {
    /// Half-size card for list thumbnails, same capacities
    pub fn for_thumbnail() -> Self {
        Self {
            card_width: 140.0,
            card_height: 210.0,
            badge_diameter: 12.0,
            stroke_width: 2.0,
            ..Default::default()
        }
    }

    /// Maximum number of badges the perimeter can hold
    #[must_use]
    pub const fn max_slots(&self) -> usize {
        self.edges.total()
    }

    /// Offset that makes a badge straddle the card edge
    #[must_use]
    pub fn badge_offset(&self) -> f64 {
        self.badge_diameter / 2.0
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        let dims = [
            ("card_width", self.card_width),
            ("card_height", self.card_height),
            ("badge_diameter", self.badge_diameter),
            ("stroke_width", self.stroke_width),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number (got {value})"));
            }
        }

        if self.stroke_width >= self.badge_diameter {
            return Err(format!(
                "stroke_width ({}) must be smaller than badge_diameter ({})",
                self.stroke_width, self.badge_diameter
            ));
        }

        let edges = [
            ("left", self.edges.left),
            ("bottom", self.edges.bottom),
            ("right", self.edges.right),
            ("top", self.edges.top),
        ];
        for (name, capacity) in edges {
            if capacity > MAX_EDGE_CAPACITY {
                return Err(format!(
                    "edges.{name} must be at most {MAX_EDGE_CAPACITY} (got {capacity})"
                ));
            }
        }

        if self.max_slots() == 0 {
            return Err("edge capacities must hold at least one badge".to_string());
        }

        Ok(())
    }
}

/// Engine configuration, loadable from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document; missing keys take defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| EngineError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate().map_err(EngineError::InvalidConfig)
    }
}
