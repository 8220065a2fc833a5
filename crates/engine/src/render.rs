use crate::config::LayoutConfig;
use crate::layout::{PerimeterLayout, Position};
use crate::resolver::{Resolution, ResolutionMode, Slot};
use crate::status::{self, ColorTier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::f64::consts::PI;

/// Background track color behind every decay ring
pub const TRACK_COLOR: &str = "#4a5568";

/// Ring dimensions shared by every badge on a card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    pub diameter: f64,
    pub stroke_width: f64,
    pub radius: f64,
    pub circumference: f64,
    pub track_color: &'static str,
}

impl RingGeometry {
    #[must_use]
    pub fn for_layout(config: &LayoutConfig) -> Self {
        let radius = (config.badge_diameter - config.stroke_width) / 2.0;
        Self {
            diameter: config.badge_diameter,
            stroke_width: config.stroke_width,
            radius,
            circumference: 2.0 * PI * radius,
            track_color: TRACK_COLOR,
        }
    }

    /// Dash pattern drawing `fill` (0..=1) of the ring
    #[must_use]
    pub fn dash(&self, fill: f64) -> StrokeDash {
        let filled = fill.clamp(0.0, 1.0) * self.circumference;
        StrokeDash {
            filled,
            gap: self.circumference - filled,
        }
    }
}

/// `stroke-dasharray` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeDash {
    pub filled: f64,
    pub gap: f64,
}

/// Decay ring of a filled badge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingRender {
    /// 0..=1
    pub fill: f64,
    pub color_tier: ColorTier,
    pub color: &'static str,
    pub is_expired: bool,
    /// Permanent attestation drawn as a closed ring
    pub full_ring: bool,
    /// Partial arc, present when some decay has elapsed
    pub arc: Option<StrokeDash>,
}

/// How a badge is drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BadgeRender {
    Ring(RingRender),
    /// Unmet recipe requirement
    Empty,
    /// Record with unusable dates
    Flagged { reason: String },
}

/// A slot placed on the card with its render parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub slot: Slot,
    pub position: Position,
    pub render: BadgeRender,
}

impl Badge {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.slot.index
    }

    #[must_use]
    pub const fn is_flagged(&self) -> bool {
        matches!(self.render, BadgeRender::Flagged { .. })
    }
}

/// Everything the card needs to draw its badge ring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingView {
    pub asset: String,
    pub mode: ResolutionMode,
    pub geometry: RingGeometry,
    pub badges: Vec<Badge>,
    pub truncated: usize,
}

impl RingView {
    /// Badges whose dates could not be evaluated
    pub fn flagged(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter(|badge| badge.is_flagged())
    }
}

/// Place and evaluate every slot of a resolution at `now`.
///
/// A record with bad dates becomes a flagged badge; the rest of the pass
/// is unaffected.
pub fn compose(
    asset: &str,
    resolution: Resolution,
    config: &LayoutConfig,
    now: DateTime<Utc>,
) -> RingView {
    let layout = PerimeterLayout::new(*config);
    let geometry = RingGeometry::for_layout(config);

    let badges = resolution
        .slots
        .into_iter()
        .filter_map(|slot| {
            let position = layout.position(slot.index)?;
            let render = render_slot(&slot, &geometry, now);
            Some(Badge {
                slot,
                position,
                render,
            })
        })
        .collect();

    RingView {
        asset: asset.to_string(),
        mode: resolution.mode,
        geometry,
        badges,
        truncated: resolution.truncated,
    }
}

fn render_slot(slot: &Slot, geometry: &RingGeometry, now: DateTime<Utc>) -> BadgeRender {
    let Some(record) = slot.attestation() else {
        return BadgeRender::Empty;
    };

    match status::evaluate(record, now) {
        Ok(eval) => {
            let fill = eval.ring_fill();
            BadgeRender::Ring(RingRender {
                fill,
                color_tier: eval.color_tier,
                color: eval.color_tier.hex(),
                is_expired: eval.is_expired,
                full_ring: eval.is_full_ring(),
                arc: (fill > 0.0).then(|| geometry.dash(fill)),
            })
        }
        Err(err) => {
            log::warn!(
                "Flagging slot {} ({:?}) for {:?}: {err}",
                slot.index,
                slot.label,
                record.asset_name
            );
            BadgeRender::Flagged {
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SlotKind;
    use attest_lens_records::{AttestationRecord, RecipeItem};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        status::parse_date("now", "2024-01-06").unwrap()
    }

    fn filled(index: usize, record: AttestationRecord) -> Slot {
        Slot {
            index,
            label: record.display_label().to_string(),
            kind: SlotKind::Filled {
                attestation: record,
                recipe_item: None,
            },
        }
    }

    #[test]
    fn test_geometry_matches_badge_size() {
        let geometry = RingGeometry::for_layout(&LayoutConfig::default());
        assert_eq!(geometry.radius, 10.5);
        assert!((geometry.circumference - 21.0 * PI).abs() < 1e-9);

        let dash = geometry.dash(0.5);
        assert!((dash.filled - dash.gap).abs() < 1e-9);
    }

    #[test]
    fn test_bad_dates_flag_only_their_badge() {
        let resolution = Resolution {
            mode: ResolutionMode::Freeform,
            slots: vec![
                filled(0, AttestationRecord::new("A", "X", "2024-01-01").expires("2024-01-11")),
                filled(1, AttestationRecord::new("A", "X", "not a date")),
                filled(2, AttestationRecord::new("A", "X", "2024-01-01")),
            ],
            truncated: 0,
        };

        let view = compose("A", resolution, &LayoutConfig::default(), now());
        assert_eq!(view.badges.len(), 3);
        assert_eq!(view.flagged().count(), 1);
        assert_eq!(view.flagged().next().unwrap().index(), 1);

        let BadgeRender::Ring(ring) = &view.badges[0].render else {
            panic!("expected ring");
        };
        assert_eq!(ring.fill, 0.5);
        assert_eq!(ring.color, "#48bb78");
        assert!(ring.arc.is_some());
        assert!(!ring.full_ring);

        let BadgeRender::Ring(permanent) = &view.badges[2].render else {
            panic!("expected ring");
        };
        assert!(permanent.full_ring);
        assert_eq!(permanent.arc, None);
    }

    #[test]
    fn test_empty_slots_have_no_ring() {
        let resolution = Resolution {
            mode: ResolutionMode::Recipe("Basic".into()),
            slots: vec![Slot {
                index: 0,
                label: "KYC".into(),
                kind: SlotKind::Empty {
                    recipe_item: RecipeItem::required("kyc"),
                    reason: crate::resolver::EmptyReason::Missing,
                },
            }],
            truncated: 0,
        };

        let view = compose("A", resolution, &LayoutConfig::default(), now());
        assert_eq!(view.badges[0].render, BadgeRender::Empty);
        assert_eq!(view.badges[0].position, Position { top: 30.0, left: -12.0 });
    }
}
