//! Temporal decay of attestations.
//!
//! The decay fraction is the share of the validity window that has elapsed at
//! `now`. It is recomputed on every render pass; nothing here caches.

use crate::error::{EngineError, Result};
use attest_lens_records::{AttestationRecord, AttestationStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of the green tier (inclusive)
pub const GREEN_MAX_DECAY: f64 = 50.0;

/// Upper bound of the yellow tier (inclusive)
pub const YELLOW_MAX_DECAY: f64 = 75.0;

/// Ring color tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    Green,
    Yellow,
    Red,
}

impl ColorTier {
    /// Tier for a decay fraction in percent
    #[must_use]
    pub fn for_decay(decay: f64) -> Self {
        if decay <= GREEN_MAX_DECAY {
            Self::Green
        } else if decay <= YELLOW_MAX_DECAY {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    /// Stroke color
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Green => "#48bb78",
            Self::Yellow => "#ecc94b",
            Self::Red => "#f56565",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Decay state of one attestation at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEvaluation {
    /// Elapsed share of the validity window, 0..=100
    pub decay_fraction: f64,
    pub color_tier: ColorTier,
    /// No expiry date
    pub is_permanent: bool,
    /// Expired by status or by date
    pub is_expired: bool,
}

impl StatusEvaluation {
    /// Decay as a 0..=1 ring fill
    #[must_use]
    pub fn ring_fill(&self) -> f64 {
        self.decay_fraction / 100.0
    }

    /// Permanent and still valid: drawn as a full ring
    #[must_use]
    pub const fn is_full_ring(&self) -> bool {
        self.is_permanent && !self.is_expired
    }
}

/// Evaluate an attestation's decay at `now`.
///
/// Fails only when a date cannot be parsed.
pub fn evaluate(record: &AttestationRecord, now: DateTime<Utc>) -> Result<StatusEvaluation> {
    let issued = parse_date("attestationDate", &record.attestation_date)?;
    let expiry = record
        .expiry_date
        .as_deref()
        .map(|raw| parse_date("expiryDate", raw))
        .transpose()?;

    let mut is_expired = record.status.forces_expiry();
    let decay_fraction = match expiry {
        None if is_expired => 100.0,
        None => 0.0,
        Some(expiry) => {
            is_expired |= now > expiry;
            if is_expired {
                100.0
            } else {
                elapsed_share(issued, expiry, now)
            }
        }
    };

    let color_tier = if record.status == AttestationStatus::Revoked {
        ColorTier::Red
    } else {
        ColorTier::for_decay(decay_fraction)
    };

    Ok(StatusEvaluation {
        decay_fraction,
        color_tier,
        is_permanent: expiry.is_none(),
        is_expired,
    })
}

/// Percent of `[issued, expiry]` elapsed at `now`, clamped to 0..=100.
/// A non-positive window counts as no decay.
fn elapsed_share(issued: DateTime<Utc>, expiry: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let total = (expiry - issued).num_milliseconds();
    if total <= 0 {
        return 0.0;
    }
    let elapsed = (now - issued).num_milliseconds();
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Parse a corpus date: RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC),
/// or a plain `YYYY-MM-DD` (UTC midnight)
pub fn parse_date(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| EngineError::malformed_date(field, raw))
}
