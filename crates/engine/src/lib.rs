//! # Attest Lens Engine
//!
//! Decides which attestations of an asset appear as badges on its card,
//! where each badge sits on the card perimeter and how its decay ring is
//! drawn.
//!
//! ## Architecture
//!
//! ```text
//! Viewer (corpus state, global recipe choice)
//!     │
//!     └──> AssetSession (one asset, one Lens)
//!          │
//!          ├──> SlotResolver
//!          │    ├─> recipe mode: one slot per recipe item, filled or empty
//!          │    └─> freeform: matching records, attestor + on-chain filters
//!          │
//!          ├──> PerimeterLayout (index -> edge -> px position)
//!          │
//!          ├──> status::evaluate (decay fraction, color tier, expiry)
//!          │
//!          └──> RingView / DetailView / AssetCard
//! ```
//!
//! The engine does no I/O; `now` is always passed in.

pub mod card;
pub mod config;
pub mod detail;
pub mod error;
pub mod layout;
pub mod lens;
pub mod render;
pub mod resolver;
pub mod session;
pub mod status;

pub use card::{token_standard_url, AssetCard};
pub use config::{EdgeCapacities, EngineConfig, LayoutConfig, MAX_EDGE_CAPACITY};
pub use detail::{AttestationDetail, DetailView, ExpiryDisplay, MissingDetail};
pub use error::{EngineError, Result};
pub use layout::{Edge, PerimeterLayout, Position};
pub use lens::{Lens, OnchainFilter, RecipeSelection};
pub use render::{compose, Badge, BadgeRender, RingGeometry, RingRender, RingView, StrokeDash};
pub use resolver::{EmptyReason, Resolution, ResolutionMode, Slot, SlotKind, SlotResolver};
pub use session::{AssetSession, AttestorOption, RecipeOption, Viewer};
pub use status::{evaluate, parse_date, ColorTier, StatusEvaluation};
