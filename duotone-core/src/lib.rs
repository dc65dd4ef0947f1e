pub mod aspect;
pub mod error;
pub mod pair;
pub mod rating;
pub mod router;
pub mod stats;
pub mod zoom;

// Re-export primary types for convenience.
pub use aspect::AspectTracker;
pub use error::CoreError;
pub use pair::{Direction, DisplayMode, PairSet, PhotoPair};
pub use rating::{Rating, RatingStore, RatingSummary};
pub use router::{ClickArbiter, ClickDecision};
pub use stats::{FailureRecord, LoadStats, SourceScheme, StatusUpdate, VariantKind};
pub use zoom::{OverlayPane, Rect, ZoomController, ZoomCtx, ZoomEvent, ZoomStatus};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
