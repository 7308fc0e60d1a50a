//=========================================================================
// Track System
//=========================================================================
//
// Procedural streaming of track and obstacle segments ahead of the player.
//
// Architecture:
//   TrackGenerator
//     ├─ StreamWindow (track)      ← SegmentCatalog
//     ├─ StreamWindow (obstacles)  ← SegmentCatalog
//     └─ DifficultyCurve
//
//=========================================================================

//=== Module Declarations =================================================

mod catalog;
mod difficulty;
mod generator;
mod window;

//=== Public API ==========================================================

pub use catalog::{SegmentCatalog, SegmentTemplate};
pub use difficulty::DifficultyCurve;
pub use generator::{RefillReport, TrackGenerator};
pub use window::{PlacedSegment, StreamWindow, RETIREMENT_LOOKAHEAD};
