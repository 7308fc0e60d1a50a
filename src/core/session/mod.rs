//=========================================================================
// Play Session
//=========================================================================
//
// One run from countdown to finish: the sequencer and the collaborator
// traits it drives.
//
//=========================================================================

//=== Module Declarations =================================================

mod hud;
mod player;
mod sequencer;

//=== Public API ==========================================================

pub use hud::{format_distance, format_level, LogHud, SessionHud, START_MARKER};
pub use player::{CollisionKind, PlayerControl, RunnerCharacter};
pub use sequencer::{GameplaySequencer, SessionBuilder, SessionPhase, SessionSignal};
