//=========================================================================
// Core Systems
//
// Engine-independent building blocks of the runner.
//
// Modules:
// - clock:   frame tick and fixed-duration timers
// - track:   segment catalogs, stream windows, difficulty, generator
// - scene:   scene host, init barrier, transition orchestrator
// - loading: loading overlay gate and scene
// - session: gameplay sequencer and its collaborators
// - record:  best-distance leaderboard
//
//=========================================================================

pub mod clock;
pub mod loading;
pub mod record;
pub mod scene;
pub mod session;
pub mod track;
