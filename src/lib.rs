//=========================================================================
// Runner Core: Library Root
//
// Scene transition orchestration and streaming track generation for an
// endless runner.
//
// Responsibilities:
// - Expose the frame-driven engine (`Engine`, `EngineBuilder`)
// - Expose the core state machines for reuse outside the engine
// - Provide the runner's own scenes and their wiring
//
// Typical usage:
// ```no_run
// use runner_core::config::RunnerConfig;
// use runner_core::scenes::{build_engine, RunnerDeps};
//
// let config = RunnerConfig::default();
// let mut engine = build_engine(&config, RunnerDeps::headless(&config)).unwrap();
// engine.run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the state machines and their collaborator traits.
// `scenes` is the runner game built on top of them.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the frame driver; its types are re-exported below.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, ShutdownHandle, TickControl};
pub use error::{RunnerError, RunnerResult};
