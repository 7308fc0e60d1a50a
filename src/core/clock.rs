//=========================================================================
// Frame Clock
//=========================================================================
//
// Per-frame tick data and timer state.
//
// State machines never sleep. A fixed-duration wait is a `Countdown`
// stored inside the state and advanced by each frame's `dt`.
//
//=========================================================================

//=== FrameTick ===========================================================

/// One logic frame as seen by the state machines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Monotonic frame counter, starting at 1 for the first tick.
    pub frame: u64,
    /// Seconds covered by this frame.
    pub dt: f32,
}

impl FrameTick {
    pub fn new(frame: u64, dt: f32) -> Self {
        Self { frame, dt }
    }
}

//=== Countdown ===========================================================

/// Fixed-duration timer advanced by frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    period: f32,
    remaining: f32,
}

impl Countdown {
    /// Creates a timer that expires after `secs` seconds of advancement.
    pub fn new(secs: f32) -> Self {
        Self {
            period: secs,
            remaining: secs,
        }
    }

    /// Advances the timer and returns true once it has expired.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Starts the next period, carrying over any overshoot.
    pub fn rearm(&mut self) {
        self.remaining += self.period;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
