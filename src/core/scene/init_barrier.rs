//=========================================================================
// Initialization Barrier
//=========================================================================
//
// Single-flag handshake between an entering scene (writer) and the
// transition orchestrator (reader). The orchestrator resets it when a
// transition is accepted and waits for it before fading in.
//
//=========================================================================

/// Readiness reported by the entering scene.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InitState {
    #[default]
    Pending,
    Ready,
    /// Setup failed; the scene halted itself. Carries a diagnostic.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct InitBarrier {
    state: InitState,
}

impl InitBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InitState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == InitState::Ready
    }

    /// Back to `Pending`. Reader side, on transition acceptance.
    pub fn reset(&mut self) {
        self.state = InitState::Pending;
    }

    pub fn signal_ready(&mut self) {
        self.state = InitState::Ready;
    }

    pub fn signal_failed(&mut self, reason: impl Into<String>) {
        self.state = InitState::Failed(reason.into());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
