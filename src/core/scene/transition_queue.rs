//=========================================================================
// Transition Queue
//=========================================================================
//
// Scene transition requests raised during scene updates.
//
// Scenes push requests here; the engine drains the queue at the tick
// boundary and forwards each request to the orchestrator. A request for
// a target already queued is dropped.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== TransitionRequest ===================================================

/// A queued "go to scene" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest<S: SceneKey> {
    pub target: S,
    /// Frame the request was raised in.
    pub frame: u64,
}

//=== TransitionQueue =====================================================

pub struct TransitionQueue<S: SceneKey> {
    queue: Vec<TransitionRequest<S>>,
}

impl<S: SceneKey> TransitionQueue<S> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a request. Returns false if `target` is already queued.
    pub fn push(&mut self, target: S, frame: u64) -> bool {
        if self.queue.iter().any(|r| r.target == target) {
            return false;
        }
        self.queue.push(TransitionRequest { target, frame });
        true
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all requests in FIFO order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<TransitionRequest<S>> {
        std::mem::take(&mut self.queue)
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
