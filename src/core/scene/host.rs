//=========================================================================
// Scene Host Interface
//=========================================================================
//
// The contract the orchestrator needs from whatever hosts scenes:
// asynchronous load/unload by key plus loaded-state queries.
//
// Completion of an asynchronous operation is reported through a
// bounded channel and polled once per frame:
//
//   host ──OpCompleter::complete()──► channel ──► AsyncOp::poll()
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::SceneKey;

//=== SceneHost ===========================================================

/// Asynchronous scene loading primitives.
pub trait SceneHost<S: SceneKey> {
    /// Starts loading `key` additively. Completion is reported on the
    /// returned handle.
    fn load_async(&mut self, key: S) -> AsyncOp;

    /// Starts unloading `key`.
    fn unload_async(&mut self, key: S) -> AsyncOp;

    /// True while `key` is loaded.
    fn is_loaded(&self, key: S) -> bool;

    /// True if the host knows how to load `key`.
    fn contains(&self, key: S) -> bool;

    /// The primary scene currently active, if any.
    fn active_scene(&self) -> Option<S>;
}

//=== AsyncOp =============================================================

/// Polled completion handle of an asynchronous host operation.
///
/// Completion is sticky. A host that drops the completer without
/// signalling counts as completed.
#[derive(Debug)]
pub struct AsyncOp {
    receiver: Option<Receiver<()>>,
    done: bool,
}

impl AsyncOp {
    /// Creates a pending operation and the completer the host keeps.
    pub fn channel() -> (OpCompleter, AsyncOp) {
        let (sender, receiver) = bounded(1);
        (
            OpCompleter { sender },
            AsyncOp {
                receiver: Some(receiver),
                done: false,
            },
        )
    }

    /// An operation that is already finished.
    pub fn completed() -> Self {
        Self {
            receiver: None,
            done: true,
        }
    }

    /// Checks for completion without blocking.
    pub fn poll(&mut self) -> bool {
        if self.done {
            return true;
        }
        let Some(receiver) = self.receiver.as_ref() else {
            self.done = true;
            return true;
        };

        match receiver.try_recv() {
            Ok(()) => self.done = true,
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                warn!("Scene operation dropped by host without completing");
                self.done = true;
            }
        }

        if self.done {
            self.receiver = None;
        }
        self.done
    }

    /// Last observed completion state (does not poll).
    pub fn is_done(&self) -> bool {
        self.done
    }
}

//=== OpCompleter =========================================================

/// Host-side half of an [`AsyncOp`].
#[derive(Debug)]
pub struct OpCompleter {
    sender: Sender<()>,
}

impl OpCompleter {
    /// Marks the operation finished. The caller may already have
    /// dropped its handle.
    pub fn complete(self) {
        if self.sender.try_send(()).is_err() {
            debug!("Scene operation completed with no observer");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
