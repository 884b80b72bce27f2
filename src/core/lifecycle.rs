/// Lazy audio start as an explicit state machine.
///
/// Browsers refuse to start audio outside a user gesture, so the graph is
/// built on the first qualifying interaction and playback start may fail or
/// never settle. Once the graph exists every later gesture retries the start,
/// whether or not an earlier attempt is still pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StartPhase {
    #[default]
    Uninitialized,
    Starting {
        pending: bool,
    },
    Ready,
}

/// What the caller must do after [`StartGate::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartAction {
    /// Build the graph, then start playback.
    BuildAndStart,
    /// Graph exists; try starting playback again.
    RetryStart,
    /// Already ready.
    Nothing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StartGate {
    phase: StartPhase,
}

impl StartGate {
    pub fn phase(&self) -> StartPhase {
        self.phase
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.phase == StartPhase::Ready
    }

    /// A user gesture happened.
    pub fn request(&mut self) -> StartAction {
        match self.phase {
            StartPhase::Uninitialized => {
                self.phase = StartPhase::Starting { pending: true };
                StartAction::BuildAndStart
            }
            StartPhase::Starting { .. } => {
                self.phase = StartPhase::Starting { pending: true };
                StartAction::RetryStart
            }
            StartPhase::Ready => StartAction::Nothing,
        }
    }

    /// A start attempt finished. Attempts may overlap; the first success wins
    /// and a late failure never leaves `Ready`. Returns true if this call made
    /// the gate ready.
    pub fn resolve(&mut self, started: bool) -> bool {
        match self.phase {
            StartPhase::Starting { .. } if started => {
                self.phase = StartPhase::Ready;
                true
            }
            StartPhase::Starting { .. } => {
                self.phase = StartPhase::Starting { pending: false };
                false
            }
            _ => false,
        }
    }

    /// Graph construction failed before any start attempt; the next gesture
    /// builds from scratch.
    pub fn reset(&mut self) {
        if self.phase != StartPhase::Ready {
            self.phase = StartPhase::Uninitialized;
        }
    }
}
