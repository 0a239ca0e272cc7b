//! Build serialization for watch mode.

/// Whether a build cycle is running, and whether another one was requested
/// meanwhile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatchState {
    #[default]
    Idle,
    Building {
        pending: bool,
    },
}

/// Answer to a rebuild request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Nothing was running; the caller starts a cycle now.
    Start,
    /// A cycle is running; one follow-up cycle is queued.
    Queued,
}

impl WatchState {
    pub fn request(&mut self) -> Trigger {
        match self {
            WatchState::Idle => {
                *self = WatchState::Building { pending: false };
                Trigger::Start
            }
            WatchState::Building { pending } => {
                *pending = true;
                Trigger::Queued
            }
        }
    }

    /// Mark the running cycle as done. Returns `true` when requests arrived
    /// during it, in which case exactly one more cycle must run and the
    /// state stays `Building`.
    pub fn finish(&mut self) -> bool {
        match self {
            WatchState::Building { pending: true } => {
                *self = WatchState::Building { pending: false };
                true
            }
            _ => {
                *self = WatchState::Idle;
                false
            }
        }
    }

    pub fn is_building(&self) -> bool {
        matches!(self, WatchState::Building { .. })
    }
}
