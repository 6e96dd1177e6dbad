use crate::foundation::error::{MarqueeError, MarqueeResult};

/// Engine lifecycle.
///
/// `Uninitialized -> Loading -> Ready -> Running <-> Paused`, and any state
/// but `ShutDown` may shut down. `Loading -> Loading` is a retried load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Running,
    Paused,
    ShutDown,
}

impl EngineState {
    pub fn can_transition_to(self, next: EngineState) -> bool {
        use EngineState::*;
        matches!(
            (self, next),
            (Uninitialized, Loading)
                | (Loading, Loading)
                | (Loading, Ready)
                | (Ready, Running)
                | (Running, Paused)
                | (Paused, Running)
        ) || (self != ShutDown && next == ShutDown)
    }

    /// Checked transition; illegal moves are configuration errors.
    pub fn transition(&mut self, next: EngineState) -> MarqueeResult<()> {
        if !self.can_transition_to(next) {
            return Err(MarqueeError::config(format!(
                "illegal engine transition {self:?} -> {next:?}"
            )));
        }
        tracing::debug!(from = ?*self, to = ?next, "engine state");
        *self = next;
        Ok(())
    }

    /// Ticks happen only while running.
    pub fn is_active(self) -> bool {
        self == EngineState::Running
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/state.rs"]
mod tests;
