//! Load state of a list screen, as an explicit state machine.
//!
//! ```text
//! Idle ──Load──► Loading ──Loaded──► Ready
//!                   │                  │
//!                   └──Failed──► Errored
//!
//! Ready / Errored ──Load──► Loading   (page change, reload after a mutation)
//! ```

use rust_fsm::*;
use serde::Serialize;
use tracing::{debug, warn};

state_machine! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub list_machine(Idle)

    Idle => {
        Load => Loading
    },
    Loading => {
        Loaded => Ready,
        Failed => Errored
    },
    Ready => {
        Load => Loading
    },
    Errored => {
        Load => Loading
    }
}

pub use list_machine::Input as ListMachineInput;
pub use list_machine::State as ListMachineState;
pub use list_machine::StateMachine as ListMachine;

/// Load state for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListState {
    Idle,
    Loading,
    Ready,
    Errored,
}

impl From<&ListMachineState> for ListState {
    fn from(state: &ListMachineState) -> Self {
        match state {
            ListMachineState::Idle => ListState::Idle,
            ListMachineState::Loading => ListState::Loading,
            ListMachineState::Ready => ListState::Ready,
            ListMachineState::Errored => ListState::Errored,
        }
    }
}

/// A screen's state machine plus its name for logs.
pub struct ListPhase {
    screen: &'static str,
    machine: ListMachine,
}

impl ListPhase {
    pub fn new(screen: &'static str) -> Self {
        Self {
            screen,
            machine: ListMachine::new(),
        }
    }

    pub fn state(&self) -> ListState {
        ListState::from(self.machine.state())
    }

    pub fn begin(&mut self) -> bool {
        self.apply(&ListMachineInput::Load)
    }

    pub fn succeed(&mut self) -> bool {
        self.apply(&ListMachineInput::Loaded)
    }

    pub fn fail(&mut self) -> bool {
        self.apply(&ListMachineInput::Failed)
    }

    /// Returns false (and keeps the state) when the input is not valid here.
    fn apply(&mut self, input: &ListMachineInput) -> bool {
        let old_state = self.state();
        if self.machine.consume(input).is_err() {
            warn!(
                screen = self.screen,
                state = ?old_state,
                input = ?input,
                "Ignoring invalid list transition"
            );
            return false;
        }
        debug!(
            screen = self.screen,
            old_state = ?old_state,
            new_state = ?self.state(),
            "List state transition"
        );
        true
    }
}

impl std::fmt::Debug for ListPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListPhase")
            .field("screen", &self.screen)
            .field("state", &self.state())
            .finish()
    }
}
