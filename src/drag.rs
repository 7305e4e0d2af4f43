//! Pointer-drag state machine for a single table node.
//!
//! The controller never touches the diagram. It only turns pointer
//! coordinates into the position the owning view should apply.

use crate::model::Position;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` is the pointer position minus the node's top-left corner at
    /// pointer-down time.
    Dragging { offset: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// End the drag when the pointer leaves the node. A fast drag can exit
    /// the node before pointer-up arrives and stop short; turn this off when
    /// pointer moves are routed from the whole canvas.
    pub release_on_leave: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            release_on_leave: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    config: DragConfig,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            state: DragState::Idle,
            config,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn pointer_down(&mut self, pointer: Position, node: Position) {
        self.state = DragState::Dragging {
            offset: pointer - node,
        };
    }

    /// Position the node should move to, or `None` while idle. Every move
    /// while dragging yields a position.
    pub fn pointer_move(&mut self, pointer: Position) -> Option<Position> {
        match self.state {
            DragState::Dragging { offset } => Some(pointer - offset),
            DragState::Idle => None,
        }
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        if self.config.release_on_leave && self.is_dragging() {
            log::debug!("Drag released by pointer leaving the node");
            self.state = DragState::Idle;
        }
    }
}
