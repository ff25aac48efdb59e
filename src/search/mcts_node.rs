//! Arena node for the search tree.

use crate::game_state::{chess_types::*, game_state::GameState};

#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Board after `action` was applied to the parent's board.
    pub state: GameState,
    /// Side to act at this node.
    pub mover: Color,
    /// Actions not yet expanded into children.
    pub untried: Vec<Move>,
    /// Arena indices of child nodes, in expansion order.
    pub children: Vec<usize>,
    pub visits: u32,
    pub wins: f64,
    /// `None` only for the root.
    pub parent: Option<usize>,
    /// Action that led here from the parent.
    pub action: Option<Move>,
}

impl MctsNode {
    pub fn root(state: GameState, mover: Color, untried: Vec<Move>) -> Self {
        Self {
            state,
            mover,
            untried,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            parent: None,
            action: None,
        }
    }

    pub fn child(state: GameState, mover: Color, untried: Vec<Move>, parent: usize, action: Move) -> Self {
        Self {
            state,
            mover,
            untried,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            parent: Some(parent),
            action: Some(action),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Mean score; zero before the first visit.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / f64::from(self.visits)
        }
    }
}
