//! Arena-backed search tree: UCT scoring, selection, expansion and
//! backpropagation.
//!
//! Nodes live in one `Vec` and refer to each other by index. Index 0 is the
//! root. Parents are plain indices, so the tree has a single owner and can
//! be scanned flat.

use rand::Rng;

use crate::errors::SearchError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::play_move;
use crate::move_generation::move_generator::{MoveGenerator, PseudoLegalMoveGenerator};
use crate::search::mcts_node::MctsNode;

pub const ROOT: usize = 0;

#[derive(Debug, Clone)]
pub struct MctsTree {
    pub nodes: Vec<MctsNode>,
}

impl MctsTree {
    pub fn new(root_state: GameState, mover: Color, root_actions: Vec<Move>) -> Self {
        Self {
            nodes: vec![MctsNode::root(root_state, mover, root_actions)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, index: usize) -> Result<&MctsNode, SearchError> {
        self.nodes.get(index).ok_or(SearchError::MissingNode(index))
    }

    #[inline]
    pub fn root(&self) -> Result<&MctsNode, SearchError> {
        self.node(ROOT)
    }

    /// `wins / visits + c * sqrt(ln(N) / visits)`, with `N` the parent's
    /// visit count, or the node's own for the root.
    pub fn uct(&self, index: usize, exploration: f64) -> Result<f64, SearchError> {
        let node = self.node(index)?;
        if node.visits == 0 {
            return Err(SearchError::UnvisitedNode(index));
        }

        let reference_visits = match node.parent {
            Some(parent) => self.node(parent)?.visits,
            None => node.visits,
        };
        let visits = f64::from(node.visits);
        let exploit = node.wins / visits;
        let explore = exploration * (f64::from(reference_visits).ln() / visits).sqrt();
        Ok(exploit + explore)
    }

    /// Node to expand next.
    ///
    /// A childless root is returned directly. Otherwise every node in the
    /// tree is scored, not just one root-to-leaf path, and the first node
    /// with the strictly highest positive UCT wins; the root is the fallback.
    pub fn select(&self, exploration: f64) -> Result<usize, SearchError> {
        if self.root()?.children.is_empty() {
            return Ok(ROOT);
        }

        let mut selected = ROOT;
        let mut best = 0.0;
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            let score = self.uct(index, exploration)?;
            if score > best {
                best = score;
                selected = index;
            }
            stack.extend_from_slice(&self.node(index)?.children);
        }
        Ok(selected)
    }

    /// Expand one untried action of `index` (a pass once none remain) into a
    /// new child and return the child's index.
    pub fn expand<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Result<usize, SearchError> {
        let child_index = self.nodes.len();
        let node = self.nodes.get_mut(index).ok_or(SearchError::MissingNode(index))?;

        let action = if node.untried.is_empty() {
            Move::NULL
        } else {
            let pick = rng.random_range(0..node.untried.len());
            node.untried.swap_remove(pick)
        };
        node.children.push(child_index);

        let (state, _) = play_move(&node.state, action);
        let mover = node.mover.opposite();
        let untried = PseudoLegalMoveGenerator.generate_bare_moves(&state);

        self.nodes
            .push(MctsNode::child(state, mover, untried, index, action));
        Ok(child_index)
    }

    /// Record `result` (scored for `perspective`) from `index` up to the root.
    ///
    /// Nodes where `perspective` is to act add the result as is; the others
    /// add its complement.
    pub fn backpropagate(&mut self, index: usize, result: f64, perspective: Color) -> Result<(), SearchError> {
        let mut current = Some(index);
        while let Some(i) = current {
            let node = self.nodes.get_mut(i).ok_or(SearchError::MissingNode(i))?;
            node.visits += 1;
            node.wins += if node.mover == perspective { result } else { 1.0 - result };
            current = node.parent;
        }
        Ok(())
    }

    /// Root child with the lowest win rate.
    ///
    /// Children store scores from the opponent's side, so the lowest rate
    /// is the reply the opponent likes least.
    pub fn best_child(&self) -> Option<&MctsNode> {
        let root = self.nodes.first()?;
        let mut best: Option<&MctsNode> = None;
        for &child in &root.children {
            let Some(node) = self.nodes.get(child) else {
                continue;
            };
            if node.visits == 0 {
                continue;
            }
            if best.map_or(true, |b| node.win_rate() < b.win_rate()) {
                best = Some(node);
            }
        }
        best
    }
}
