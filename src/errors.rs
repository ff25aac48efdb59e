//! Errors used throughout the crate.
//!
//! `ChessError` covers recoverable input failures (FEN text, square names).
//! `SearchError` covers precondition violations inside the search tree;
//! those indicate a defect in tree construction and are never retried.
//!
//! Illegal requested moves, invalid sense squares and clock timeouts are not
//! errors: the game engine resolves them to ordinary values.

use thiserror::Error;

/// Unified error type for parsing and rules-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The provided FEN string could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square name or index was outside the board.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A search failed its own invariants.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Fatal search-tree precondition violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// UCT was requested for a node that has never been visited.
    #[error("UCT evaluated on node {0} with zero visits")]
    UnvisitedNode(usize),

    /// A node index did not refer to a live node in the arena.
    #[error("node index {0} is not in the search tree")]
    MissingNode(usize),
}

pub type ChessResult<T> = Result<T, ChessError>;
