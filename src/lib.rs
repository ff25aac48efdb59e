//! Crate root module declarations for the reconnaissance chess engine.
//!
//! Exposes the bitboard rules library (game state, attack tables, move
//! generation), the referee (`recon`), the tree search, the player
//! implementations and the local game runner.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod attacks;
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_shared;
    pub mod move_generator;
    pub mod perft;
    pub mod pseudo_legal_moves;
}

pub mod recon {
    pub mod clock;
    pub mod game;
    pub mod move_revision;
    pub mod sense;
}

pub mod search {
    pub mod mcts_config;
    pub mod mcts_node;
    pub mod mcts_search;
    pub mod mcts_tree;
}

pub mod players {
    pub mod mcts_player;
    pub mod player_trait;
    pub mod random_player;
    pub mod time_management;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod game_runner;
    pub mod render_game_state;
}
