//! Fianco AI Engine
//!
//! Fianco 规则引擎与 negamax AI - 支持 FEN 输入输出

pub mod ai;
pub mod board;
pub mod error;
pub mod fen;
pub mod game;
pub mod test_positions;
pub mod types;

pub use ai::{
    choose_move, evaluate, evaluate_for, AIConfig, AIEngine, AIStrategy, NegamaxAI, RandomAI,
    RootSearch, ScoredMove, SearchConfig, Searcher, AVAILABLE_STRATEGIES, DEFAULT_STRATEGY,
};
pub use board::{get_legal_moves_from_fen, Board};
pub use error::{Error, Result};
pub use fen::{apply_move_to_fen, parse_fen, to_fen, FenState};
pub use game::Game;
pub use types::{BoardConfig, Cell, Color, GameResult, Move, Position};
