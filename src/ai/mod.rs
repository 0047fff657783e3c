//! AI 策略模块
//!
//! 核心是 negamax + alpha-beta 搜索；随机策略用作自对弈的基准对手

pub mod eval;
mod negamax;
mod random;

pub use eval::{evaluate, evaluate_for};
pub use negamax::{
    choose_move, NegamaxAI, RootSearch, SearchConfig, Searcher, INFINITY, WIN_SCORE,
};
pub use random::RandomAI;

use crate::board::Board;
use crate::error::{Error, Result};
use crate::fen::parse_fen;
use crate::types::{Color, Move};
use std::cmp::Reverse;

/// 可用的策略名
pub const AVAILABLE_STRATEGIES: &str = "negamax, random";

/// 默认策略
pub const DEFAULT_STRATEGY: &str = "negamax";

/// AI 配置
#[derive(Debug, Clone)]
pub struct AIConfig {
    /// 搜索深度
    pub depth: u32,
    /// 随机种子
    pub seed: Option<u64>,
    /// 搜索树内部也执行有吃必吃
    pub mandatory_capture: bool,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            depth: 3,
            seed: None,
            mandatory_capture: true,
        }
    }
}

/// 走法评分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// AI 策略接口
pub trait AIStrategy {
    fn name(&self) -> &'static str;

    /// 选择走法（返回带评分的走法列表，分数从高到低）
    fn select_moves(&self, board: &Board, player: Color, n: usize) -> Vec<ScoredMove>;

    /// 选择最佳走法
    fn select_best_move(&self, board: &Board, player: Color) -> Option<Move> {
        self.select_moves(board, player, 1).first().map(|sm| sm.mv)
    }
}

/// 排序辅助函数：稳定排序，同分保持生成顺序
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, n: usize) {
    scored.sort_by_key(|sm| Reverse(sm.score));
    scored.truncate(n);
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建随机 AI
    pub fn random(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(RandomAI::new(seed)),
        }
    }

    /// 创建 negamax AI
    pub fn negamax(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(NegamaxAI::new(config)),
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &AIConfig) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "negamax" | "minimax" | "alphabeta" => Ok(Self::negamax(config)),
            "random" => Ok(Self::random(config.seed)),
            _ => Err(Error::UnknownStrategy(
                name.to_string(),
                AVAILABLE_STRATEGIES,
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn select_moves(&self, board: &Board, player: Color, n: usize) -> Vec<ScoredMove> {
        self.strategy.select_moves(board, player, n)
    }

    pub fn select_best_move(&self, board: &Board, player: Color) -> Option<Move> {
        self.strategy.select_best_move(board, player)
    }

    /// 从 FEN 选择走法（返回带评分的走法字符串）
    pub fn select_moves_fen(&self, fen: &str, n: usize) -> Result<Vec<(String, i32)>> {
        let state = parse_fen(fen)?;
        let moves = self.strategy.select_moves(&state.board, state.turn, n);
        Ok(moves
            .into_iter()
            .map(|sm| (sm.mv.to_notation(), sm.score))
            .collect())
    }

    /// 从 FEN 选择最佳走法
    pub fn select_best_move_fen(&self, fen: &str) -> Result<Option<String>> {
        let state = parse_fen(fen)?;
        Ok(self
            .strategy
            .select_best_move(&state.board, state.turn)
            .map(|m| m.to_notation()))
    }
}
