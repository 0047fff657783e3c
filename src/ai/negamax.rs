//! Negamax 搜索（带 Alpha-Beta 剪枝）和根节点选步
//!
//! color 乘数：+1 表示轮白方走，-1 表示轮黑方走，见 `Color::sign`。
//! 每个子节点都在新的棋盘副本上搜索。

use super::eval::evaluate;
use super::{sort_and_truncate, AIConfig, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::types::{Color, Move};
use log::{debug, trace};

/// 搜索窗口的无穷大，取负不会溢出
pub const INFINITY: i32 = 1_000_000_000;

/// 无路可走判负的分数，远大于任何静态评估
pub const WIN_SCORE: i32 = 100_000;

/// 搜索配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// 每个节点都执行有吃必吃；关闭时只在根节点执行
    pub mandatory_capture: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            mandatory_capture: true,
        }
    }
}

/// 根节点搜索结果
#[derive(Debug, Clone)]
pub struct RootSearch {
    pub best: Option<Move>,
    pub score: Option<i32>,
    /// 每个候选走法的分数，按生成顺序
    pub scored: Vec<ScoredMove>,
    pub nodes: u64,
}

/// Negamax 搜索器
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
    nodes: u64,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Searcher { config, nodes: 0 }
    }

    /// 已访问的节点数
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn moves_for(&self, board: &Board, side: Color) -> Vec<Move> {
        if self.config.mandatory_capture {
            board.legal_moves(side)
        } else {
            board.all_moves_for(side)
        }
    }

    /// Negamax 搜索，返回轮到的一方视角的分数
    pub fn negamax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        color: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return color * evaluate(board);
        }

        let side = Color::from_sign(color);
        let moves = self.moves_for(board, side);

        // 无路可走：轮到的一方判负，越早被堵死分数越低
        if moves.is_empty() {
            return -(WIN_SCORE + depth as i32);
        }

        let mut max_score = -INFINITY;
        for (i, mv) in moves.iter().enumerate() {
            let child = board.apply_move(mv);
            let score = -self.negamax(&child, depth - 1, -beta, -alpha, -color);

            max_score = max_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                trace!(
                    "cutoff at depth {} after {}/{} moves",
                    depth,
                    i + 1,
                    moves.len()
                );
                break;
            }
        }
        max_score
    }

    /// 根节点搜索：有吃必吃，逐个候选走法用全窗口搜索
    ///
    /// 分数严格更大才替换，同分保留先出现的走法。
    pub fn search_root(&mut self, board: &Board, player: Color, depth: u32) -> RootSearch {
        let start_nodes = self.nodes;
        let color = player.sign();
        let child_depth = depth.max(1) - 1;

        let captures = board.captures_for(player);
        let candidates = if captures.is_empty() {
            board.all_moves_for(player)
        } else {
            captures
        };

        let mut best = None;
        let mut best_score = None;
        let mut scored = Vec::with_capacity(candidates.len());

        for mv in candidates {
            let child = board.apply_move(&mv);
            let score = -self.negamax(&child, child_depth, -INFINITY, INFINITY, -color);
            debug!("{} {}: {}", player, mv, score);

            if best_score.map_or(true, |s| score > s) {
                best_score = Some(score);
                best = Some(mv);
            }
            scored.push(ScoredMove { mv, score });
        }

        let nodes = self.nodes - start_nodes;
        match best {
            Some(mv) => debug!(
                "{} best {} score {} (depth {}, {} nodes)",
                player,
                mv,
                best_score.unwrap_or_default(),
                depth,
                nodes
            ),
            None => debug!("{} has no legal move", player),
        }

        RootSearch {
            best,
            score: best_score,
            scored,
            nodes,
        }
    }
}

/// 为 `player` 选择走法，无合法走法时返回 None
pub fn choose_move(board: &Board, player: Color, depth: u32) -> Option<Move> {
    Searcher::default().search_root(board, player, depth).best
}

/// Negamax AI
pub struct NegamaxAI {
    depth: u32,
    search: SearchConfig,
}

impl NegamaxAI {
    pub fn new(config: &AIConfig) -> Self {
        NegamaxAI {
            depth: config.depth,
            search: SearchConfig {
                mandatory_capture: config.mandatory_capture,
            },
        }
    }

    /// 根节点搜索（带节点统计）
    pub fn search(&self, board: &Board, player: Color) -> RootSearch {
        Searcher::new(self.search).search_root(board, player, self.depth)
    }
}

impl AIStrategy for NegamaxAI {
    fn name(&self) -> &'static str {
        "negamax"
    }

    fn select_moves(&self, board: &Board, player: Color, n: usize) -> Vec<ScoredMove> {
        let mut scored = self.search(board, player).scored;
        sort_and_truncate(&mut scored, n);
        scored
    }

    fn select_best_move(&self, board: &Board, player: Color) -> Option<Move> {
        self.search(board, player).best
    }
}
