//! 随机 AI 策略

use super::{sort_and_truncate, AIStrategy, ScoredMove};
use crate::board::Board;
use crate::types::Color;
use rand::prelude::*;
use std::cell::RefCell;

/// 随机 AI - 在合法走法（已执行有吃必吃）中随机选择
///
/// 用作自对弈的基准对手；同一个种子给出同样的对局。
pub struct RandomAI {
    rng: RefCell<StdRng>,
}

impl RandomAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        RandomAI {
            rng: RefCell::new(rng),
        }
    }
}

impl AIStrategy for RandomAI {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_moves(&self, board: &Board, player: Color, n: usize) -> Vec<ScoredMove> {
        let moves = board.legal_moves(player);
        let mut rng = self.rng.borrow_mut();

        let mut scored: Vec<ScoredMove> = moves
            .into_iter()
            .map(|mv| ScoredMove {
                mv,
                score: rng.gen_range(0..1000),
            })
            .collect();

        sort_and_truncate(&mut scored, n);
        scored
    }
}
