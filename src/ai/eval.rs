//! 局面评估
//!
//! 纯行距启发：白子在第 r 行得 r 分，黑子在第 r 行得 (rows - r) 分，
//! 结果为白方得分减黑方得分，正分有利白方。
//! 评估不知道轮到谁走，调用方用 `Color::sign` 换算视角。

use crate::board::Board;
use crate::types::Color;

/// 静态评估（白方视角）
pub fn evaluate(board: &Board) -> i32 {
    let rows = board.config().rows as i32;

    let white: i32 = board.pieces(Color::White).map(|pos| pos.row as i32).sum();
    let black: i32 = board
        .pieces(Color::Black)
        .map(|pos| rows - pos.row as i32)
        .sum();

    white - black
}

/// 静态评估（指定一方视角）
#[inline]
pub fn evaluate_for(board: &Board, color: Color) -> i32 {
    color.sign() * evaluate(board)
}
