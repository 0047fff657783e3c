//! 错误类型
//!
//! 规则查询（走法合法性、吃子枚举）从不报错，只返回 bool 或空列表；
//! 这里只覆盖解析、配置和对局会话这些会失败的入口。

use crate::types::{Color, Move, Position};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid move string: {0}")]
    InvalidMove(String),

    #[error("invalid board dimensions {rows}x{cols} (each must be in {min}..={max})")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        min: usize,
        max: usize,
    },

    #[error("game is already over")]
    GameOver,

    #[error("no {color} piece at {position}")]
    NotYourPiece { color: Color, position: Position },

    #[error("illegal move {0}")]
    IllegalMove(Move),

    #[error("a capture is available, {0} is not one of them")]
    CaptureRequired(Move),

    #[error("unknown strategy: {0}. Available: {1}")]
    UnknownStrategy(String, &'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
