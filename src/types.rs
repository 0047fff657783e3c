//! Fianco 核心类型定义
//!
//! 定义棋盘尺寸、格子状态、阵营、坐标和走法

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 棋盘尺寸
///
/// 尺寸作为值传给每个组件，而不是全局常量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl BoardConfig {
    /// 最小边长
    pub const MIN_SIDE: usize = 5;
    /// 最大边长（列用单个字母表示）
    pub const MAX_SIDE: usize = 26;

    /// 标准 9x9 棋盘
    pub const STANDARD: BoardConfig = BoardConfig { rows: 9, cols: 9 };

    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let range = Self::MIN_SIDE..=Self::MAX_SIDE;
        if !range.contains(&rows) || !range.contains(&cols) {
            return Err(Error::InvalidDimensions {
                rows,
                cols,
                min: Self::MIN_SIDE,
                max: Self::MAX_SIDE,
            });
        }
        Ok(BoardConfig { rows, cols })
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    /// 最后一行（白方底线）
    #[inline]
    pub fn last_row(&self) -> i8 {
        self.rows as i8 - 1
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// negamax 的 color 乘数：白方 +1，黑方 -1
    ///
    /// 评估函数正分有利白方，两边必须用同一张表。
    #[inline]
    pub fn sign(&self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// `sign` 的逆映射，非正数视为黑方
    #[inline]
    pub fn from_sign(sign: i32) -> Color {
        if sign > 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// 前进方向的行增量：黑方向下（行号增大），白方向上
    #[inline]
    pub fn forward(&self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// 己方底线
    pub fn home_row(&self, config: &BoardConfig) -> i8 {
        match self {
            Color::Black => 0,
            Color::White => config.last_row(),
        }
    }

    /// 目标行（对方底线），到达即获胜
    pub fn goal_row(&self, config: &BoardConfig) -> i8 {
        self.opposite().home_row(config)
    }

    /// 对应的格子状态
    pub fn cell(&self) -> Cell {
        match self {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'b' => Some(Color::Black),
            'w' => Some(Color::White),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::Black => 'b',
            Color::White => 'w',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// 格子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// 格子上棋子的阵营，空格为 None
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'b',
            Cell::White => 'w',
        }
    }
}

/// 棋盘位置 (row, col)
///
/// row: 0 是黑方底线，最后一行是白方底线
/// col: 从左到右
///
/// 使用有符号整数，越界的探测位置也能表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// 位置加偏移量
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Position {
        Position {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 转换为记谱（如 "d5"）：列字母 + 行号
    pub fn to_notation(&self) -> String {
        let col_char = (b'a' + self.col as u8) as char;
        format!("{}{}", col_char, self.row)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// 从记谱解析（如 "d5"，行号可以是多位数）
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let col = match chars.next() {
            Some(c @ 'a'..='z') => (c as u8 - b'a') as i8,
            _ => return Err(Error::InvalidPosition(s.to_string())),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidPosition(s.to_string()));
        }
        let row: i8 = digits
            .parse()
            .map_err(|_| Error::InvalidPosition(s.to_string()))?;
        Ok(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// 行距为 2 即为吃子
    #[inline]
    pub fn is_capture(&self) -> bool {
        (self.from.row - self.to.row).abs() == 2
    }

    /// 被吃棋子的位置（起点与终点的中点）
    pub fn captured_position(&self) -> Option<Position> {
        if self.is_capture() {
            Some(Position::new(
                (self.from.row + self.to.row) / 2,
                (self.from.col + self.to.col) / 2,
            ))
        } else {
            None
        }
    }

    /// 从记谱解析（如 "d5f3"）
    pub fn from_notation(s: &str) -> Result<Move> {
        let s = s.trim();
        // 第二个坐标从第二个字母开始
        let split = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_lowercase())
            .map(|(i, _)| i)
            .ok_or_else(|| Error::InvalidMove(s.to_string()))?;
        let from = s[..split]
            .parse()
            .map_err(|_| Error::InvalidMove(s.to_string()))?;
        let to = s[split..]
            .parse()
            .map_err(|_| Error::InvalidMove(s.to_string()))?;
        Ok(Move { from, to })
    }

    /// 转换为记谱
    pub fn to_notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Move::from_notation(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Ongoing,
    BlackWin,
    WhiteWin,
}

impl GameResult {
    pub fn win_for(color: Color) -> GameResult {
        match color {
            Color::Black => GameResult::BlackWin,
            Color::White => GameResult::WhiteWin,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::Ongoing => None,
            GameResult::BlackWin => Some(Color::Black),
            GameResult::WhiteWin => Some(Color::White),
        }
    }

    pub fn is_over(&self) -> bool {
        *self != GameResult::Ongoing
    }
}
