//! FEN 解析和生成
//!
//! 格式: `<棋盘> <回合>`
//!
//! 棋盘从第 0 行（黑方底线）写到最后一行，行之间用 `/` 分隔：
//! - 黑子：b
//! - 白子：w
//! - 空格：数字（可以是多位数）
//!
//! 回合：`b` 或 `w`。棋盘尺寸由行数和每行宽度推出。

use crate::board::Board;
use crate::error::{Error, Result};
use crate::types::{BoardConfig, Cell, Color, Move, Position};

/// FEN 解析后的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenState {
    pub board: Board,
    pub turn: Color,
}

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<FenState> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(Error::InvalidFen(format!(
            "expected '<board> <turn>', got: {}",
            fen
        )));
    }

    let rows = parse_board(parts[0])?;
    let turn = match parts[1] {
        "b" => Color::Black,
        "w" => Color::White,
        other => return Err(Error::InvalidFen(format!("invalid turn: {}", other))),
    };

    let cols = rows[0].len();
    let config = BoardConfig::new(rows.len(), cols)?;
    let mut board = Board::empty(config);
    for (row, cells) in rows.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            board.set(Position::new(row as i8, col as i8), cell);
        }
    }

    Ok(FenState { board, turn })
}

/// 解析棋盘字符串，返回每行的格子
fn parse_board(board_str: &str) -> Result<Vec<Vec<Cell>>> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for (row_idx, row_str) in board_str.split('/').enumerate() {
        let mut cells = Vec::new();
        let mut empty_run = String::new();

        for ch in row_str.chars() {
            if ch.is_ascii_digit() {
                empty_run.push(ch);
                continue;
            }
            flush_empty_run(&mut empty_run, &mut cells)?;
            let color = Color::from_fen_char(ch).ok_or_else(|| {
                Error::InvalidFen(format!("invalid character in row {}: {}", row_idx, ch))
            })?;
            cells.push(color.cell());
        }
        flush_empty_run(&mut empty_run, &mut cells)?;

        if let Some(first) = rows.first() {
            let expected = first.len();
            if cells.len() != expected {
                return Err(Error::InvalidFen(format!(
                    "row {} has {} columns, expected {}",
                    row_idx,
                    cells.len(),
                    expected
                )));
            }
        }
        rows.push(cells);
    }

    Ok(rows)
}

fn flush_empty_run(run: &mut String, cells: &mut Vec<Cell>) -> Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    let count: usize = run
        .parse()
        .map_err(|_| Error::InvalidFen(format!("invalid empty count: {}", run)))?;
    if count == 0 || count > BoardConfig::MAX_SIDE {
        return Err(Error::InvalidFen(format!("invalid empty count: {}", run)));
    }
    cells.extend(std::iter::repeat(Cell::Empty).take(count));
    run.clear();
    Ok(())
}

/// 生成 FEN 字符串
pub fn to_fen(board: &Board, turn: Color) -> String {
    let config = board.config();
    let mut rows = Vec::with_capacity(config.rows);

    for row in 0..config.rows as i8 {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for col in 0..config.cols as i8 {
            match board.cell(Position::new(row, col)).color() {
                Some(color) => {
                    if empty_count > 0 {
                        row_str.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_str.push(color.to_fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }
        rows.push(row_str);
    }

    format!("{} {}", rows.join("/"), turn.to_fen_char())
}

/// 在 FEN 上执行走法，返回新的 FEN
///
/// 校验顺序与对局会话相同：起点必须是轮到的一方的棋子，
/// 走法几何必须合法（终点在棋盘内且为空），有吃子时必须吃子。
pub fn apply_move_to_fen(fen: &str, move_str: &str) -> Result<String> {
    let state = parse_fen(fen)?;
    let mv = Move::from_notation(move_str)?;

    if state.board.cell(mv.from) != state.turn.cell() {
        return Err(Error::NotYourPiece {
            color: state.turn,
            position: mv.from,
        });
    }
    if !state.board.is_legal(mv.from, mv.to, state.turn) {
        return Err(Error::IllegalMove(mv));
    }
    if !state.board.is_playable(&mv, state.turn) {
        return Err(Error::CaptureRequired(mv));
    }

    let board = state.board.apply_move(&mv);
    Ok(to_fen(&board, state.turn.opposite()))
}
