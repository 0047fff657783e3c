//! Fianco 棋盘
//!
//! 棋盘本身只是格子数据；走子返回新棋盘，原棋盘不变，
//! 搜索中兄弟分支之间不会互相看到对方的走法。
//!
//! 走法规则和终局判断也在这里，AI 和对局会话共用同一份规则。

use crate::fen::parse_fen;
use crate::types::{BoardConfig, Cell, Color, GameResult, Move, Position};
use std::fmt;

/// 非吃子探测方向：上、下、左、右（后退会被合法性检查拒绝）
const STEP_OFFSETS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    config: BoardConfig,
    /// rows * cols 个格子，按行存储
    cells: Vec<Cell>,
}

impl Board {
    /// 空棋盘
    pub fn empty(config: BoardConfig) -> Board {
        Board {
            config,
            cells: vec![Cell::Empty; config.cell_count()],
        }
    }

    /// 初始局面：底线一整排，外加向中间收拢的斜线阵型，双方镜像
    pub fn initial(config: BoardConfig) -> Board {
        let mut board = Board::empty(config);
        let depth = (config.cols / 2)
            .saturating_sub(1)
            .min(config.rows.saturating_sub(2) / 2) as i8;
        let last_col = config.cols as i8 - 1;

        for color in [Color::Black, Color::White] {
            let home = color.home_row(&config);
            for col in 0..config.cols as i8 {
                board.set(Position::new(home, col), color.cell());
            }
            for step in 1..=depth {
                let row = home + step * color.forward();
                board.set(Position::new(row, step), color.cell());
                board.set(Position::new(row, last_col - step), color.cell());
            }
        }

        board
    }

    /// 标准 9x9 初始局面
    pub fn standard() -> Board {
        Board::initial(BoardConfig::STANDARD)
    }

    /// 从 FEN 字符串创建棋盘（忽略回合字段）
    pub fn from_fen(fen: &str) -> crate::error::Result<Board> {
        Ok(parse_fen(fen)?.board)
    }

    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.config.contains(pos) {
            Some(pos.row as usize * self.config.cols + pos.col as usize)
        } else {
            None
        }
    }

    /// 获取某位置的格子，越界返回 None
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// 获取某位置的格子，越界视为空
    #[inline]
    pub fn cell(&self, pos: Position) -> Cell {
        self.get(pos).unwrap_or(Cell::Empty)
    }

    /// 设置格子，越界忽略
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// 放置一个棋子（构造局面用）
    pub fn with_piece(mut self, pos: Position, color: Color) -> Board {
        self.set(pos, color.cell());
        self
    }

    /// 所有位置，行优先
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.config.cols as i8;
        (0..self.config.rows as i8)
            .flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// 某方所有棋子的位置，行优先
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .filter(move |&pos| self.cell(pos) == color.cell())
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color.cell()).count()
    }

    pub fn total_pieces(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// 执行走法，返回新棋盘
    ///
    /// 不检查合法性：终点取起点的棋子，起点清空，吃子时清空中点。
    pub fn apply_move(&self, mv: &Move) -> Board {
        let mut next = self.clone();
        let moving = next.cell(mv.from);
        next.set(mv.to, moving);
        next.set(mv.from, Cell::Empty);
        if let Some(mid) = mv.captured_position() {
            next.set(mid, Cell::Empty);
        }
        next
    }

    /// 单步走法是否合法
    ///
    /// 非吃子：同行横移一格，或同列向前一格。
    /// 吃子：向前斜跳两格，中点必须是对方棋子。
    pub fn is_legal(&self, from: Position, to: Position, player: Color) -> bool {
        if !self.config.contains(from) {
            return false;
        }
        // 终点必须在棋盘内且为空
        if self.get(to) != Some(Cell::Empty) {
            return false;
        }

        let dr = to.row - from.row;
        let dc = to.col - from.col;
        let forward = player.forward();

        if dr == 0 && dc.abs() == 1 {
            return true;
        }
        if dc == 0 && dr == forward {
            return true;
        }
        if dr == 2 * forward && dc.abs() == 2 {
            let mid = from.offset(forward, dc / 2);
            return self.cell(mid).color() == Some(player.opposite());
        }

        false
    }

    /// 某方所有吃子走法（只探测两个向前的斜跳）
    pub fn captures_for(&self, player: Color) -> Vec<Move> {
        let jump = 2 * player.forward();
        let mut moves = Vec::new();
        for from in self.pieces(player) {
            for dc in [2, -2] {
                let to = from.offset(jump, dc);
                if self.is_legal(from, to, player) {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// 某方所有走法（含吃子，不做强制吃子过滤）
    pub fn all_moves_for(&self, player: Color) -> Vec<Move> {
        let jump = 2 * player.forward();
        let mut moves = Vec::with_capacity(32);
        for from in self.pieces(player) {
            let probes = STEP_OFFSETS.iter().copied().chain([(jump, -2), (jump, 2)]);
            for (dr, dc) in probes {
                let to = from.offset(dr, dc);
                if self.is_legal(from, to, player) {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// 合法走法：有吃子时只能吃子
    pub fn legal_moves(&self, player: Color) -> Vec<Move> {
        let captures = self.captures_for(player);
        if captures.is_empty() {
            self.all_moves_for(player)
        } else {
            captures
        }
    }

    /// 某走法在强制吃子规则下是否可走
    pub fn is_playable(&self, mv: &Move, player: Color) -> bool {
        self.cell(mv.from) == player.cell() && self.legal_moves(player).contains(mv)
    }

    fn row_has(&self, row: i8, cell: Cell) -> bool {
        (0..self.config.cols as i8).any(|col| self.cell(Position::new(row, col)) == cell)
    }

    /// 到达对方底线的一方获胜；白方先判断
    pub fn winner(&self) -> Option<Color> {
        if self.row_has(Color::White.goal_row(&self.config), Cell::White) {
            return Some(Color::White);
        }
        if self.row_has(Color::Black.goal_row(&self.config), Cell::Black) {
            return Some(Color::Black);
        }
        None
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// 判断游戏结果
    ///
    /// 先看是否有人到达目标行；否则轮到的一方无路可走即判负。
    pub fn game_result(&self, to_move: Color) -> GameResult {
        if let Some(color) = self.winner() {
            return GameResult::win_for(color);
        }
        if self.all_moves_for(to_move).is_empty() {
            return GameResult::win_for(to_move.opposite());
        }
        GameResult::Ongoing
    }

    /// 获取所有合法走法（字符串格式）
    pub fn legal_moves_str(&self, player: Color) -> Vec<String> {
        self.legal_moves(player)
            .iter()
            .map(|m| m.to_notation())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.config.cols {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..self.config.rows as i8 {
            write!(f, "{:>3}", row)?;
            for col in 0..self.config.cols as i8 {
                write!(f, " {}", self.cell(Position::new(row, col)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// 从 FEN 获取轮到的一方的所有合法走法
pub fn get_legal_moves_from_fen(fen: &str) -> crate::error::Result<Vec<String>> {
    let state = parse_fen(fen)?;
    Ok(state.board.legal_moves_str(state.turn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;
    use rand::prelude::*;

    fn p(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn empty() -> Board {
        Board::empty(BoardConfig::STANDARD)
    }

    /// 随机对弈若干步，收集途经的局面
    fn random_playout(seed: u64, max_plies: usize) -> Vec<(Board, Color)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::standard();
        let mut turn = Color::White;
        let mut seen = Vec::new();
        for _ in 0..max_plies {
            seen.push((board.clone(), turn));
            if board.game_result(turn).is_over() {
                break;
            }
            let moves = board.legal_moves(turn);
            let mv = moves.choose(&mut rng).copied().unwrap();
            board = board.apply_move(&mv);
            turn = turn.opposite();
        }
        seen
    }

    #[test]
    fn test_initial_board() {
        let board = Board::standard();
        assert_eq!(board.piece_count(Color::Black), 15);
        assert_eq!(board.piece_count(Color::White), 15);
        assert_eq!(board.cell(p(0, 4)), Cell::Black);
        assert_eq!(board.cell(p(3, 3)), Cell::Black);
        assert_eq!(board.cell(p(3, 5)), Cell::Black);
        assert_eq!(board.cell(p(5, 3)), Cell::White);
        assert_eq!(board.cell(p(7, 7)), Cell::White);
        assert_eq!(board.cell(p(4, 4)), Cell::Empty);
        assert_eq!(board, Board::from_fen(test_positions::START).unwrap());
    }

    #[test]
    fn test_small_initial_board() {
        let board = Board::initial(BoardConfig::new(5, 5).unwrap());
        assert_eq!(board.piece_count(Color::Black), 7);
        assert_eq!(board.piece_count(Color::White), 7);
        assert_eq!(board.cell(p(1, 1)), Cell::Black);
        assert_eq!(board.cell(p(3, 3)), Cell::White);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_legal_moves_initial() {
        let board = Board::standard();
        assert!(board.captures_for(Color::White).is_empty());
        assert_eq!(board.all_moves_for(Color::White).len(), 25);
        assert_eq!(board.all_moves_for(Color::Black).len(), 25);
        assert_eq!(board.legal_moves(Color::White), board.all_moves_for(Color::White));
    }

    #[test]
    fn test_apply_move_copies() {
        let board = Board::standard();
        let mv = Move::new(p(5, 3), p(4, 3));
        let next = board.apply_move(&mv);

        assert_eq!(board.cell(p(5, 3)), Cell::White);
        assert_eq!(board.cell(p(4, 3)), Cell::Empty);
        assert_eq!(next.cell(p(5, 3)), Cell::Empty);
        assert_eq!(next.cell(p(4, 3)), Cell::White);
        assert_eq!(next.total_pieces(), board.total_pieces());
    }

    #[test]
    fn test_apply_capture_removes_midpoint() {
        let board = empty()
            .with_piece(p(5, 3), Color::White)
            .with_piece(p(4, 4), Color::Black);
        let next = board.apply_move(&Move::new(p(5, 3), p(3, 5)));

        assert_eq!(next.cell(p(3, 5)), Cell::White);
        assert_eq!(next.cell(p(4, 4)), Cell::Empty);
        assert_eq!(next.cell(p(5, 3)), Cell::Empty);
        assert_eq!(next.total_pieces(), 1);
    }

    #[test]
    fn test_step_rules() {
        let board = empty().with_piece(p(4, 4), Color::White);
        let white = Color::White;

        assert!(board.is_legal(p(4, 4), p(3, 4), white)); // 前进
        assert!(board.is_legal(p(4, 4), p(4, 3), white)); // 左移
        assert!(board.is_legal(p(4, 4), p(4, 5), white)); // 右移
        assert!(!board.is_legal(p(4, 4), p(5, 4), white)); // 后退
        assert!(!board.is_legal(p(4, 4), p(3, 3), white)); // 斜走一格
        assert!(!board.is_legal(p(4, 4), p(2, 4), white)); // 直进两格
        assert!(!board.is_legal(p(4, 4), p(4, 6), white)); // 横移两格

        // 同样的几何，黑方前进方向相反
        let black_board = empty().with_piece(p(4, 4), Color::Black);
        assert!(black_board.is_legal(p(4, 4), p(5, 4), Color::Black));
        assert!(!black_board.is_legal(p(4, 4), p(3, 4), Color::Black));
    }

    #[test]
    fn test_destination_checks() {
        let board = empty()
            .with_piece(p(0, 0), Color::White)
            .with_piece(p(0, 1), Color::Black);
        assert!(!board.is_legal(p(0, 0), p(-1, 0), Color::White));
        assert!(!board.is_legal(p(0, 0), p(0, -1), Color::White));
        assert!(!board.is_legal(p(0, 0), p(0, 1), Color::White));
        assert!(!board.is_legal(p(-1, 0), p(0, 0), Color::White));
    }

    #[test]
    fn test_capture_rules() {
        let board = empty()
            .with_piece(p(5, 3), Color::White)
            .with_piece(p(4, 4), Color::Black)
            .with_piece(p(4, 2), Color::White)
            .with_piece(p(6, 4), Color::Black);

        // 向前越过对方棋子
        assert!(board.is_legal(p(5, 3), p(3, 5), Color::White));
        // 越过己方棋子
        assert!(!board.is_legal(p(5, 3), p(3, 1), Color::White));
        // 向后跳吃不允许
        assert!(!board.is_legal(p(5, 3), p(7, 5), Color::White));
        // 越过空格
        assert!(!board.is_legal(p(5, 3), p(7, 1), Color::White));
        // 横向跳吃不允许
        let sideways = empty()
            .with_piece(p(4, 2), Color::White)
            .with_piece(p(4, 3), Color::Black);
        assert!(!sideways.is_legal(p(4, 2), p(4, 4), Color::White));
    }

    #[test]
    fn test_single_capture_detection() {
        let board = empty()
            .with_piece(p(5, 3), Color::White)
            .with_piece(p(4, 4), Color::Black);

        let captures = board.captures_for(Color::White);
        assert_eq!(captures, vec![Move::new(p(5, 3), p(3, 5))]);
        assert!(captures[0].is_capture());

        // 黑方向下跳：(4,4) -> (6,2) 越过 (5,3)
        assert_eq!(
            board.captures_for(Color::Black),
            vec![Move::new(p(4, 4), p(6, 2))]
        );

        // 有吃必吃
        assert_eq!(board.legal_moves(Color::White), captures);
        assert!(board.all_moves_for(Color::White).len() > captures.len());
    }

    #[test]
    fn test_capture_blocked_by_occupied_landing() {
        let board = empty()
            .with_piece(p(5, 3), Color::White)
            .with_piece(p(4, 4), Color::Black)
            .with_piece(p(3, 5), Color::Black);
        assert!(board.captures_for(Color::White).is_empty());
    }

    #[test]
    fn test_captures_subset_of_all_moves() {
        for seed in 0..8 {
            for (board, _) in random_playout(seed, 60) {
                for color in [Color::Black, Color::White] {
                    let all = board.all_moves_for(color);
                    for capture in board.captures_for(color) {
                        assert!(capture.is_capture());
                        assert!(all.contains(&capture), "{} missing from all moves", capture);
                    }
                }
            }
        }
    }

    #[test]
    fn test_piece_conservation() {
        for seed in 0..8 {
            for (board, turn) in random_playout(seed, 60) {
                if board.game_result(turn).is_over() {
                    continue;
                }
                let before = board.total_pieces();
                for mv in board.all_moves_for(turn) {
                    let after = board.apply_move(&mv).total_pieces();
                    if mv.is_capture() {
                        assert_eq!(after, before - 1);
                    } else {
                        assert_eq!(after, before);
                    }
                }
            }
        }
    }

    #[test]
    fn test_winner() {
        let white = empty().with_piece(p(0, 4), Color::White);
        assert_eq!(white.winner(), Some(Color::White));
        assert!(white.is_terminal());

        let black = Board::from_fen(test_positions::BLACK_ON_GOAL).unwrap();
        assert_eq!(black.winner(), Some(Color::Black));
        assert_eq!(black.game_result(Color::White), GameResult::BlackWin);

        let neither = empty()
            .with_piece(p(1, 4), Color::White)
            .with_piece(p(7, 4), Color::Black);
        assert_eq!(neither.winner(), None);
        assert!(!neither.is_terminal());

        // 自家底线上的棋子不算
        assert_eq!(Board::standard().winner(), None);

        // 双方同时到达时白方优先
        let both = white.with_piece(p(8, 0), Color::Black);
        assert_eq!(both.winner(), Some(Color::White));
    }

    #[test]
    fn test_blocked_side_loses() {
        let board = empty()
            .with_piece(p(5, 4), Color::White)
            .with_piece(p(4, 4), Color::Black)
            .with_piece(p(5, 3), Color::Black)
            .with_piece(p(5, 5), Color::Black);

        assert!(board.all_moves_for(Color::White).is_empty());
        assert_eq!(board.winner(), None);
        assert_eq!(board.game_result(Color::White), GameResult::BlackWin);
        assert_eq!(board.game_result(Color::Black), GameResult::Ongoing);
    }

    #[test]
    fn test_is_playable() {
        let board = empty()
            .with_piece(p(5, 3), Color::White)
            .with_piece(p(4, 4), Color::Black);
        assert!(board.is_playable(&Move::new(p(5, 3), p(3, 5)), Color::White));
        // 有吃子时普通走法不可走
        assert!(!board.is_playable(&Move::new(p(5, 3), p(4, 3)), Color::White));
        // 对方的棋子
        assert!(!board.is_playable(&Move::new(p(4, 4), p(6, 2)), Color::White));
    }

    #[test]
    fn test_display() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "    a b c d e f g h i");
        assert_eq!(lines[1], "  0 b b b b b b b b b");
        assert_eq!(lines[9], "  8 w w w w w w w w w");
    }

    #[test]
    fn test_legal_moves_from_fen() {
        let moves = get_legal_moves_from_fen(test_positions::SINGLE_CAPTURE).unwrap();
        assert_eq!(moves, vec!["d5f3".to_string()]);
        assert!(get_legal_moves_from_fen("not a fen").is_err());
    }
}
