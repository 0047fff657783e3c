//! 对局会话
//!
//! 维护棋盘、轮到的一方和走法记录；人类走法在这里校验
//! （己方棋子、走法几何、有吃必吃），引擎走法通过 `AIEngine` 产生。

use crate::ai::AIEngine;
use crate::board::Board;
use crate::error::{Error, Result};
use crate::fen::{parse_fen, to_fen};
use crate::types::{BoardConfig, Color, GameResult, Move};
use log::info;

/// 对局
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<Move>,
}

impl Game {
    /// 新对局，白方先走
    pub fn new(config: BoardConfig) -> Self {
        Game {
            board: Board::initial(config),
            turn: Color::White,
            history: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        Game::new(BoardConfig::STANDARD)
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        let state = parse_fen(fen)?;
        Ok(Game {
            board: state.board,
            turn: state.turn,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn to_fen(&self) -> String {
        to_fen(&self.board, self.turn)
    }

    pub fn result(&self) -> GameResult {
        self.board.game_result(self.turn)
    }

    /// 当前一方的合法走法（已执行有吃必吃）
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.turn)
    }

    /// 当前一方必须执行的吃子，没有吃子时为空
    pub fn forced_captures(&self) -> Vec<Move> {
        self.board.captures_for(self.turn)
    }

    /// 走一步，返回走完后的结果
    pub fn play(&mut self, mv: Move) -> Result<GameResult> {
        if self.result().is_over() {
            return Err(Error::GameOver);
        }
        if self.board.cell(mv.from) != self.turn.cell() {
            return Err(Error::NotYourPiece {
                color: self.turn,
                position: mv.from,
            });
        }
        if !self.board.is_legal(mv.from, mv.to, self.turn) {
            return Err(Error::IllegalMove(mv));
        }
        let captures = self.forced_captures();
        if !captures.is_empty() && !captures.contains(&mv) {
            return Err(Error::CaptureRequired(mv));
        }

        self.board = self.board.apply_move(&mv);
        self.history.push(mv);
        info!("{} plays {}", self.turn, mv);
        self.turn = self.turn.opposite();

        let result = self.result();
        if result.is_over() {
            info!("game over after {} plies: {:?}", self.history.len(), result);
        }
        Ok(result)
    }

    /// 走一步（记谱字符串）
    pub fn play_str(&mut self, s: &str) -> Result<GameResult> {
        self.play(Move::from_notation(s)?)
    }

    /// 让引擎为当前一方走一步，无路可走时返回 None
    pub fn engine_move(&mut self, engine: &AIEngine) -> Result<Option<Move>> {
        if self.result().is_over() {
            return Err(Error::GameOver);
        }
        match engine.select_best_move(&self.board, self.turn) {
            Some(mv) => {
                self.play(mv)?;
                Ok(Some(mv))
            }
            None => Ok(None),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AIConfig;
    use crate::test_positions;
    use crate::types::Position;

    #[test]
    fn test_new_game() {
        let game = Game::standard();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.result(), GameResult::Ongoing);
        assert_eq!(game.legal_moves().len(), 25);
        assert!(game.forced_captures().is_empty());
        assert_eq!(game.to_fen(), test_positions::START);
    }

    #[test]
    fn test_play_switches_turn() {
        let mut game = Game::standard();
        assert_eq!(game.play_str("d5d4").unwrap(), GameResult::Ongoing);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.to_fen(), test_positions::EARLY_1);
    }

    #[test]
    fn test_rejects_bad_moves() {
        let mut game = Game::standard();
        // 黑子不能由白方走
        assert!(matches!(
            game.play_str("d3d4"),
            Err(Error::NotYourPiece { .. })
        ));
        // 空格
        assert!(matches!(
            game.play_str("e4e3"),
            Err(Error::NotYourPiece { .. })
        ));
        // 后退
        assert!(matches!(game.play_str("d5d6"), Err(Error::IllegalMove(_))));
        // 斜走
        assert!(matches!(game.play_str("d5c4"), Err(Error::IllegalMove(_))));
        assert!(matches!(game.play_str("zz"), Err(Error::InvalidMove(_))));
        assert!(game.history().is_empty());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_capture_required() {
        let mut game = Game::from_fen(test_positions::EARLY_2).unwrap();
        let captures = game.forced_captures();
        assert_eq!(captures.len(), 1);

        assert!(matches!(
            game.play_str("a8a7"),
            Err(Error::CaptureRequired(_))
        ));
        game.play(captures[0]).unwrap();
        assert_eq!(game.board().piece_count(Color::Black), 14);
    }

    #[test]
    fn test_reaching_goal_ends_game() {
        let mut game = Game::from_fen(test_positions::WHITE_ONE_STEP).unwrap();
        assert_eq!(game.play_str("e1e0").unwrap(), GameResult::WhiteWin);
        assert_eq!(game.board().winner(), Some(Color::White));
        assert!(matches!(game.play_str("a7a8"), Err(Error::GameOver)));
    }

    #[test]
    fn test_blocked_game_result() {
        let game = Game::from_fen(test_positions::BLOCKED_WHITE).unwrap();
        assert_eq!(game.result(), GameResult::BlackWin);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn test_engine_vs_random() {
        let config = AIConfig {
            depth: 2,
            seed: Some(5),
            ..Default::default()
        };
        let white = AIEngine::negamax(&config);
        let black = AIEngine::random(config.seed);
        let mut game = Game::standard();
        let start_pieces = game.board().total_pieces();

        for _ in 0..120 {
            if game.result().is_over() {
                break;
            }
            let before = game.board().total_pieces();
            let engine = if game.turn() == Color::White { &white } else { &black };
            let mv = game.engine_move(engine).unwrap().expect("ongoing game has moves");
            let after = game.board().total_pieces();
            assert_eq!(after + mv.is_capture() as usize, before);
        }
        assert!(game.board().total_pieces() <= start_pieces);
        assert!(!game.history().is_empty());
    }

    #[test]
    fn test_engine_move_after_game_over() {
        let mut game = Game::from_fen(test_positions::WHITE_ON_GOAL).unwrap();
        let engine = AIEngine::negamax(&AIConfig::default());
        assert!(matches!(game.engine_move(&engine), Err(Error::GameOver)));
        assert_eq!(game.board().cell(Position::new(0, 4)), crate::types::Cell::White);
    }
}
