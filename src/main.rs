//! Fianco AI CLI
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信（每行一个 JSON）

use clap::{Parser, Subcommand};
use fianco_ai::{
    evaluate, evaluate_for, get_legal_moves_from_fen, parse_fen, to_fen, AIConfig, AIEngine,
    Color, Game, GameResult, Move, NegamaxAI, DEFAULT_STRATEGY,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fianco-ai")]
#[command(about = "Fianco AI Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long)]
        fen: String,
    },

    /// 选择最佳走法
    Best {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// AI 策略 (negamax, random)
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        strategy: String,

        /// 搜索深度
        #[arg(long, default_value = "3")]
        depth: u32,

        /// 返回的走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 评估局面分数
    Eval {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 搜索调试：列出根节点每个走法的分数和节点数
    Search {
        /// FEN 字符串
        #[arg(long)]
        fen: String,

        /// 搜索深度
        #[arg(long, default_value = "3")]
        depth: u32,

        /// 只在根节点执行有吃必吃（对比用）
        #[arg(long)]
        root_only_capture: bool,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 自对弈
    Play {
        /// 白方策略
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        white: String,

        /// 黑方策略
        #[arg(long, default_value = "random")]
        black: String,

        /// 搜索深度
        #[arg(long, default_value = "3")]
        depth: u32,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// 最多走多少步
        #[arg(long, default_value = "200")]
        max_plies: usize,

        /// 起始局面，默认初始局面
        #[arg(long)]
        fen: Option<String>,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    #[serde(rename = "move")]
    mv: String,
    score: i32,
}

#[derive(Serialize, Deserialize)]
struct MovesResponse {
    moves: Vec<MoveResult>,
    total: usize,
}

#[derive(Serialize, Deserialize)]
struct SearchResponse {
    fen: String,
    depth: u32,
    #[serde(rename = "best")]
    best: Option<String>,
    score: Option<i32>,
    moves: Vec<MoveResult>,
    nodes: u64,
    elapsed_ms: f64,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    depth: Option<u32>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default, rename = "move")]
    mv: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    turn: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<GameResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn success_moves(moves: Vec<MoveResult>, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_legal(legal: bool) -> Self {
        Self {
            ok: true,
            legal: Some(legal),
            ..Default::default()
        }
    }

    fn success_eval(eval: i32, turn: Color, result: GameResult) -> Self {
        Self {
            ok: true,
            eval: Some(eval),
            turn: Some(turn),
            result: Some(result),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.unwrap_or_else(|e| format!("{{\"ok\": false, \"error\": \"{}\"}}", e))
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen } => match get_legal_moves_from_fen(&fen) {
            Ok(moves) => {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => fail(e),
        },

        Commands::Best {
            fen,
            strategy,
            depth,
            n,
            seed,
            json,
        } => {
            let config = AIConfig {
                depth,
                seed,
                ..Default::default()
            };
            let ai = AIEngine::from_strategy(&strategy, &config).unwrap_or_else(|e| fail(e));

            let start = Instant::now();
            let moves = ai.select_moves_fen(&fen, n).unwrap_or_else(|e| fail(e));
            let elapsed = start.elapsed().as_secs_f64();

            if json {
                let response = MovesResponse {
                    total: moves.len(),
                    moves: moves
                        .into_iter()
                        .map(|(mv, score)| MoveResult { mv, score })
                        .collect(),
                };
                println!("{}", to_json(&response, true));
                eprintln!("Stats: depth={}, time={:.3}s", depth, elapsed);
            } else {
                println!("Best moves (strategy={}):", strategy);
                if moves.is_empty() {
                    println!("  (no legal move)");
                }
                for (mv, score) in moves {
                    println!("  {} (score: {})", mv, score);
                }
                println!("\nStats: depth={}, time={:.3}s", depth, elapsed);
            }
        }

        Commands::Eval { fen, json } => {
            let state = parse_fen(&fen).unwrap_or_else(|e| fail(e));
            let score = evaluate(&state.board);
            let result = state.board.game_result(state.turn);

            if json {
                let response = ServerResponse::success_eval(score, state.turn, result);
                println!("{}", to_json(&response, false));
            } else {
                println!("局面评估 (白方视角): {}", score);
                println!(
                    "{} 视角: {}",
                    state.turn,
                    evaluate_for(&state.board, state.turn)
                );
                println!("结果: {:?}", result);
            }
        }

        Commands::Search {
            fen,
            depth,
            root_only_capture,
            json,
        } => {
            let state = parse_fen(&fen).unwrap_or_else(|e| fail(e));
            let config = AIConfig {
                depth,
                mandatory_capture: !root_only_capture,
                ..Default::default()
            };

            let start = Instant::now();
            let search = NegamaxAI::new(&config).search(&state.board, state.turn);
            let elapsed = start.elapsed().as_secs_f64();

            let response = SearchResponse {
                fen: to_fen(&state.board, state.turn),
                depth,
                best: search.best.map(|m| m.to_notation()),
                score: search.score,
                moves: search
                    .scored
                    .iter()
                    .map(|sm| MoveResult {
                        mv: sm.mv.to_notation(),
                        score: sm.score,
                    })
                    .collect(),
                nodes: search.nodes,
                elapsed_ms: elapsed * 1000.0,
            };

            if json {
                println!("{}", to_json(&response, true));
            } else {
                println!("Search result (depth={}, {} to move):", depth, state.turn);
                for mv in &response.moves {
                    println!("  {}: {}", mv.mv, mv.score);
                }
                match (&response.best, response.score) {
                    (Some(best), Some(score)) => println!("\nBest: {} ({})", best, score),
                    _ => println!("\nNo legal move"),
                }
                let nps = if elapsed > 0.0 {
                    search.nodes as f64 / elapsed
                } else {
                    0.0
                };
                println!(
                    "Nodes: {}, time={:.3}s, nps={:.0}",
                    search.nodes, elapsed, nps
                );
            }
        }

        Commands::Play {
            white,
            black,
            depth,
            seed,
            max_plies,
            fen,
        } => {
            let config = AIConfig {
                depth,
                seed,
                ..Default::default()
            };
            let white_ai = AIEngine::from_strategy(&white, &config).unwrap_or_else(|e| fail(e));
            // 两个随机方用不同的种子
            let black_config = AIConfig {
                seed: seed.map(|s| s.wrapping_add(1)),
                ..config
            };
            let black_ai =
                AIEngine::from_strategy(&black, &black_config).unwrap_or_else(|e| fail(e));

            let mut game = match fen {
                Some(fen) => Game::from_fen(&fen).unwrap_or_else(|e| fail(e)),
                None => Game::standard(),
            };
            run_self_play(&mut game, &white_ai, &black_ai, max_plies);
        }

        Commands::Server => {
            run_server();
        }
    }
}

/// 自对弈主循环
fn run_self_play(game: &mut Game, white: &AIEngine, black: &AIEngine, max_plies: usize) {
    println!("{}", game.board());

    while game.history().len() < max_plies && !game.result().is_over() {
        let engine = match game.turn() {
            Color::White => white,
            Color::Black => black,
        };
        let turn = game.turn();
        match game.engine_move(engine) {
            Ok(Some(mv)) => {
                println!("{}. {} ({}): {}", game.history().len(), turn, engine.name(), mv);
            }
            Ok(None) => break,
            Err(e) => fail(e),
        }
    }

    println!("\n{}", game.board());
    println!("FEN: {}", game.to_fen());
    let result = game.result();
    info!("self-play finished: {:?} in {} plies", result, game.history().len());
    match result.winner() {
        Some(color) => println!("{} wins after {} plies", color, game.history().len()),
        None => println!("No result after {} plies", game.history().len()),
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                println!("{}", to_json(&response, false));
                let _ = stdout.flush();
                continue;
            }
        };

        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&request),
            "moves" => handle_moves_request(&request),
            "eval" => handle_eval_request(&request),
            "legal" => handle_legal_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        println!("{}", to_json(&response, false));
        let _ = stdout.flush();
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let strategy = request.strategy.as_deref().unwrap_or(DEFAULT_STRATEGY);
    let config = AIConfig {
        depth: request.depth.unwrap_or(3),
        ..Default::default()
    };

    let ai = match AIEngine::from_strategy(strategy, &config) {
        Ok(ai) => ai,
        Err(e) => return ServerResponse::error(&e.to_string()),
    };

    let start = Instant::now();
    match ai.select_moves_fen(&request.fen, request.n.unwrap_or(1)) {
        Ok(moves) => {
            let elapsed = start.elapsed().as_secs_f64();
            let move_results = moves
                .into_iter()
                .map(|(mv, score)| MoveResult { mv, score })
                .collect();
            ServerResponse::success_moves(move_results, elapsed * 1000.0)
        }
        Err(e) => ServerResponse::error(&format!("AI error: {}", e)),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match get_legal_moves_from_fen(&request.fen) {
        Ok(moves) => ServerResponse::success_legal_moves(moves),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 eval 命令（静态评估，白方视角）
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    match parse_fen(&request.fen) {
        Ok(state) => ServerResponse::success_eval(
            evaluate(&state.board),
            state.turn,
            state.board.game_result(state.turn),
        ),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 legal 命令：校验一步走法（含有吃必吃）
fn handle_legal_request(request: &ServerRequest) -> ServerResponse {
    let state = match parse_fen(&request.fen) {
        Ok(state) => state,
        Err(e) => return ServerResponse::error(&e.to_string()),
    };
    let mv = match request.mv.as_deref().map(Move::from_notation) {
        Some(Ok(mv)) => mv,
        Some(Err(e)) => return ServerResponse::error(&e.to_string()),
        None => return ServerResponse::error("missing field: move"),
    };
    ServerResponse::success_legal(state.board.is_playable(&mv, state.turn))
}
