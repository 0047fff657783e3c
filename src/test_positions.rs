//! Fianco 测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试、调试和基准测试
//!
//! 命名规范:
//! - START / EARLY_*: 开局
//! - *_CAPTURE: 吃子相关
//! - *_ON_GOAL / *_ONE_STEP: 到达目标行
//! - BLOCKED_*: 无路可走

// =============================================================================
// 开局
// =============================================================================

/// 初始局面，白方先走
pub const START: &str = "bbbbbbbbb/1b5b1/2b3b2/3b1b3/9/3w1w3/2w3w2/1w5w1/wwwwwwwww w";

/// 白方中路兵前进一步后
pub const EARLY_1: &str = "bbbbbbbbb/1b5b1/2b3b2/3b1b3/3w5/5w3/2w3w2/1w5w1/wwwwwwwww b";

/// 双方中路接触，白方有吃子
pub const EARLY_2: &str = "bbbbbbbbb/1b5b1/2b3b2/5b3/4b4/3w1w3/2w3w2/1w5w1/wwwwwwwww w";

// =============================================================================
// 吃子
// =============================================================================

/// 白 (5,3)，黑 (4,4)，白方走：唯一合法走法是 d5f3
pub const SINGLE_CAPTURE: &str = "9/9/9/9/4b4/3w5/9/9/9 w";

/// 黑 (0,0)，白 (1,1)，黑方走：必须吃子，即使横移评估更好
pub const FORCED_BAD_CAPTURE: &str = "b8/1w7/9/9/9/9/9/9/9 b";

/// 白方两个吃子可选
pub const DOUBLE_CAPTURE: &str = "9/9/9/9/2b1b4/3w5/9/9/9 w";

// =============================================================================
// 终局
// =============================================================================

/// 白子到达第 0 行
pub const WHITE_ON_GOAL: &str = "4w4/9/9/9/9/9/9/9/9 b";

/// 黑子到达第 8 行
pub const BLACK_ON_GOAL: &str = "9/9/9/9/9/9/9/9/b8 w";

/// 白方唯一的棋子被围住，轮白方走
pub const BLOCKED_WHITE: &str = "9/9/9/9/4b4/3bwb3/9/9/9 w";

/// 白子距目标行一步
pub const WHITE_ONE_STEP: &str = "9/4w4/9/9/9/9/9/b8/9 w";
