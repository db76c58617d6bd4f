//! # kifu-core
//!
//! 棋譜（kifu）管理のための将棋局面エンジン。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, PieceType, Place, Hand, PieceBox, Move）と駒の定数表
//! - `position`: 局面表現、SFEN の解析・出力、指し手の適用
//! - `kifu`: 分岐付き棋譜の再生と指し手の注釈
//!
//! 局面は SFEN 文字列から生成し、`Position::apply` で 1 手ずつ進める。
//! 各手数の局面が必要な場合は `Position::copy` で独立した複製を作る。

pub mod kifu;
pub mod position;
pub mod types;

pub use kifu::{
    Branch, Ending, ImportError, Kifu, KifuMove, KifuOption, MoveNode, ReplayError, build_move_tree,
};
pub use position::{
    Grid, Handicap, MoveError, ParseHandicapError, Position, SFEN_ALL_IN_BOX, SFEN_HIRATE,
    SetupError, SfenError, ValidationError,
};
pub use types::{Color, Hand, Move, PieceBox, PieceType, Place, SupplyError};
