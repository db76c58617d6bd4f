//! 局面表現モジュール
//!
//! 将棋の局面を表現し、指し手を適用する。
//!
//! - `Position`: 局面本体（手番ごとの盤面配列・持ち駒・駒箱・手番）
//! - SFEN形式の解析・出力
//! - `apply`: 検証付きの指し手の適用と、成り・取った駒の注釈
//! - `Handicap`: 平手・駒落ちの開始局面
//! - 駒を一枚ずつ置いて開始局面を組み立てる操作
//! - 描画層向けのJSON変換
//!
//! 盤面・持ち駒・駒箱は SFEN の解析、局面の組み立て、`apply` を通じてのみ更新され、
//! 駒の総数は常に保存される。

mod apply;
mod handicap;
pub mod json_conversion;
mod pos;
mod setup;
mod sfen;

pub use apply::MoveError;
pub use handicap::{Handicap, ParseHandicapError};
pub use pos::{Grid, Position};
pub use setup::SetupError;
pub use sfen::{SFEN_ALL_IN_BOX, SFEN_HIRATE, SfenError, ValidationError};
