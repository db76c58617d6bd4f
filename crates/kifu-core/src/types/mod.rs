//! 基本型モジュール
//!
//! 局面エンジンで使用する基本的な型と、駒に関する静的な定数表を定義する。
//!
//! # 型の依存関係
//!
//! ```text
//! Color
//!   ↓
//! PieceType ← movement (利きの候補方向)
//!   ↓
//! Place ← Move
//!   ↓
//! Hand, PieceBox
//! ```

mod color;
mod hand;
pub mod json;
pub mod movement;
mod moves;
mod piece_box;
mod piece_type;
mod place;

pub use color::Color;
pub use hand::Hand;
pub use moves::Move;
pub use piece_box::{PieceBox, SupplyError};
pub use piece_type::PieceType;
pub use place::Place;
