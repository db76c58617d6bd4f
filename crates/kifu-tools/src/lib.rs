//! 棋譜再生ツール
//!
//! `kifu-replay` バイナリが使う設定・棋譜ファイルの読み込みと出力処理。

pub mod config;
pub mod input;
pub mod output;

pub use config::{OutputFormat, ReplayConfig};
pub use input::{InputFormat, read_kifu};
pub use output::Replayed;
