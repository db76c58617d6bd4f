//! KIF・CSA 形式の棋譜の読み込み
//!
//! - KIF: `手合割` を開始局面に、`先手`/`後手`/`表題` を対局者・表題に、
//!   その他の `項目：値` 行を棋譜情報にする。指し手行の `同`、`成`/`不成`/`打`、
//!   `(77)` 形式の移動元と消費時間を読み、`変化：N手` 以降を分岐として扱う。
//! - CSA: `P1`〜`P9`・`PI`・`P+`・`P-` で開始局面を組み立て、指し手を1手ずつ適用して
//!   成りを判定する。`T` 行は直前の手の消費時間、`'*` 行は直前の手のコメントになる。
//!
//! 文字コードは UTF-8 のみ扱う。

mod csa;
mod kif;

use thiserror::Error;

use crate::position::{MoveError, SetupError, ValidationError};
use crate::types::PieceType;

use super::{Branch, Kifu, KifuMove, KifuOption};

/// 棋譜の読み込みエラー（行番号は 1 始まり）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("line {line}: invalid move '{text}'")]
    InvalidMove { line: usize, text: String },

    #[error("line {line}: '同' without a previous move")]
    NoPreviousMove { line: usize },

    #[error("line {line}: unknown piece in '{text}'")]
    UnknownPiece { line: usize, text: String },

    #[error("line {line}: invalid time '{text}'")]
    InvalidTime { line: usize, text: String },

    #[error("line {line}: expected move {expected}, found {found}")]
    MoveNumber { line: usize, expected: u32, found: u32 },

    #[error("line {line}: no line has a move {number} to branch from")]
    OrphanVariation { line: usize, number: u32 },

    #[error("line {line}: invalid position line '{text}'")]
    InvalidPosition { line: usize, text: String },

    #[error("line {line}: {source}")]
    Setup { line: usize, source: SetupError },

    #[error("line {line}: move '{text}' cannot be played: {source}")]
    Move { line: usize, text: String, source: MoveError },

    #[error("line {line}: '{text}' is played by the wrong side")]
    TurnSequence { line: usize, text: String },

    #[error("no side-to-move line ('+' or '-') before the moves")]
    MissingTurn,

    #[error("start position holds {count} x {piece} in hand; only single-digit hand counts are supported")]
    HandCountTooLarge { piece: PieceType, count: u32 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Kifu {
    /// KIF 形式の棋譜を読み込む
    pub fn from_kif(text: &str) -> Result<Kifu, ImportError> {
        kif::parse(text)
    }

    /// CSA 形式の棋譜を読み込む
    pub fn from_csa(text: &str) -> Result<Kifu, ImportError> {
        csa::parse(text)
    }
}

const MAIN_LINE_ID: &str = "main";

fn main_branch() -> Branch {
    Branch {
        id: MAIN_LINE_ID.to_string(),
        root_branch_id: None,
        root_number: None,
        moves: Vec::new(),
        ending: None,
    }
}

fn push_option(kifu: &mut Kifu, name: &str, value: &str) {
    kifu.options.push(KifuOption { name: name.to_string(), value: value.to_string() });
}

/// 直前の手にコメントを追記する（手がなければ何もしない）
fn append_comment(recorded: Option<&mut KifuMove>, text: &str) {
    let Some(recorded) = recorded else {
        log::debug!("comment before the first move ignored: {text}");
        return;
    };
    match &mut recorded.comment {
        Some(comment) => {
            comment.push('\n');
            comment.push_str(text);
        }
        None => recorded.comment = Some(text.to_string()),
    }
}
