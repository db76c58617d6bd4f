//! 分岐付き棋譜
//!
//! 棋譜は分岐（`Branch`）の集まりとして保存される。
//!
//! - メインライン: `root_branch_id` と `root_number` がともに `None`
//! - 派生ライン: 分岐元の分岐IDと、置き換える手の手数を持つ
//!
//! `build_move_tree` は開始局面からメインラインを再生し、
//! 各手に成り・取った駒・指した後のSFENを付けた木構造を作る。
//! KIF・CSA 形式の棋譜は `import` で読み込む。

mod ending;
pub mod import;
mod tree;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::{SfenError, ValidationError};
use crate::types::{Move, PieceType};

pub use ending::Ending;
pub use import::ImportError;
pub use tree::build_move_tree;

/// 分岐に記録された指し手（コメント・消費時間付き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KifuMove {
    #[serde(flatten)]
    pub mv: Move,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// 消費時間（ミリ秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_ms: Option<u64>,
}

impl From<Move> for KifuMove {
    fn from(mv: Move) -> Self {
        KifuMove { mv, comment: None, time_spent_ms: None }
    }
}

/// 分岐
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    /// 分岐元の分岐ID（メインラインは `None`）
    #[serde(default)]
    pub root_branch_id: Option<String>,
    /// 分岐元で置き換える手の手数（メインラインは `None`）
    #[serde(default)]
    pub root_number: Option<u32>,
    #[serde(default)]
    pub moves: Vec<KifuMove>,
    /// この分岐の終わり方（投了・中断など）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<Ending>,
}

impl Branch {
    /// メインラインかどうか
    pub fn is_main_line(&self) -> bool {
        self.root_branch_id.is_none()
    }

    /// `branch_id` の `number` 手目から分かれた分岐かどうか
    pub fn branches_from(&self, branch_id: &str, number: u32) -> bool {
        self.root_branch_id.as_deref() == Some(branch_id) && self.root_number == Some(number)
    }
}

/// 棋譜情報の項目（棋戦・戦型・終了日時など）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KifuOption {
    pub name: String,
    pub value: String,
}

/// 棋譜（対局情報、開始局面と分岐の集まり）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Kifu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_player: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_player: Option<String>,
    /// 開始局面のSFEN（`None` は平手）
    #[serde(default)]
    pub initial_position: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<KifuOption>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

/// 注釈付きの指し手
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveNode {
    #[serde(flatten)]
    pub mv: Move,
    /// 成り（`Some(true)`）・不成（`Some(false)`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<bool>,
    /// 取った駒
    #[serde(default, rename = "catch_piece", skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// 消費時間（ミリ秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_ms: Option<u64>,
    /// 指した後の局面（手数は次の手）
    pub sfen: String,
    /// この手に代わる分岐
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Vec<MoveNode>>,
}

/// 棋譜再生のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("invalid initial position: {0}")]
    InitialPosition(#[from] SfenError),

    #[error("no main line (a branch without a root) in the kifu")]
    MissingMainLine,

    #[error("{0} branches claim to be the main line")]
    AmbiguousMainLine(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Kifu {
    /// 指し手の木を作る
    pub fn move_tree(&self) -> Result<Vec<MoveNode>, ReplayError> {
        build_move_tree(self.initial_position.as_deref(), &self.branches)
    }

    /// メインライン
    pub fn main_line(&self) -> Option<&Branch> {
        self.branches.iter().find(|b| b.is_main_line())
    }
}
