use serde::{Deserialize, Serialize};

/// 描画層で扱う駒のJSON表現
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieceJson {
    /// "sente" | "gote"
    pub owner: String,
    /// CSA 形式の駒名（"FU", "UM" 等）
    #[serde(rename = "type")]
    pub piece_type: String,
    /// 表示用の一文字（"歩", "と" 等）
    pub glyph: String,
    /// 成駒かどうか
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted: Option<bool>,
}

/// 盤面の1マス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellJson {
    /// "７六" 形式
    pub label: String,
    /// 駒の場所（Place の内部値）
    pub place: u8,
    /// 駒（存在しない場合はnull）
    pub piece: Option<PieceJson>,
}

/// 持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HandJson {
    #[serde(rename = "HI", skip_serializing_if = "Option::is_none")]
    pub rook: Option<u32>,
    #[serde(rename = "KA", skip_serializing_if = "Option::is_none")]
    pub bishop: Option<u32>,
    #[serde(rename = "KI", skip_serializing_if = "Option::is_none")]
    pub gold: Option<u32>,
    #[serde(rename = "GI", skip_serializing_if = "Option::is_none")]
    pub silver: Option<u32>,
    #[serde(rename = "KE", skip_serializing_if = "Option::is_none")]
    pub knight: Option<u32>,
    #[serde(rename = "KY", skip_serializing_if = "Option::is_none")]
    pub lance: Option<u32>,
    #[serde(rename = "FU", skip_serializing_if = "Option::is_none")]
    pub pawn: Option<u32>,
}

/// 両者の持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandsJson {
    pub sente: HandJson,
    pub gote: HandJson,
}

/// 盤面全体の状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardStateJson {
    /// 9x9のセル配列（行: 一段目〜九段目、列: 9筋〜1筋）
    pub cells: Vec<Vec<CellJson>>,
    /// 持ち駒
    pub hands: HandsJson,
    /// 手番: "sente" | "gote"
    pub turn: String,
    /// SFEN（手数付き）
    pub sfen: String,
}
