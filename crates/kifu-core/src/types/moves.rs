//! 指し手（Move）
//!
//! 棋譜に保存された指し手の記録。局面エンジン自身は所有せず、
//! 永続化層・UI 層が作ったものを `Position::apply` に渡す。

use serde::{Deserialize, Serialize};

use super::{Color, PieceType, Place};

/// 指し手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 何手目か（分岐の場合も初手からカウント）
    pub number: u32,
    /// 動かす（打つ）前の駒種
    pub piece: PieceType,
    /// 移動元（打つ場合は `Place::IN_HAND`）
    #[serde(rename = "from_place")]
    pub from: Place,
    /// 移動先
    #[serde(rename = "to_place")]
    pub to: Place,
    /// 成るかどうか
    #[serde(default)]
    pub promote: bool,
}

impl Move {
    /// 盤上の駒を動かす指し手
    pub const fn new(number: u32, piece: PieceType, from: Place, to: Place, promote: bool) -> Move {
        Move { number, piece, from, to, promote }
    }

    /// 持ち駒を打つ指し手
    pub const fn drop(number: u32, piece: PieceType, to: Place) -> Move {
        Move { number, piece, from: Place::IN_HAND, to, promote: false }
    }

    /// 駒打ちかどうか
    #[inline]
    pub const fn is_drop(&self) -> bool {
        self.from.is_in_hand()
    }

    /// 移動後の駒種
    #[inline]
    pub const fn piece_after(&self) -> PieceType {
        if self.promote { self.piece.promote_or_self() } else { self.piece }
    }

    /// 手数から推定した手番（奇数手は先手）
    ///
    /// 局面の手番とは独立した補助情報であり、`Position::apply` は参照しない。
    #[inline]
    pub const fn nominal_side(&self) -> Color {
        Color::from_move_number(self.number)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.to.label(), self.piece.kif_name())?;
        if self.promote {
            f.write_str("成")?;
        }
        if self.is_drop() {
            f.write_str("打")
        } else {
            write!(f, "({})", self.from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_piece_after() {
        let from = Place::from_file_rank(2, 4).unwrap();
        let to = Place::from_file_rank(2, 3).unwrap();
        assert_eq!(Move::new(1, PieceType::Pawn, from, to, true).piece_after(), PieceType::ProPawn);
        assert_eq!(Move::new(1, PieceType::Pawn, from, to, false).piece_after(), PieceType::Pawn);
        assert_eq!(Move::new(1, PieceType::Gold, from, to, true).piece_after(), PieceType::Gold);
    }

    #[test]
    fn test_move_display() {
        let from = Place::from_file_rank(7, 7).unwrap();
        let to = Place::from_file_rank(7, 6).unwrap();
        assert_eq!(Move::new(1, PieceType::Pawn, from, to, false).to_string(), "７六歩(77)");
        let drop = Move::drop(31, PieceType::Silver, Place::from_file_rank(5, 2).unwrap());
        assert_eq!(drop.to_string(), "５二銀打");
        assert!(drop.is_drop());
        assert_eq!(drop.nominal_side(), Color::Black);
    }

    #[test]
    fn test_move_serde_shape() {
        let mv = Move::drop(2, PieceType::Pawn, Place::from_file_rank(5, 5).unwrap());
        let json = serde_json::to_value(mv).unwrap();
        assert_eq!(json["piece"], "FU");
        assert_eq!(json["from_place"], 0xFF);
        assert_eq!(json["to_place"], 0x44);
        let back: Move = serde_json::from_value(json).unwrap();
        assert_eq!(back, mv);
    }
}
