//! 駒箱（PieceBox）
//!
//! 盤上にも駒台にもない駒の枚数を生駒単位で数える。
//! SFEN の解析時に、実在する枚数を超える駒が現れないことを検証するために使う。

use thiserror::Error;

use super::PieceType;

/// 駒箱から取り出せなかった
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("piece supply exhausted: {requested} x {piece} requested, {available} left")]
pub struct SupplyError {
    pub piece: PieceType,
    pub requested: u32,
    pub available: u32,
}

/// 駒箱（生駒ごとの残り枚数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceBox([u8; PieceType::BASE_NUM]);

impl PieceBox {
    /// 空の駒箱
    pub const EMPTY: PieceBox = PieceBox([0; PieceType::BASE_NUM]);

    /// 全ての駒が入った駒箱（歩18, 香桂銀金4, 角飛2, 玉2）
    pub const FULL: PieceBox = PieceBox([18, 4, 4, 4, 4, 2, 2, 2]);

    /// 残り枚数（成駒は生駒として数える）
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        self.0[pt.base_index()] as u32
    }

    /// `n` 枚取り出す
    ///
    /// 足りない場合は駒箱を変更せずにエラーを返す。
    pub fn take(&mut self, pt: PieceType, n: u32) -> Result<(), SupplyError> {
        let slot = &mut self.0[pt.base_index()];
        let available = *slot as u32;
        if available < n {
            return Err(SupplyError { piece: pt.unpromote(), requested: n, available });
        }
        *slot -= n as u8;
        Ok(())
    }

    /// 1枚戻す
    pub fn put_back(&mut self, pt: PieceType) {
        let slot = &mut self.0[pt.base_index()];
        *slot = slot.saturating_add(1);
    }

    /// 生駒ごとの残り枚数（`PieceType::BASE` の順）
    pub fn iter(self) -> impl Iterator<Item = (PieceType, u32)> {
        PieceType::BASE.into_iter().map(move |pt| (pt, self.count(pt)))
    }
}

impl Default for PieceBox {
    fn default() -> Self {
        PieceBox::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_box_matches_totals() {
        for (pt, n) in PieceBox::FULL.iter() {
            assert_eq!(n, pt.total_count() as u32);
        }
    }

    #[test]
    fn test_take_counts_promoted_as_base() {
        let mut pb = PieceBox::FULL;
        pb.take(PieceType::Dragon, 1).unwrap();
        assert_eq!(pb.count(PieceType::Rook), 1);
        pb.take(PieceType::Rook, 1).unwrap();
        assert_eq!(pb.count(PieceType::Dragon), 0);
    }

    #[test]
    fn test_take_exhausted_leaves_box_unchanged() {
        let mut pb = PieceBox::FULL;
        let err = pb.take(PieceType::Bishop, 3).unwrap_err();
        assert_eq!(
            err,
            SupplyError { piece: PieceType::Bishop, requested: 3, available: 2 }
        );
        assert_eq!(pb, PieceBox::FULL);
    }

    #[test]
    fn test_put_back() {
        let mut pb = PieceBox::EMPTY;
        pb.put_back(PieceType::King);
        assert_eq!(pb.count(PieceType::King), 1);
        assert!(pb.take(PieceType::King, 1).is_ok());
        assert!(pb.take(PieceType::King, 1).is_err());
    }
}
