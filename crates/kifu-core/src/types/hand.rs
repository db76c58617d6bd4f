//! 手駒（Hand）

use super::PieceType;

/// 手駒（32bit packed）
///
/// ビット配置:
/// - bit 0-4:   歩 (5bit, 最大18枚)
/// - bit 5-7:   香 (3bit, 最大4枚)
/// - bit 8-10:  桂 (3bit, 最大4枚)
/// - bit 11-13: 銀 (3bit, 最大4枚)
/// - bit 14-16: 金 (3bit, 最大4枚)
/// - bit 17-18: 角 (2bit, 最大2枚)
/// - bit 19-20: 飛 (2bit, 最大2枚)
///
/// 玉と成駒は手駒にならない。これらを渡した場合、更新系は何もしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hand(u32);

impl Hand {
    /// 空の手駒
    pub const EMPTY: Hand = Hand(0);

    // ビットシフト・マスク定数
    const PAWN_SHIFT: u32 = 0;
    const PAWN_MASK: u32 = 0x1F; // 5bit (最大18枚)
    const LANCE_SHIFT: u32 = 5;
    const LANCE_MASK: u32 = 0x07; // 3bit (最大4枚)
    const KNIGHT_SHIFT: u32 = 8;
    const KNIGHT_MASK: u32 = 0x07;
    const SILVER_SHIFT: u32 = 11;
    const SILVER_MASK: u32 = 0x07;
    const GOLD_SHIFT: u32 = 14;
    const GOLD_MASK: u32 = 0x07;
    const BISHOP_SHIFT: u32 = 17;
    const BISHOP_MASK: u32 = 0x03; // 2bit (最大2枚)
    const ROOK_SHIFT: u32 = 19;
    const ROOK_MASK: u32 = 0x03;

    /// 指定駒種の枚数を取得
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        match Self::shift_mask(pt) {
            Some((shift, mask)) => (self.0 >> shift) & mask,
            None => 0,
        }
    }

    /// 指定駒種を持っているか
    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    /// 1枚追加
    #[inline]
    pub const fn add(self, pt: PieceType) -> Hand {
        match Self::shift_mask(pt) {
            Some((shift, _)) => Hand(self.0 + (1 << shift)),
            None => self,
        }
    }

    /// 1枚減らす（持っていなければNone）
    #[inline]
    pub const fn checked_sub(self, pt: PieceType) -> Option<Hand> {
        match Self::shift_mask(pt) {
            Some((shift, _)) if self.has(pt) => Some(Hand(self.0 - (1 << shift))),
            _ => None,
        }
    }

    /// 指定枚数をセット
    #[inline]
    pub const fn set(self, pt: PieceType, count: u32) -> Hand {
        match Self::shift_mask(pt) {
            Some((shift, mask)) => Hand((self.0 & !(mask << shift)) | ((count & mask) << shift)),
            None => self,
        }
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 全駒種の合計枚数
    pub fn total(self) -> u32 {
        PieceType::HAND_PIECES.iter().map(|&pt| self.count(pt)).sum()
    }

    /// 持っている駒種と枚数（SFEN の出力順）
    pub fn iter(self) -> impl Iterator<Item = (PieceType, u32)> {
        PieceType::SFEN_HAND_ORDER
            .into_iter()
            .map(move |pt| (pt, self.count(pt)))
            .filter(|&(_, n)| n > 0)
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn shift_mask(pt: PieceType) -> Option<(u32, u32)> {
        match pt {
            PieceType::Pawn => Some((Self::PAWN_SHIFT, Self::PAWN_MASK)),
            PieceType::Lance => Some((Self::LANCE_SHIFT, Self::LANCE_MASK)),
            PieceType::Knight => Some((Self::KNIGHT_SHIFT, Self::KNIGHT_MASK)),
            PieceType::Silver => Some((Self::SILVER_SHIFT, Self::SILVER_MASK)),
            PieceType::Gold => Some((Self::GOLD_SHIFT, Self::GOLD_MASK)),
            PieceType::Bishop => Some((Self::BISHOP_SHIFT, Self::BISHOP_MASK)),
            PieceType::Rook => Some((Self::ROOK_SHIFT, Self::ROOK_MASK)),
            _ => None, // King, 成駒は手駒にならない
        }
    }
}
