//! 局面（Position）

use crate::types::{Color, Hand, PieceBox, PieceType, Place};

use super::sfen::SFEN_HIRATE;

/// 片方の手番の盤面（`[段][列]`、列 0 が 9 筋）
pub type Grid = [[Option<PieceType>; 9]; 9];

/// 局面
///
/// 盤面は手番ごとに 9x9 の配列で持つ。同じマスに両者の駒が同時に存在することはない。
/// 駒箱（`supply`）には盤上にも駒台にもない駒が入っており、
/// 盤上・駒台・駒箱の合計は常に駒種ごとの総数（歩18、香桂銀金4、角飛玉2）に等しい。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(super) boards: [Grid; Color::NUM],
    pub(super) hands: [Hand; Color::NUM],
    pub(super) supply: PieceBox,
    pub(super) side_to_move: Color,
}

impl Position {
    /// 盤上・駒台が空で全ての駒が駒箱にある局面
    pub(super) fn empty() -> Position {
        Position {
            boards: [[[None; 9]; 9]; Color::NUM],
            hands: [Hand::EMPTY; Color::NUM],
            supply: PieceBox::FULL,
            side_to_move: Color::Black,
        }
    }

    /// 手番
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 指定したマスの駒（段・列は 0 始まり）
    #[inline]
    pub fn piece_at(&self, row: usize, col: usize) -> Option<(Color, PieceType)> {
        if row >= 9 || col >= 9 {
            return None;
        }
        Color::ALL
            .into_iter()
            .find_map(|c| self.boards[c.index()][row][col].map(|pt| (c, pt)))
    }

    /// 指定した場所の駒（駒台・範囲外は `None`）
    #[inline]
    pub fn piece_on(&self, place: Place) -> Option<(Color, PieceType)> {
        place.cell().and_then(|(row, col)| self.piece_at(row, col))
    }

    /// 手番ごとの盤面
    #[inline]
    pub fn grid(&self, color: Color) -> &Grid {
        &self.boards[color.index()]
    }

    /// 持ち駒
    #[inline]
    pub fn hand(&self, color: Color) -> Hand {
        self.hands[color.index()]
    }

    /// 駒箱
    #[inline]
    pub fn supply(&self) -> PieceBox {
        self.supply
    }

    /// 独立した複製を作る
    ///
    /// 盤面・持ち駒・駒箱はすべて値で保持しているため、複製後の変更は元の局面に影響しない。
    pub fn copy(&self) -> Position {
        self.clone()
    }

    /// 駒種（生駒）ごとの盤上・駒台・駒箱の合計枚数
    pub fn piece_totals(&self) -> [u32; PieceType::BASE_NUM] {
        let mut totals = [0u32; PieceType::BASE_NUM];

        for grid in &self.boards {
            for pt in grid.iter().flatten().flatten() {
                totals[pt.base_index()] += 1;
            }
        }
        for hand in self.hands {
            for (pt, n) in hand.iter() {
                totals[pt.base_index()] += n;
            }
        }
        for (pt, n) in self.supply.iter() {
            totals[pt.base_index()] += n;
        }

        totals
    }

    /// 駒の総数が保存されているか
    pub fn verify_conservation(&self) -> bool {
        let totals = self.piece_totals();
        let ok = PieceType::BASE.iter().all(|&pt| totals[pt.base_index()] == pt.total_count() as u32);
        if !ok {
            log::warn!("piece totals out of balance: {totals:?}");
        }
        ok
    }

    /// 指定したマスの駒が盤上の配置だけを見て動ける先
    ///
    /// 自駒で止まり、相手の駒は取れるマスとして含めて止まる。
    /// 王手放置・行き所のない駒・二歩などの合法性は考慮しない。
    pub fn reachable_places(&self, from: Place) -> Vec<Place> {
        let Some((row, col)) = from.cell() else {
            return Vec::new();
        };
        let Some((color, pt)) = self.piece_at(row, col) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        for ray in crate::types::movement::rays(pt) {
            for (d_file, d_rank) in ray.relative(color).offsets() {
                // 筋が増えると列は減る
                let r = row as i8 + d_rank;
                let c = col as i8 - d_file;
                if !(0..9).contains(&r) || !(0..9).contains(&c) {
                    break;
                }
                let Some(to) = Place::new(r as u8, c as u8) else {
                    break;
                };
                match self.piece_at(r as usize, c as usize) {
                    None => result.push(to),
                    Some((owner, _)) => {
                        if owner != color {
                            result.push(to);
                        }
                        break;
                    }
                }
            }
        }
        result
    }
}

impl Default for Position {
    /// 平手初期局面
    fn default() -> Self {
        Position::from_sfen(SFEN_HIRATE).unwrap_or_else(|_| Position::empty())
    }
}
