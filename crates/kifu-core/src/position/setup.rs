//! 局面の組み立て
//!
//! CSA 形式の `P1`〜`P9`・`P+`・`P-`・`PI` のように、駒を一枚ずつ置いて開始局面を作るための操作。
//! どの操作も駒箱との間で駒をやり取りするため、駒の総数は保存される。

use thiserror::Error;

use crate::types::{Color, PieceType, Place, SupplyError};

use super::pos::Position;

/// 局面の組み立てに失敗した
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{0} is not a square on the board")]
    OffBoard(Place),

    #[error("{0} is already occupied")]
    Occupied(Place),

    #[error("{0} cannot be held in hand")]
    NotHandPiece(PieceType),

    #[error(transparent)]
    Supply(#[from] SupplyError),
}

impl Position {
    /// 盤上・駒台が空で全ての駒が駒箱にある局面
    pub fn all_in_box() -> Position {
        Position::empty()
    }

    /// 駒箱から取り出して盤上に置く
    pub fn put_piece(
        &mut self,
        place: Place,
        color: Color,
        pt: PieceType,
    ) -> Result<(), SetupError> {
        let (row, col) = place.cell().ok_or(SetupError::OffBoard(place))?;
        if self.piece_at(row, col).is_some() {
            return Err(SetupError::Occupied(place));
        }
        self.supply.take(pt, 1)?;
        self.boards[color.index()][row][col] = Some(pt);
        Ok(())
    }

    /// 盤上の駒を取り除いて駒箱に戻す
    pub fn remove_piece(&mut self, place: Place) -> Option<(Color, PieceType)> {
        let (row, col) = place.cell()?;
        let (color, pt) = self.piece_at(row, col)?;
        self.boards[color.index()][row][col] = None;
        self.supply.put_back(pt);
        Some((color, pt))
    }

    /// 駒箱から取り出して駒台に置く
    pub fn add_to_hand(&mut self, color: Color, pt: PieceType) -> Result<(), SetupError> {
        if !pt.is_hand_piece() {
            return Err(SetupError::NotHandPiece(pt));
        }
        self.supply.take(pt, 1)?;
        self.hands[color.index()] = self.hands[color.index()].add(pt);
        Ok(())
    }

    /// 駒箱に残っている玉以外の駒を全て駒台に置く
    pub fn take_rest_into_hand(&mut self, color: Color) {
        for (pt, n) in self.supply.iter() {
            if pt.is_hand_piece() && n > 0 && self.supply.take(pt, n).is_ok() {
                let hand = self.hands[color.index()];
                self.hands[color.index()] = hand.set(pt, hand.count(pt) + n);
            }
        }
    }

    /// 手番を設定する
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }
}
