//! 指し手の適用と注釈
//!
//! `apply` は盤面を書き換える前に指し手の形式を検証する。
//! 検証に失敗した場合、局面は一切変更されない。
//! 行き所のない駒・二歩・王手放置などの将棋の合法性は扱わない。

use thiserror::Error;

use crate::types::{Color, Hand, Move, PieceType, Place};

use super::pos::Position;

/// 指し手の適用エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("destination {0} is not a board cell")]
    InvalidDestination(Place),

    #[error("source {0} is neither a board cell nor the hand")]
    InvalidSource(Place),

    #[error("{0} cannot be dropped")]
    NotDroppable(PieceType),

    #[error("a drop cannot promote")]
    PromotingDrop,

    #[error("{color} has no {piece} in hand")]
    NotInHand { color: Color, piece: PieceType },

    #[error("cannot drop onto occupied cell {0}")]
    DropOnOccupied(Place),

    #[error("{color} has no piece at {place}")]
    EmptySource { color: Color, place: Place },

    #[error("{place} holds {actual}, but the move says {expected}")]
    PieceMismatch { place: Place, expected: PieceType, actual: PieceType },

    #[error("{0} cannot promote")]
    CannotPromote(PieceType),

    #[error("{0} is occupied by the mover's own piece")]
    OwnPieceAtDestination(Place),
}

/// 検証済みの移動元
enum Source {
    /// 打った後の持ち駒
    Hand(Hand),
    Cell(usize, usize),
}

impl Position {
    /// 指し手を適用して手番を交代する
    ///
    /// 1. 移動先に相手の駒があれば取る（玉は駒箱へ、それ以外は生駒に戻して持ち駒へ）
    /// 2. 移動先に動かした駒（成る場合は成駒）を置く
    /// 3. 移動元を空ける（打つ場合は持ち駒を1枚減らす）
    /// 4. 手番を交代する
    pub fn apply(&mut self, mv: &Move) -> Result<(), MoveError> {
        let us = self.side_to_move;
        let (to_row, to_col) = mv.to.cell().ok_or(MoveError::InvalidDestination(mv.to))?;

        let source = self.check_source(mv, us)?;

        if self.boards[us.index()][to_row][to_col].is_some() {
            return Err(MoveError::OwnPieceAtDestination(mv.to));
        }

        // 1. 駒を取る
        let captured = self.boards[us.opponent().index()][to_row][to_col].take();
        match captured {
            Some(PieceType::King) => self.supply.put_back(PieceType::King),
            Some(pt) => self.hands[us.index()] = self.hands[us.index()].add(pt.unpromote()),
            None => {}
        }

        // 2. 駒を置く
        self.boards[us.index()][to_row][to_col] = Some(mv.piece_after());

        // 3. 移動元
        match source {
            Source::Hand(rest) => self.hands[us.index()] = rest,
            Source::Cell(row, col) => self.boards[us.index()][row][col] = None,
        }

        // 4. 手番交代
        self.side_to_move = us.opponent();

        log::debug!(
            "applied #{} {} by {}{}",
            mv.number,
            mv,
            us,
            captured.map(|pt| format!(", captured {pt}")).unwrap_or_default()
        );
        Ok(())
    }

    fn check_source(&self, mv: &Move, us: Color) -> Result<Source, MoveError> {
        if mv.is_drop() {
            if !mv.piece.is_hand_piece() {
                return Err(MoveError::NotDroppable(mv.piece));
            }
            if mv.promote {
                return Err(MoveError::PromotingDrop);
            }
            let rest = self
                .hand(us)
                .checked_sub(mv.piece)
                .ok_or(MoveError::NotInHand { color: us, piece: mv.piece })?;
            if self.piece_on(mv.to).is_some() {
                return Err(MoveError::DropOnOccupied(mv.to));
            }
            return Ok(Source::Hand(rest));
        }

        let (row, col) = mv.from.cell().ok_or(MoveError::InvalidSource(mv.from))?;
        let actual = self.boards[us.index()][row][col]
            .ok_or(MoveError::EmptySource { color: us, place: mv.from })?;
        if actual != mv.piece {
            return Err(MoveError::PieceMismatch { place: mv.from, expected: mv.piece, actual });
        }
        if mv.promote && !mv.piece.can_promote() {
            return Err(MoveError::CannotPromote(mv.piece));
        }
        Ok(Source::Cell(row, col))
    }

    /// 指し手で取られる駒（局面は変更しない）
    pub fn captured_piece(&self, mv: &Move) -> Option<PieceType> {
        let (row, col) = mv.to.cell()?;
        self.boards[self.side_to_move.opponent().index()][row][col]
    }

    /// 成り・不成の表示判定（局面は変更しない）
    ///
    /// - `Some(true)`: 成った
    /// - `Some(false)`: 成れたが成らなかった（「不成」と表示する）
    /// - `None`: 成りが問題にならない（駒打ち、成れない駒、敵陣に関わらない移動）
    pub fn promotion_state(&self, mv: &Move) -> Option<bool> {
        if mv.is_drop() {
            return None;
        }
        if mv.promote {
            return Some(true);
        }
        if !mv.piece.can_promote() {
            return None;
        }
        let us = self.side_to_move;
        let (from_row, _) = mv.from.cell()?;
        let (to_row, _) = mv.to.cell()?;
        if in_promotion_zone(us, from_row) || in_promotion_zone(us, to_row) {
            Some(false)
        } else {
            None
        }
    }
}

/// 敵陣（先手は一〜三段目、後手は七〜九段目）
#[inline]
fn in_promotion_zone(color: Color, row: usize) -> bool {
    match color {
        Color::Black => row <= 2,
        Color::White => row >= 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(file: u8, rank: u8) -> Place {
        Place::from_file_rank(file, rank).unwrap()
    }

    #[test]
    fn test_pawn_push() {
        let mut pos = Position::default();
        let mv = Move::new(1, PieceType::Pawn, place(7, 7), place(7, 6), false);
        pos.apply(&mv).unwrap();
        assert_eq!(pos.piece_on(place(7, 7)), None);
        assert_eq!(pos.piece_on(place(7, 6)), Some((Color::Black, PieceType::Pawn)));
        assert_eq!(pos.side_to_move(), Color::White);
        assert!(pos.verify_conservation());
    }

    #[test]
    fn test_capture_unpromotes_into_hand() {
        let mut pos = Position::from_sfen("4k4/9/9/9/4+s4/4R4/9/9/4K4 b - 1").unwrap();
        let mv = Move::new(1, PieceType::Rook, place(5, 6), place(5, 5), false);
        assert_eq!(pos.captured_piece(&mv), Some(PieceType::ProSilver));
        pos.apply(&mv).unwrap();
        assert_eq!(pos.hand(Color::Black).count(PieceType::Silver), 1);
        assert_eq!(pos.grid(Color::White)[4][4], None);
        assert_eq!(pos.grid(Color::Black)[4][4], Some(PieceType::Rook));
        assert!(pos.verify_conservation());
    }

    #[test]
    fn test_king_capture_goes_to_supply() {
        let mut pos = Position::from_sfen("9/9/9/9/4k4/4R4/9/9/4K4 b - 1").unwrap();
        let mv = Move::new(1, PieceType::Rook, place(5, 6), place(5, 5), false);
        pos.apply(&mv).unwrap();
        assert!(pos.hand(Color::Black).is_empty());
        assert_eq!(pos.supply().count(PieceType::King), 1);
        assert!(pos.verify_conservation());
    }

    #[test]
    fn test_promote_on_move() {
        let mut pos = Position::from_sfen("4k4/9/9/4P4/9/9/9/9/4K4 b - 1").unwrap();
        let mv = Move::new(1, PieceType::Pawn, place(5, 4), place(5, 3), true);
        assert_eq!(pos.promotion_state(&mv), Some(true));
        pos.apply(&mv).unwrap();
        assert_eq!(pos.piece_on(place(5, 3)), Some((Color::Black, PieceType::ProPawn)));
    }

    #[test]
    fn test_drop() {
        let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 w 2s 1").unwrap();
        let mv = Move::drop(1, PieceType::Silver, place(5, 5));
        pos.apply(&mv).unwrap();
        assert_eq!(pos.piece_on(place(5, 5)), Some((Color::White, PieceType::Silver)));
        assert_eq!(pos.hand(Color::White).count(PieceType::Silver), 1);
        assert_eq!(pos.side_to_move(), Color::Black);
        assert!(pos.verify_conservation());
    }

    #[test]
    fn test_rejected_moves_leave_position_untouched() {
        let pos = Position::from_sfen("4k4/9/9/9/4p4/9/9/4G4/4K4 b P 1").unwrap();
        let cases = [
            (
                Move::new(1, PieceType::Gold, place(5, 8), Place::IN_HAND, false),
                MoveError::InvalidDestination(Place::IN_HAND),
            ),
            (
                Move::new(1, PieceType::Gold, Place::from_raw(0x9A), place(5, 7), false),
                MoveError::InvalidSource(Place::from_raw(0x9A)),
            ),
            (Move::drop(1, PieceType::King, place(1, 1)), MoveError::NotDroppable(PieceType::King)),
            (
                Move::drop(1, PieceType::ProPawn, place(1, 1)),
                MoveError::NotDroppable(PieceType::ProPawn),
            ),
            (
                Move::new(1, PieceType::Pawn, Place::IN_HAND, place(1, 1), true),
                MoveError::PromotingDrop,
            ),
            (
                Move::drop(1, PieceType::Gold, place(1, 1)),
                MoveError::NotInHand { color: Color::Black, piece: PieceType::Gold },
            ),
            (Move::drop(1, PieceType::Pawn, place(5, 5)), MoveError::DropOnOccupied(place(5, 5))),
            (
                Move::new(1, PieceType::Pawn, place(1, 7), place(1, 6), false),
                MoveError::EmptySource { color: Color::Black, place: place(1, 7) },
            ),
            (
                Move::new(1, PieceType::Pawn, place(5, 5), place(5, 6), false),
                MoveError::EmptySource { color: Color::Black, place: place(5, 5) },
            ),
            (
                Move::new(1, PieceType::Silver, place(5, 8), place(5, 7), false),
                MoveError::PieceMismatch {
                    place: place(5, 8),
                    expected: PieceType::Silver,
                    actual: PieceType::Gold,
                },
            ),
            (
                Move::new(1, PieceType::Gold, place(5, 8), place(5, 7), true),
                MoveError::CannotPromote(PieceType::Gold),
            ),
            (
                Move::new(1, PieceType::Gold, place(5, 8), place(5, 9), false),
                MoveError::OwnPieceAtDestination(place(5, 9)),
            ),
            (
                Move::new(1, PieceType::Gold, place(5, 8), place(5, 8), false),
                MoveError::OwnPieceAtDestination(place(5, 8)),
            ),
        ];

        for (mv, expected) in cases {
            let mut after = pos.copy();
            assert_eq!(after.apply(&mv), Err(expected), "{mv:?}");
            assert_eq!(after, pos, "{mv:?} modified the position");
        }
    }

    #[test]
    fn test_promotion_state() {
        let pos = Position::from_sfen("4k4/9/9/4P4/9/9/9/9/4K4 b G 1").unwrap();
        let into_zone = Move::new(1, PieceType::Pawn, place(5, 4), place(5, 3), false);
        assert_eq!(pos.promotion_state(&into_zone), Some(false));
        let drop = Move::drop(1, PieceType::Gold, place(1, 5));
        assert_eq!(pos.promotion_state(&drop), None);
        let king = Move::new(1, PieceType::King, place(5, 9), place(5, 8), false);
        assert_eq!(pos.promotion_state(&king), None);

        // 後手の敵陣は七〜九段目
        let pos = Position::from_sfen("4k4/9/9/9/9/4s4/9/9/4K4 w - 1").unwrap();
        let out_of_zone = Move::new(1, PieceType::Silver, place(5, 6), place(5, 5), false);
        assert_eq!(pos.promotion_state(&out_of_zone), None);
        let into_zone = Move::new(1, PieceType::Silver, place(5, 6), place(5, 7), false);
        assert_eq!(pos.promotion_state(&into_zone), Some(false));
    }

    #[test]
    fn test_leaving_zone_counts() {
        let pos = Position::from_sfen("4k4/9/2S6/9/9/9/9/9/4K4 b - 1").unwrap();
        let mv = Move::new(1, PieceType::Silver, place(7, 3), place(6, 4), false);
        assert_eq!(pos.promotion_state(&mv), Some(false));
    }

    #[test]
    fn test_captured_piece_none_on_empty() {
        let pos = Position::default();
        let mv = Move::new(1, PieceType::Pawn, place(7, 7), place(7, 6), false);
        assert_eq!(pos.captured_piece(&mv), None);
        let bad = Move::new(1, PieceType::Pawn, place(7, 7), Place::IN_HAND, false);
        assert_eq!(pos.captured_piece(&bad), None);
    }
}
