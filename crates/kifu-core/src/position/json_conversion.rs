use crate::types::json::{BoardStateJson, CellJson, HandJson, HandsJson, PieceJson};
use crate::types::{Color, Hand, PieceType, Place};

use super::{Position, SfenError, ValidationError};

impl Position {
    /// 現在の盤面をJSON形式に変換する。
    pub fn to_board_state_json(&self, move_number: u32) -> Result<BoardStateJson, ValidationError> {
        let sfen = self.to_sfen(move_number)?;

        let places: Vec<Place> = Place::all().collect();
        let cells: Vec<Vec<CellJson>> = places
            .chunks(9)
            .map(|row| {
                row.iter()
                    .map(|&place| CellJson {
                        label: place.label(),
                        place: place.raw(),
                        piece: self.piece_on(place).map(|(c, pt)| piece_to_json(c, pt)),
                    })
                    .collect()
            })
            .collect();

        Ok(BoardStateJson {
            cells,
            hands: HandsJson {
                sente: hand_to_json(self.hand(Color::Black)),
                gote: hand_to_json(self.hand(Color::White)),
            },
            turn: self.side_to_move.label().to_string(),
            sfen,
        })
    }

    /// SFEN文字列を解析してJSON形式に変換する。
    pub fn parse_sfen_to_json(sfen: &str) -> Result<BoardStateJson, SfenError> {
        let (pos, move_number) = Position::from_sfen_with_move_number(sfen)?;
        // 解析に成功した手数は 1 以上
        pos.to_board_state_json(move_number)
            .map_err(|_| SfenError::BadMoveNumber(move_number.to_string()))
    }
}

fn piece_to_json(color: Color, pt: PieceType) -> PieceJson {
    PieceJson {
        owner: color.label().to_string(),
        piece_type: pt.csa_name().to_string(),
        glyph: pt.glyph().to_string(),
        promoted: pt.is_promoted().then_some(true),
    }
}

fn hand_to_json(hand: Hand) -> HandJson {
    let count = |pt| Some(hand.count(pt)).filter(|&n| n > 0);

    HandJson {
        rook: count(PieceType::Rook),
        bishop: count(PieceType::Bishop),
        gold: count(PieceType::Gold),
        silver: count(PieceType::Silver),
        knight: count(PieceType::Knight),
        lance: count(PieceType::Lance),
        pawn: count(PieceType::Pawn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SFEN_HIRATE;

    #[test]
    fn test_initial_board_json() {
        let board = Position::default().to_board_state_json(1).unwrap();
        assert_eq!(board.turn, "sente");
        assert_eq!(board.cells.len(), 9);
        assert_eq!(board.sfen, SFEN_HIRATE);

        let rook_cell = &board.cells[7][7];
        assert_eq!(rook_cell.label, "２八");
        assert_eq!(rook_cell.place, 0x77);
        let piece = rook_cell.piece.as_ref().expect("rook should exist");
        assert_eq!(piece.owner, "sente");
        assert_eq!(piece.piece_type, "HI");
        assert_eq!(piece.glyph, "飛");
        assert_eq!(piece.promoted, None);

        let bishop_cell = &board.cells[1][7];
        assert_eq!(bishop_cell.label, "２二");
        let piece = bishop_cell.piece.as_ref().expect("bishop should exist");
        assert_eq!(piece.owner, "gote");
        assert_eq!(piece.piece_type, "KA");

        assert!(board.cells[4][4].piece.is_none());
    }

    #[test]
    fn test_promoted_and_hands() {
        let board = Position::parse_sfen_to_json("4k4/9/9/9/4+P4/9/9/9/4K4 w 2Pb 12").unwrap();
        let piece = board.cells[4][4].piece.as_ref().expect("tokin should exist");
        assert_eq!(piece.piece_type, "TO");
        assert_eq!(piece.glyph, "と");
        assert_eq!(piece.promoted, Some(true));
        assert_eq!(board.hands.sente.pawn, Some(2));
        assert_eq!(board.hands.sente.rook, None);
        assert_eq!(board.hands.gote.bishop, Some(1));
        assert_eq!(board.turn, "gote");
        assert!(board.sfen.ends_with(" 12"));
    }

    #[test]
    fn test_json_shape() {
        let board = Position::parse_sfen_to_json("4k4/9/9/9/9/9/9/9/4K4 b P 1").unwrap();
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["hands"]["sente"]["FU"], 1);
        assert!(value["hands"]["gote"].as_object().unwrap().is_empty());
        assert_eq!(value["cells"][8][4]["piece"]["type"], "OU");
        assert!(value["cells"][8][4]["piece"].get("promoted").is_none());
    }

    #[test]
    fn test_zero_move_number_rejected() {
        assert_eq!(
            Position::default().to_board_state_json(0),
            Err(ValidationError::MoveNumber(0))
        );
    }
}
