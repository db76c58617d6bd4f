//! SFEN形式の解析・出力
//!
//! 解析は盤面 → 手番 → 持ち駒 → 手数の順に左から検証し、最初のエラーを返す。
//! 途中まで組み立てた局面が呼び出し側に渡ることはない。

use thiserror::Error;

use crate::types::{Color, PieceType, SupplyError};

use super::pos::Position;

/// 平手初期局面のSFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// 全ての駒が駒箱にある（盤上・駒台が空の）局面のSFEN
pub const SFEN_ALL_IN_BOX: &str = "9/9/9/9/9/9/9/9/9 b - 1";

/// SFENパースエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfenError {
    /// フィールド数が4でない
    #[error("expected 4 fields (board, turn, hands, move number), got {0}")]
    FieldCount(usize),

    /// 盤面の段数が9でない
    #[error("expected 9 rows, got {0}")]
    RowCount(usize),

    /// 段のマス数が9でない
    #[error("row {} has {columns} columns, expected 9", .row + 1)]
    RowLength { row: usize, columns: usize },

    /// 不明な駒文字
    #[error("invalid piece character '{glyph}' at row {} col {}", .row + 1, .col + 1)]
    UnknownPiece { row: usize, col: usize, glyph: char },

    /// 成りマークの連続
    #[error("consecutive promotion marks at row {} col {}", .row + 1, .col + 1)]
    DoubledPromotion { row: usize, col: usize },

    /// 成りマークの後に駒文字がない
    #[error("promotion mark without a piece at row {} col {}", .row + 1, .col + 1)]
    DanglingPromotion { row: usize, col: usize },

    /// 成れない駒に成りマークが付いている
    #[error("'{glyph}' cannot be promoted (row {} col {})", .row + 1, .col + 1)]
    CannotPromote { row: usize, col: usize, glyph: char },

    /// 駒箱の駒が足りない
    #[error(transparent)]
    Supply(#[from] SupplyError),

    /// 手番の形式が不正
    #[error("invalid turn indicator: expected 'b' or 'w', got '{0}'")]
    BadTurn(String),

    /// 持ち駒フィールドが空
    #[error("empty hands field")]
    EmptyHand,

    /// 持ち駒の末尾が枚数のみ
    #[error("number at end of hands section")]
    TrailingCount,

    /// 2桁以上の枚数（未対応）
    #[error("multi-digit hand counts are not supported")]
    MultiDigitCount,

    /// 持ち駒になれない駒文字
    #[error("invalid piece '{0}' in hands")]
    InvalidHandPiece(char),

    /// 同じ駒種が同じ手番の持ち駒に2回現れた
    #[error("duplicate {piece} in {color} hands")]
    DuplicateHandEntry { color: Color, piece: PieceType },

    /// 手数の形式が不正
    #[error("invalid move number: '{0}'")]
    BadMoveNumber(String),
}

/// SFEN出力時の検証エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid move number: must be positive, got {0}")]
    MoveNumber(u32),
}

impl Position {
    /// SFEN文字列から局面を生成（手数は読み捨てる）
    pub fn from_sfen(sfen: &str) -> Result<Position, SfenError> {
        Self::from_sfen_with_move_number(sfen).map(|(pos, _)| pos)
    }

    /// SFEN文字列から局面を生成（`None` の場合は平手）
    pub fn from_sfen_or_hirate(sfen: Option<&str>) -> Result<Position, SfenError> {
        Self::from_sfen(sfen.unwrap_or(SFEN_HIRATE))
    }

    /// SFEN文字列から局面と手数を生成
    pub fn from_sfen_with_move_number(sfen: &str) -> Result<(Position, u32), SfenError> {
        let fields: Vec<&str> = sfen.trim().split(' ').collect();
        if fields.len() != 4 {
            return Err(SfenError::FieldCount(fields.len()));
        }

        let mut pos = Position::empty();

        // 1. 盤面
        pos.parse_board(fields[0])?;

        // 2. 手番
        pos.side_to_move =
            Color::from_sfen(fields[1]).ok_or_else(|| SfenError::BadTurn(fields[1].to_string()))?;

        // 3. 持ち駒
        pos.parse_hand(fields[2])?;

        // 4. 手数
        let move_number = parse_move_number(fields[3])?;

        log::debug!("decoded sfen: {sfen}");
        Ok((pos, move_number))
    }

    /// 現局面のSFEN文字列を取得
    pub fn to_sfen(&self, move_number: u32) -> Result<String, ValidationError> {
        if move_number < 1 {
            return Err(ValidationError::MoveNumber(move_number));
        }

        let mut result = String::with_capacity(96);

        // 1. 盤面
        self.write_board(&mut result);

        // 2. 手番
        result.push(' ');
        result.push(self.side_to_move.to_sfen_char());

        // 3. 持ち駒
        result.push(' ');
        self.write_hands(&mut result);

        // 4. 手数
        result.push(' ');
        result.push_str(&move_number.to_string());

        Ok(result)
    }

    /// 盤面部分をパース
    fn parse_board(&mut self, board: &str) -> Result<(), SfenError> {
        let rows: Vec<&str> = board.split('/').collect();
        if rows.len() != 9 {
            return Err(SfenError::RowCount(rows.len()));
        }

        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            let mut promoted = false;

            for c in text.chars() {
                if c == '+' {
                    if promoted {
                        return Err(SfenError::DoubledPromotion { row, col });
                    }
                    promoted = true;
                    continue;
                }

                if let Some(n) = empty_run(c) {
                    if promoted {
                        return Err(SfenError::DanglingPromotion { row, col });
                    }
                    col += n;
                    if col > 9 {
                        return Err(SfenError::RowLength { row, columns: col });
                    }
                    continue;
                }

                let (color, base) = PieceType::from_sfen_letter(c)
                    .ok_or(SfenError::UnknownPiece { row, col, glyph: c })?;
                if col >= 9 {
                    return Err(SfenError::RowLength { row, columns: col + 1 });
                }
                let pt = if promoted {
                    base.promote().ok_or(SfenError::CannotPromote { row, col, glyph: c })?
                } else {
                    base
                };

                self.supply.take(pt, 1)?;
                self.boards[color.index()][row][col] = Some(pt);

                promoted = false;
                col += 1;
            }

            if promoted {
                return Err(SfenError::DanglingPromotion { row, col });
            }
            if col != 9 {
                return Err(SfenError::RowLength { row, columns: col });
            }
        }

        Ok(())
    }

    /// 持ち駒部分をパース
    fn parse_hand(&mut self, field: &str) -> Result<(), SfenError> {
        if field == "-" {
            return Ok(());
        }
        if field.is_empty() {
            return Err(SfenError::EmptyHand);
        }

        let mut seen = [[false; PieceType::BASE_NUM]; Color::NUM];
        let mut count: Option<u32> = None;

        for c in field.chars() {
            if count.is_some() && c.is_ascii_digit() {
                return Err(SfenError::MultiDigitCount);
            }
            if let Some(n) = empty_run(c) {
                count = Some(n as u32);
                continue;
            }

            let (color, pt) = PieceType::from_sfen_letter(c)
                .filter(|(_, pt)| pt.is_hand_piece())
                .ok_or(SfenError::InvalidHandPiece(c))?;

            let slot = &mut seen[color.index()][pt.base_index()];
            if *slot {
                return Err(SfenError::DuplicateHandEntry { color, piece: pt });
            }
            *slot = true;

            let n = count.take().unwrap_or(1);
            self.supply.take(pt, n)?;
            self.hands[color.index()] = self.hands[color.index()].set(pt, n);
        }

        if count.is_some() {
            return Err(SfenError::TrailingCount);
        }

        Ok(())
    }

    fn write_board(&self, out: &mut String) {
        for row in 0..9 {
            let mut empty_count = 0;

            for col in 0..9 {
                match self.piece_at(row, col) {
                    None => empty_count += 1,
                    Some((color, pt)) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push_str(&pt.to_sfen(color));
                    }
                }
            }

            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if row < 8 {
                out.push('/');
            }
        }
    }

    /// 先手（大文字）→ 後手（小文字）の順に、2枚以上なら枚数を前置する
    fn write_hands(&self, out: &mut String) {
        let start = out.len();
        for color in Color::ALL {
            for (pt, cnt) in self.hand(color).iter() {
                if cnt > 1 {
                    out.push_str(&cnt.to_string());
                }
                out.push(match color {
                    Color::Black => pt.sfen_letter(),
                    Color::White => pt.sfen_letter().to_ascii_lowercase(),
                });
            }
        }
        if out.len() == start {
            out.push('-');
        }
    }
}

/// '1'〜'9' の数字を枚数（空きマス数）として読む
fn empty_run(c: char) -> Option<usize> {
    match c {
        '1'..='9' => c.to_digit(10).map(|d| d as usize),
        _ => None,
    }
}

fn parse_move_number(field: &str) -> Result<u32, SfenError> {
    let bad = || SfenError::BadMoveNumber(field.to_string());
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    match field.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(bad()),
    }
}
