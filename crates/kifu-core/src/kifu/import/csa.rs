use crate::kifu::{Ending, Kifu, KifuMove};
use crate::position::Position;
use crate::types::{Color, Move, PieceType, Place};

use super::{ImportError, append_comment, main_branch, push_option};

pub(super) fn parse(text: &str) -> Result<Kifu, ImportError> {
    let mut reader = Reader::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if let Some(comment) = line.strip_prefix("'*") {
            append_comment(reader.kifu.branches[0].moves.last_mut(), comment);
            continue;
        }
        if line.is_empty() || line.starts_with('\'') {
            continue;
        }
        for stmt in line.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            reader.statement(stmt, line_no)?;
        }
    }

    if !reader.started {
        return Err(ImportError::MissingTurn);
    }
    log::debug!("imported CSA: {} moves", reader.kifu.branches[0].moves.len());
    Ok(reader.kifu)
}

/// CSA の棋譜情報のキーを KIF の項目名にそろえる
fn info_name(key: &str) -> &str {
    match key {
        "EVENT" => "棋戦",
        "SITE" => "対局場所",
        "OPENING" => "戦型",
        "MAX_MOVES" => "最大手数",
        "START_TIME" => "開始日時",
        "END_TIME" => "終了日時",
        "TIME_LIMIT" => "持ち時間",
        other => other,
    }
}

struct Reader {
    kifu: Kifu,
    /// 開始局面の組み立て中、手番行の後は現在の局面
    position: Position,
    started: bool,
    rest_in_hand: bool,
}

impl Reader {
    fn new() -> Reader {
        let mut kifu = Kifu::default();
        kifu.branches.push(main_branch());
        Reader { kifu, position: Position::all_in_box(), started: false, rest_in_hand: false }
    }

    fn statement(&mut self, stmt: &str, line: usize) -> Result<(), ImportError> {
        if stmt.starts_with('V') {
            return Ok(());
        }
        if let Some(name) = stmt.strip_prefix("N+") {
            self.kifu.black_player = Some(name.to_string());
        } else if let Some(name) = stmt.strip_prefix("N-") {
            self.kifu.white_player = Some(name.to_string());
        } else if let Some(info) = stmt.strip_prefix('$') {
            match info.split_once(':') {
                Some((key, value)) => push_option(&mut self.kifu, info_name(key), value),
                None => log::warn!("line {line}: game info without a value ignored: {stmt}"),
            }
        } else if let Some(rest) = stmt.strip_prefix('P') {
            if self.started {
                return Err(invalid_position(line, stmt));
            }
            self.position_line(rest, line)?;
        } else if stmt == "+" || stmt == "-" {
            let color = if stmt == "+" { Color::Black } else { Color::White };
            self.start(color)?;
        } else if stmt.starts_with(['+', '-']) {
            self.play(stmt, line)?;
        } else if let Some(name) = stmt.strip_prefix('%') {
            match Ending::from_csa(name) {
                Some(ending) => self.kifu.branches[0].ending = Some(ending),
                None => log::debug!("line {line}: unknown ending '{name}' ignored"),
            }
        } else if let Some(seconds) = stmt.strip_prefix('T') {
            self.time(seconds, line)?;
        } else {
            log::debug!("line {line}: statement ignored: {stmt}");
        }
        Ok(())
    }

    fn position_line(&mut self, rest: &str, line: usize) -> Result<(), ImportError> {
        let stmt = format!("P{rest}");
        let mut chars = rest.chars();
        match chars.next() {
            Some('I') => self.handicap_start(chars.as_str(), line, &stmt),
            Some(c @ '1'..='9') => self.row(c as u8 - b'1', chars.as_str(), line, &stmt),
            Some('+') => self.pieces(Color::Black, chars.as_str(), line, &stmt),
            Some('-') => self.pieces(Color::White, chars.as_str(), line, &stmt),
            _ => Err(invalid_position(line, &stmt)),
        }
    }

    /// `PI`: 平手から指定の駒を除く
    fn handicap_start(
        &mut self,
        rest: &str,
        line: usize,
        stmt: &str,
    ) -> Result<(), ImportError> {
        let bad = || invalid_position(line, stmt);
        self.position = Position::default();
        for chunk in chunks4(rest).ok_or_else(bad)? {
            let place = csa_place(&chunk[..2]).ok_or_else(bad)?;
            let pt = PieceType::from_csa(&chunk[2..]).ok_or_else(bad)?;
            if self.position.piece_on(place).map(|(_, on_board)| on_board) != Some(pt) {
                return Err(bad());
            }
            self.position.remove_piece(place);
        }
        Ok(())
    }

    /// `P1`〜`P9`: 1段分の駒（9筋から順に3文字ずつ）
    fn row(&mut self, row: u8, cells: &str, line: usize, stmt: &str) -> Result<(), ImportError> {
        let bad = || invalid_position(line, stmt);
        let mut cells = cells.to_string();
        // 行末の " * " の空白は trim で消えている
        if cells.ends_with('*') {
            cells.push(' ');
        }
        if cells.len() != 27 || !cells.is_ascii() {
            return Err(bad());
        }

        for col in 0..9u8 {
            let cell = &cells[col as usize * 3..col as usize * 3 + 3];
            if cell == " * " {
                continue;
            }
            let color = match cell.as_bytes()[0] {
                b'+' => Color::Black,
                b'-' => Color::White,
                _ => return Err(bad()),
            };
            let pt = PieceType::from_csa(&cell[1..]).ok_or_else(bad)?;
            let place = Place::new(row, col).ok_or_else(bad)?;
            self.position
                .put_piece(place, color, pt)
                .map_err(|source| ImportError::Setup { line, source })?;
        }
        Ok(())
    }

    /// `P+`/`P-`: 駒を1枚ずつ置く（`00` は駒台、`00AL` は残り全て）
    fn pieces(
        &mut self,
        color: Color,
        rest: &str,
        line: usize,
        stmt: &str,
    ) -> Result<(), ImportError> {
        let bad = || invalid_position(line, stmt);
        for chunk in chunks4(rest).ok_or_else(bad)? {
            if chunk == "00AL" {
                if self.rest_in_hand {
                    return Err(bad());
                }
                self.rest_in_hand = true;
                self.position.take_rest_into_hand(color);
                continue;
            }

            let pt = PieceType::from_csa(&chunk[2..]).ok_or_else(bad)?;
            let result = if &chunk[..2] == "00" {
                self.position.add_to_hand(color, pt)
            } else {
                let place = csa_place(&chunk[..2]).ok_or_else(bad)?;
                self.position.put_piece(place, color, pt)
            };
            result.map_err(|source| ImportError::Setup { line, source })?;
        }
        Ok(())
    }

    /// 手番行: 開始局面を確定する
    fn start(&mut self, color: Color) -> Result<(), ImportError> {
        self.position.set_side_to_move(color);
        for c in Color::ALL {
            for pt in PieceType::HAND_PIECES {
                let count = self.position.hand(c).count(pt);
                if count > 9 {
                    return Err(ImportError::HandCountTooLarge { piece: pt, count });
                }
            }
        }
        self.kifu.initial_position = Some(self.position.to_sfen(1)?);
        self.started = true;
        Ok(())
    }

    /// 指し手（"+7776FU"）。駒種は移動後のものなので、移動元の駒と比べて成りを判定する
    fn play(&mut self, stmt: &str, line: usize) -> Result<(), ImportError> {
        if !self.started {
            return Err(ImportError::MissingTurn);
        }
        let invalid = || ImportError::InvalidMove { line, text: stmt.to_string() };
        if stmt.len() != 7 || !stmt.is_ascii() {
            return Err(invalid());
        }

        let color = if stmt.starts_with('+') { Color::Black } else { Color::White };
        if color != self.position.side_to_move() {
            return Err(ImportError::TurnSequence { line, text: stmt.to_string() });
        }

        let number = self.kifu.branches[0].moves.len() as u32 + 1;
        let to = csa_place(&stmt[3..5]).ok_or_else(invalid)?;
        let after = PieceType::from_csa(&stmt[5..])
            .ok_or_else(|| ImportError::UnknownPiece { line, text: stmt.to_string() })?;

        let mv = if &stmt[1..3] == "00" {
            Move::drop(number, after, to)
        } else {
            let from = csa_place(&stmt[1..3]).ok_or_else(invalid)?;
            let promote = self
                .position
                .piece_on(from)
                .is_some_and(|(_, before)| before != after && before.promote() == Some(after));
            let piece = if promote { after.unpromote() } else { after };
            Move::new(number, piece, from, to, promote)
        };

        self.position
            .apply(&mv)
            .map_err(|source| ImportError::Move { line, text: stmt.to_string(), source })?;
        self.kifu.branches[0].moves.push(KifuMove::from(mv));
        Ok(())
    }

    /// `T`: 直前の手の消費時間（秒）
    fn time(&mut self, seconds: &str, line: usize) -> Result<(), ImportError> {
        let invalid = || ImportError::InvalidTime { line, text: seconds.to_string() };
        let value: f64 = seconds.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        let last = self.kifu.branches[0].moves.last_mut().ok_or_else(invalid)?;
        last.time_spent_ms = Some((value * 1000.0).round() as u64);
        Ok(())
    }
}

fn invalid_position(line: usize, text: &str) -> ImportError {
    ImportError::InvalidPosition { line, text: text.to_string() }
}

/// "77" のような筋・段の2桁
fn csa_place(digits: &str) -> Option<Place> {
    let bytes = digits.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Place::from_file_rank(bytes[0] - b'0', bytes[1] - b'0')
}

/// 4文字ずつに区切る（長さが4の倍数でなければ `None`）
fn chunks4(text: &str) -> Option<Vec<&str>> {
    if text.len() % 4 != 0 || !text.is_ascii() {
        return None;
    }
    Some((0..text.len()).step_by(4).map(|i| &text[i..i + 4]).collect())
}
