use crate::kifu::{Branch, Ending, Kifu, KifuMove};
use crate::position::Handicap;
use crate::types::{Move, PieceType, Place};

use super::{ImportError, append_comment, main_branch, push_option};

/// 駒名と成・不成・打の間に入る動作の表記（"５八金右(69)"）
const DIRECTION_MARKS: &[char] = &['右', '左', '上', '引', '寄', '直', '行', '入'];

pub(super) fn parse(text: &str) -> Result<Kifu, ImportError> {
    let mut kifu = Kifu::default();
    kifu.branches.push(main_branch());
    // 読み込み中の分岐（`kifu.branches` の添字）
    let mut current = 0;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(comment) = line.strip_prefix('*') {
            append_comment(kifu.branches[current].moves.last_mut(), comment);
        } else if let Some(rest) = line.strip_prefix("変化：") {
            current = start_variation(&mut kifu.branches, rest, line_no)?;
        } else if let Some(number) = leading_number(line) {
            parse_move_line(&mut kifu.branches, current, line, number, line_no)?;
        } else if let Some((key, value)) = line.split_once('：') {
            parse_info(&mut kifu, key.trim(), value.trim());
        }
        // その他（表のヘッダー、"まで64手で先手の勝ち" など）は読み飛ばす
    }

    log::debug!(
        "imported KIF: {} branches, {} moves on the main line",
        kifu.branches.len(),
        kifu.branches[0].moves.len()
    );
    Ok(kifu)
}

fn parse_info(kifu: &mut Kifu, key: &str, value: &str) {
    match key {
        "手合割" => match Handicap::from_kif_name(value) {
            Some(handicap) => kifu.initial_position = Some(handicap.sfen().to_string()),
            None => {
                log::warn!("unknown handicap '{value}'; starting from the standard position");
                push_option(kifu, key, value);
            }
        },
        "先手" | "下手" => kifu.black_player = Some(value.to_string()),
        "後手" | "上手" => kifu.white_player = Some(value.to_string()),
        "表題" => kifu.title = Some(value.to_string()),
        _ => push_option(kifu, key, value),
    }
}

fn leading_number(line: &str) -> Option<u32> {
    line.split_ascii_whitespace().next()?.parse().ok()
}

/// "変化：N手" から分岐を作り、その添字を返す
///
/// 分岐元は、N手目を含む直近の分岐のうち N手目から始まる分岐ではないもの。
/// N手目から始まる分岐への変化は、その分岐と同じ分岐元からの兄弟になる。
fn start_variation(
    branches: &mut Vec<Branch>,
    rest: &str,
    line_no: usize,
) -> Result<usize, ImportError> {
    let number: u32 = rest
        .trim()
        .trim_end_matches('手')
        .parse()
        .map_err(|_| ImportError::InvalidMove { line: line_no, text: rest.to_string() })?;

    let parent = branches
        .iter()
        .rposition(|b| {
            b.moves.iter().any(|m| m.mv.number == number)
                && (b.is_main_line() || b.moves.first().is_some_and(|m| m.mv.number < number))
        })
        .ok_or(ImportError::OrphanVariation { line: line_no, number })?;

    let branch = Branch {
        id: format!("v{}", branches.len()),
        root_branch_id: Some(branches[parent].id.clone()),
        root_number: Some(number),
        moves: Vec::new(),
        ending: None,
    };
    branches.push(branch);
    Ok(branches.len() - 1)
}

fn parse_move_line(
    branches: &mut [Branch],
    current: usize,
    line: &str,
    number: u32,
    line_no: usize,
) -> Result<(), ImportError> {
    let invalid = || ImportError::InvalidMove { line: line_no, text: line.to_string() };

    let mut parts = line.split_ascii_whitespace().skip(1);
    let text = parts.next().ok_or_else(invalid)?;
    let time: String = parts.collect();

    let branch = &branches[current];
    let expected = match branch.moves.last() {
        Some(last) => last.mv.number + 1,
        None => branch.root_number.unwrap_or(1),
    };
    if number != expected {
        return Err(ImportError::MoveNumber { line: line_no, expected, found: number });
    }

    let (body, from) = split_source(text).ok_or_else(invalid)?;
    if let Some(ending) = Ending::from_kif(body) {
        branches[current].ending = Some(ending);
        return Ok(());
    }

    let (to, rest) = match body.strip_prefix('同') {
        Some(rest) => {
            let to = previous_destination(branches, current, number)
                .ok_or(ImportError::NoPreviousMove { line: line_no })?;
            (to, rest.trim_start_matches('　'))
        }
        None => (Place::from_label(body).ok_or_else(invalid)?, skip_chars(body, 2)),
    };

    let (piece, rest) = parse_piece(rest)
        .ok_or_else(|| ImportError::UnknownPiece { line: line_no, text: text.to_string() })?;
    let rest = rest.trim_start_matches(DIRECTION_MARKS);

    let mv = if rest.starts_with('打') || from.is_none() {
        if from.is_some() {
            return Err(invalid());
        }
        Move::drop(number, piece, to)
    } else {
        let from = from.ok_or_else(invalid)?;
        Move::new(number, piece, from, to, rest.starts_with('成'))
    };

    let time_spent_ms = parse_time(&time)
        .ok_or_else(|| ImportError::InvalidTime { line: line_no, text: time.clone() })?;
    branches[current].moves.push(KifuMove { mv, comment: None, time_spent_ms });
    Ok(())
}

/// "７六歩(77)" を "７六歩" と移動元に分ける（移動元がなければ `None`）
fn split_source(text: &str) -> Option<(&str, Option<Place>)> {
    let Some((body, source)) = text.split_once('(') else {
        return Some((text, None));
    };
    let digits = source.strip_suffix(')')?.as_bytes();
    if digits.len() != 2 || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let place = Place::from_file_rank(digits[0] - b'0', digits[1] - b'0')?;
    Some((body, Some(place)))
}

/// 直前の手の移動先（分岐の最初の手では分岐元をたどる）
fn previous_destination(branches: &[Branch], current: usize, number: u32) -> Option<Place> {
    let target = number.checked_sub(1)?;
    let mut branch = &branches[current];
    loop {
        if let Some(m) = branch.moves.iter().rev().find(|m| m.mv.number == target) {
            return Some(m.mv.to);
        }
        let root = branch.root_branch_id.as_deref()?;
        branch = branches.iter().find(|b| b.id == root)?;
    }
}

/// 先頭の1文字または2文字（"成香" など）を駒名として読む
fn parse_piece(text: &str) -> Option<(PieceType, &str)> {
    let mut ends = text.char_indices().map(|(i, c)| i + c.len_utf8());
    let one = ends.next()?;
    if let Some(pt) = PieceType::from_kif(&text[..one]) {
        return Some((pt, &text[one..]));
    }
    let two = ends.next()?;
    PieceType::from_kif(&text[..two]).map(|pt| (pt, &text[two..]))
}

fn skip_chars(text: &str, n: usize) -> &str {
    text.char_indices().nth(n).map_or("", |(i, _)| &text[i..])
}

/// "(0:16/00:00:16)" の1手の消費時間をミリ秒で返す（空なら `Some(None)`）
fn parse_time(text: &str) -> Option<Option<u64>> {
    if text.is_empty() {
        return Some(None);
    }
    let spent = text.trim_start_matches('(').trim_end_matches(')').split('/').next()?;

    let mut seconds = 0u64;
    for (unit, field) in [1u64, 60, 3600].into_iter().zip(spent.rsplit(':')) {
        seconds += unit * field.trim().parse::<u64>().ok()?;
    }
    Some(Some(seconds * 1000))
}
