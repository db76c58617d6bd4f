//! 駒の場所（Place）

use serde::{Deserialize, Serialize};

/// 駒の場所（1 byte）
///
/// 上位 4bit が行（0:一段目〜8:九段目）、下位 4bit が列（0:9筋〜8:1筋）。
/// `0xFF` は持ち駒（駒台）を表す。
///
/// ```text
/// １一 ＝ 1筋1段 ＝ 0行8列 ＝ 0x08
/// ２六 ＝ 2筋6段 ＝ 5行7列 ＝ 0x57
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Place(u8);

const FULL_WIDTH_FILES: [char; 9] = ['１', '２', '３', '４', '５', '６', '７', '８', '９'];
const KANJI_RANKS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

impl Place {
    /// 持ち駒
    pub const IN_HAND: Place = Place(0xFF);

    /// 行・列から生成（範囲外ならNone）
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Place> {
        if row < 9 && col < 9 { Some(Place((row << 4) | col)) } else { None }
    }

    /// 筋・段（1-9）から生成
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Place> {
        if file < 1 || file > 9 || rank < 1 || rank > 9 {
            return None;
        }
        Place::new(rank - 1, 9 - file)
    }

    /// 内部値から生成（検証なし、盤外の値もそのまま保持する）
    #[inline]
    pub const fn from_raw(raw: u8) -> Place {
        Place(raw)
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 持ち駒かどうか
    #[inline]
    pub const fn is_in_hand(self) -> bool {
        self.0 == Self::IN_HAND.0
    }

    /// 盤上の有効なマスを指しているか
    #[inline]
    pub const fn is_on_board(self) -> bool {
        (self.0 >> 4) < 9 && (self.0 & 0x0F) < 9
    }

    /// 行・列（盤上の有効なマスでなければNone）
    #[inline]
    pub const fn cell(self) -> Option<(usize, usize)> {
        if self.is_on_board() {
            Some(((self.0 >> 4) as usize, (self.0 & 0x0F) as usize))
        } else {
            None
        }
    }

    /// 筋・段（1-9）
    #[inline]
    pub const fn file_rank(self) -> Option<(u8, u8)> {
        if self.is_on_board() { Some((9 - (self.0 & 0x0F), (self.0 >> 4) + 1)) } else { None }
    }

    /// 全角数字と漢数字による表記（"７六"）
    ///
    /// 持ち駒は "打" を返す。
    pub fn label(self) -> String {
        match self.file_rank() {
            Some((file, rank)) => {
                let mut s = String::with_capacity(6);
                s.push(FULL_WIDTH_FILES[file as usize - 1]);
                s.push(KANJI_RANKS[rank as usize - 1]);
                s
            }
            None if self.is_in_hand() => "打".to_string(),
            None => "??".to_string(),
        }
    }

    /// 全角数字と漢数字による表記（"７六"）から生成
    ///
    /// 3文字目以降は無視する。
    pub fn from_label(label: &str) -> Option<Place> {
        let mut chars = label.chars();
        let (file, rank) = (chars.next()?, chars.next()?);
        let file = FULL_WIDTH_FILES.iter().position(|&c| c == file)?;
        let rank = KANJI_RANKS.iter().position(|&c| c == rank)?;
        Place::from_file_rank(file as u8 + 1, rank as u8 + 1)
    }

    /// 盤上の全マス（行優先）
    pub fn all() -> impl Iterator<Item = Place> {
        (0..9u8).flat_map(|row| (0..9u8).map(move |col| Place((row << 4) | col)))
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file_rank() {
            Some((file, rank)) => write!(f, "{file}{rank}"),
            None if self.is_in_hand() => f.write_str("00"),
            None => write!(f, "?{:02x}", self.0),
        }
    }
}
