//! 駒種（PieceType）と文字表現の定数表

use serde::{Deserialize, Serialize};

use super::Color;

/// 駒種（先後の区別なし）
///
/// 成駒は独立した値として持つため、「成金」「成玉」のような組み合わせは表現できない。
/// 盤上の空きマスは `Option<PieceType>` の `None` で表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    // 生駒
    #[serde(rename = "FU")]
    Pawn = 0,
    #[serde(rename = "KY")]
    Lance = 1,
    #[serde(rename = "KE")]
    Knight = 2,
    #[serde(rename = "GI")]
    Silver = 3,
    #[serde(rename = "KI")]
    Gold = 4,
    #[serde(rename = "KA")]
    Bishop = 5,
    #[serde(rename = "HI")]
    Rook = 6,
    #[serde(rename = "OU")]
    King = 7,
    // 成駒
    #[serde(rename = "TO")]
    ProPawn = 8,
    #[serde(rename = "NY")]
    ProLance = 9,
    #[serde(rename = "NK")]
    ProKnight = 10,
    #[serde(rename = "NG")]
    ProSilver = 11,
    #[serde(rename = "UM")]
    Horse = 12, // 成角
    #[serde(rename = "RY")]
    Dragon = 13, // 成飛
}

impl PieceType {
    /// 駒種の数（成駒を含む）
    pub const NUM: usize = 14;

    /// 生駒の種類数
    pub const BASE_NUM: usize = 8;

    /// 全駒種
    pub const ALL: [PieceType; 14] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::King,
        PieceType::ProPawn,
        PieceType::ProLance,
        PieceType::ProKnight,
        PieceType::ProSilver,
        PieceType::Horse,
        PieceType::Dragon,
    ];

    /// 生駒一覧（`base_index` の順）
    pub const BASE: [PieceType; 8] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::King,
    ];

    /// 手駒になる駒種一覧
    pub const HAND_PIECES: [PieceType; 7] = [
        PieceType::Pawn,
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::Bishop,
        PieceType::Rook,
    ];

    /// SFEN の持ち駒を出力する順序
    ///
    /// 玉は手駒にならないが、表の完全性のため先頭に置く。
    pub const SFEN_HAND_ORDER: [PieceType; 8] = [
        PieceType::King,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 成れるかどうか
    #[inline]
    pub const fn can_promote(self) -> bool {
        matches!(
            self,
            PieceType::Pawn
                | PieceType::Lance
                | PieceType::Knight
                | PieceType::Silver
                | PieceType::Bishop
                | PieceType::Rook
        )
    }

    /// 成り駒を返す（成れない場合はNone）
    #[inline]
    pub const fn promote(self) -> Option<PieceType> {
        match self {
            PieceType::Pawn => Some(PieceType::ProPawn),
            PieceType::Lance => Some(PieceType::ProLance),
            PieceType::Knight => Some(PieceType::ProKnight),
            PieceType::Silver => Some(PieceType::ProSilver),
            PieceType::Bishop => Some(PieceType::Horse),
            PieceType::Rook => Some(PieceType::Dragon),
            _ => None,
        }
    }

    /// 成り駒を返す（金・玉・成駒はそのまま）
    #[inline]
    pub const fn promote_or_self(self) -> PieceType {
        match self.promote() {
            Some(pt) => pt,
            None => self,
        }
    }

    /// 生駒を返す（既に生駒の場合はそのまま）
    #[inline]
    pub const fn unpromote(self) -> PieceType {
        match self {
            PieceType::ProPawn => PieceType::Pawn,
            PieceType::ProLance => PieceType::Lance,
            PieceType::ProKnight => PieceType::Knight,
            PieceType::ProSilver => PieceType::Silver,
            PieceType::Horse => PieceType::Bishop,
            PieceType::Dragon => PieceType::Rook,
            _ => self,
        }
    }

    /// 成駒かどうか
    #[inline]
    pub const fn is_promoted(self) -> bool {
        self as u8 >= 8
    }

    /// 遠方駒（香角飛馬龍）かどうか
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(
            self,
            PieceType::Lance
                | PieceType::Bishop
                | PieceType::Rook
                | PieceType::Horse
                | PieceType::Dragon
        )
    }

    /// 手駒になれる駒種かどうか（生駒かつ玉以外）
    #[inline]
    pub const fn is_hand_piece(self) -> bool {
        !self.is_promoted() && !matches!(self, PieceType::King)
    }

    /// インデックス（0-13）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 生駒に戻した駒種のインデックス（0-7）
    #[inline]
    pub const fn base_index(self) -> usize {
        self.unpromote() as usize
    }

    /// 盤上・駒台・駒箱を合わせた駒の総数（生駒単位）
    #[inline]
    pub const fn total_count(self) -> u8 {
        match self.unpromote() {
            PieceType::Pawn => 18,
            PieceType::Bishop | PieceType::Rook | PieceType::King => 2,
            _ => 4,
        }
    }

    /// SFEN の駒文字（大文字、成りフラグは含まない）
    #[inline]
    pub const fn sfen_letter(self) -> char {
        match self.unpromote() {
            PieceType::Pawn => 'P',
            PieceType::Lance => 'L',
            PieceType::Knight => 'N',
            PieceType::Silver => 'S',
            PieceType::Gold => 'G',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            _ => 'K',
        }
    }

    /// SFEN の駒文字から手番と生駒を得る（大文字が先手）
    pub const fn from_sfen_letter(c: char) -> Option<(Color, PieceType)> {
        let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
        let pt = match c.to_ascii_uppercase() {
            'P' => PieceType::Pawn,
            'L' => PieceType::Lance,
            'N' => PieceType::Knight,
            'S' => PieceType::Silver,
            'G' => PieceType::Gold,
            'B' => PieceType::Bishop,
            'R' => PieceType::Rook,
            'K' => PieceType::King,
            _ => return None,
        };
        Some((color, pt))
    }

    /// SFEN 表記（"+P", "k" 等）に変換
    pub fn to_sfen(self, color: Color) -> String {
        let letter = match color {
            Color::Black => self.sfen_letter(),
            Color::White => self.sfen_letter().to_ascii_lowercase(),
        };
        if self.is_promoted() { format!("+{letter}") } else { letter.to_string() }
    }

    /// 盤面表示用の一文字表記
    pub const fn glyph(self) -> char {
        match self {
            PieceType::Pawn => '歩',
            PieceType::Lance => '香',
            PieceType::Knight => '桂',
            PieceType::Silver => '銀',
            PieceType::Gold => '金',
            PieceType::Bishop => '角',
            PieceType::Rook => '飛',
            PieceType::King => '玉',
            PieceType::ProPawn => 'と',
            PieceType::ProLance => '杏',
            PieceType::ProKnight => '圭',
            PieceType::ProSilver => '全',
            PieceType::Horse => '馬',
            PieceType::Dragon => '龍',
        }
    }

    /// CSA 形式の駒名
    pub const fn csa_name(self) -> &'static str {
        match self {
            PieceType::Pawn => "FU",
            PieceType::Lance => "KY",
            PieceType::Knight => "KE",
            PieceType::Silver => "GI",
            PieceType::Gold => "KI",
            PieceType::Bishop => "KA",
            PieceType::Rook => "HI",
            PieceType::King => "OU",
            PieceType::ProPawn => "TO",
            PieceType::ProLance => "NY",
            PieceType::ProKnight => "NK",
            PieceType::ProSilver => "NG",
            PieceType::Horse => "UM",
            PieceType::Dragon => "RY",
        }
    }

    /// CSA 形式の駒名から変換
    pub fn from_csa(name: &str) -> Option<PieceType> {
        PieceType::ALL.into_iter().find(|pt| pt.csa_name() == name)
    }

    /// KIF 形式の駒名
    pub const fn kif_name(self) -> &'static str {
        match self {
            PieceType::Pawn => "歩",
            PieceType::Lance => "香",
            PieceType::Knight => "桂",
            PieceType::Silver => "銀",
            PieceType::Gold => "金",
            PieceType::Bishop => "角",
            PieceType::Rook => "飛",
            PieceType::King => "玉",
            PieceType::ProPawn => "と",
            PieceType::ProLance => "成香",
            PieceType::ProKnight => "成桂",
            PieceType::ProSilver => "成銀",
            PieceType::Horse => "馬",
            PieceType::Dragon => "龍",
        }
    }

    /// KIF 形式の駒名から変換（杏・圭・全・竜・王の別表記を含む）
    pub fn from_kif(name: &str) -> Option<PieceType> {
        match name {
            "杏" => Some(PieceType::ProLance),
            "圭" => Some(PieceType::ProKnight),
            "全" => Some(PieceType::ProSilver),
            "竜" => Some(PieceType::Dragon),
            "王" => Some(PieceType::King),
            _ => PieceType::ALL.into_iter().find(|pt| pt.kif_name() == name),
        }
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.csa_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type_promote() {
        assert_eq!(PieceType::Pawn.promote(), Some(PieceType::ProPawn));
        assert_eq!(PieceType::Bishop.promote(), Some(PieceType::Horse));
        assert_eq!(PieceType::Rook.promote(), Some(PieceType::Dragon));
        assert_eq!(PieceType::Gold.promote(), None);
        assert_eq!(PieceType::King.promote(), None);
        assert_eq!(PieceType::ProPawn.promote(), None);
    }

    #[test]
    fn test_piece_type_promote_or_self() {
        assert_eq!(PieceType::Silver.promote_or_self(), PieceType::ProSilver);
        assert_eq!(PieceType::Gold.promote_or_self(), PieceType::Gold);
        assert_eq!(PieceType::King.promote_or_self(), PieceType::King);
        assert_eq!(PieceType::Horse.promote_or_self(), PieceType::Horse);
    }

    #[test]
    fn test_piece_type_unpromote() {
        assert_eq!(PieceType::ProPawn.unpromote(), PieceType::Pawn);
        assert_eq!(PieceType::Horse.unpromote(), PieceType::Bishop);
        assert_eq!(PieceType::Dragon.unpromote(), PieceType::Rook);
        assert_eq!(PieceType::Pawn.unpromote(), PieceType::Pawn);
        assert_eq!(PieceType::Gold.unpromote(), PieceType::Gold);
    }

    #[test]
    fn test_promotion_round_trip() {
        for pt in PieceType::BASE {
            if let Some(promoted) = pt.promote() {
                assert!(promoted.is_promoted());
                assert_eq!(promoted.unpromote(), pt);
            } else {
                assert!(!pt.can_promote());
            }
        }
    }

    #[test]
    fn test_piece_type_is_slider() {
        assert!(!PieceType::Pawn.is_slider());
        assert!(PieceType::Lance.is_slider());
        assert!(PieceType::Horse.is_slider());
        assert!(PieceType::Dragon.is_slider());
        assert!(!PieceType::ProLance.is_slider());
        assert!(!PieceType::Gold.is_slider());
    }

    #[test]
    fn test_hand_pieces() {
        assert!(PieceType::Pawn.is_hand_piece());
        assert!(PieceType::Rook.is_hand_piece());
        assert!(!PieceType::King.is_hand_piece());
        assert!(!PieceType::Dragon.is_hand_piece());
        assert!(PieceType::HAND_PIECES.iter().all(|pt| pt.is_hand_piece()));
    }

    #[test]
    fn test_total_count() {
        let total: u32 = PieceType::BASE.iter().map(|pt| pt.total_count() as u32).sum();
        assert_eq!(total, 40);
        assert_eq!(PieceType::Horse.total_count(), 2);
        assert_eq!(PieceType::ProPawn.total_count(), 18);
    }

    #[test]
    fn test_sfen_letters() {
        assert_eq!(PieceType::from_sfen_letter('P'), Some((Color::Black, PieceType::Pawn)));
        assert_eq!(PieceType::from_sfen_letter('k'), Some((Color::White, PieceType::King)));
        assert_eq!(PieceType::from_sfen_letter('+'), None);
        assert_eq!(PieceType::from_sfen_letter('x'), None);
        assert_eq!(PieceType::ProPawn.to_sfen(Color::Black), "+P");
        assert_eq!(PieceType::Horse.to_sfen(Color::White), "+b");
        assert_eq!(PieceType::Gold.to_sfen(Color::White), "g");
    }

    #[test]
    fn test_glyphs_are_unique() {
        for a in PieceType::ALL {
            for b in PieceType::ALL {
                if a != b {
                    assert_ne!(a.glyph(), b.glyph());
                }
            }
        }
        assert_eq!(PieceType::ProPawn.glyph(), 'と');
        assert_eq!(PieceType::Pawn.glyph(), '歩');
    }

    #[test]
    fn test_csa_and_kif_names() {
        assert_eq!(PieceType::from_csa("RY"), Some(PieceType::Dragon));
        assert_eq!(PieceType::from_csa("XX"), None);
        assert_eq!(PieceType::from_kif("成香"), Some(PieceType::ProLance));
        assert_eq!(PieceType::from_kif("杏"), Some(PieceType::ProLance));
        assert_eq!(PieceType::from_kif("竜"), Some(PieceType::Dragon));
        assert_eq!(PieceType::from_kif("飛"), Some(PieceType::Rook));
        assert_eq!(PieceType::Knight.to_string(), "KE");
    }
}
