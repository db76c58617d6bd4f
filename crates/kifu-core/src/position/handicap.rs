//! 駒落ちの開始局面

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sfen::{SFEN_HIRATE, SfenError};
use super::pos::Position;

/// 開始局面の種類（平手・駒落ち）
///
/// 駒落ちは上手（後手）から指し始める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Handicap {
    #[default]
    Hirate,
    KyoOchi,
    MigiKyoOchi,
    KakuOchi,
    HishaOchi,
    HiKyoOchi,
    NimaiOchi,
    SanmaiOchi,
    YonmaiOchi,
    GomaiOchi,
    HidariGomaiOchi,
    RokumaiOchi,
    HidariNanamaiOchi,
    MigiNanamaiOchi,
    HachimaiOchi,
    JumaiOchi,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown handicap '{0}'")]
pub struct ParseHandicapError(String);

impl Handicap {
    pub const ALL: [Handicap; 16] = [
        Handicap::Hirate,
        Handicap::KyoOchi,
        Handicap::MigiKyoOchi,
        Handicap::KakuOchi,
        Handicap::HishaOchi,
        Handicap::HiKyoOchi,
        Handicap::NimaiOchi,
        Handicap::SanmaiOchi,
        Handicap::YonmaiOchi,
        Handicap::GomaiOchi,
        Handicap::HidariGomaiOchi,
        Handicap::RokumaiOchi,
        Handicap::HidariNanamaiOchi,
        Handicap::MigiNanamaiOchi,
        Handicap::HachimaiOchi,
        Handicap::JumaiOchi,
    ];

    /// 開始局面のSFEN
    pub const fn sfen(self) -> &'static str {
        match self {
            Handicap::Hirate => SFEN_HIRATE,
            Handicap::KyoOchi => {
                "lnsgkgsn1/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::MigiKyoOchi => {
                "1nsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::KakuOchi => "lnsgkgsnl/1r7/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::HishaOchi => "lnsgkgsnl/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::HiKyoOchi => "lnsgkgsn1/7b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::NimaiOchi => "lnsgkgsnl/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::SanmaiOchi => "lnsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::YonmaiOchi => "1nsgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::GomaiOchi => "2sgkgsn1/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::HidariGomaiOchi => {
                "1nsgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::RokumaiOchi => "2sgkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::HidariNanamaiOchi => {
                "2sgkg3/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::MigiNanamaiOchi => {
                "3gkgs2/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1"
            }
            Handicap::HachimaiOchi => "3gkg3/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
            Handicap::JumaiOchi => "4k4/9/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL w - 1",
        }
    }

    /// 設定ファイル・コマンドラインで使う名前
    pub const fn name(self) -> &'static str {
        match self {
            Handicap::Hirate => "hirate",
            Handicap::KyoOchi => "kyo-ochi",
            Handicap::MigiKyoOchi => "migi-kyo-ochi",
            Handicap::KakuOchi => "kaku-ochi",
            Handicap::HishaOchi => "hisha-ochi",
            Handicap::HiKyoOchi => "hi-kyo-ochi",
            Handicap::NimaiOchi => "nimai-ochi",
            Handicap::SanmaiOchi => "sanmai-ochi",
            Handicap::YonmaiOchi => "yonmai-ochi",
            Handicap::GomaiOchi => "gomai-ochi",
            Handicap::HidariGomaiOchi => "hidari-gomai-ochi",
            Handicap::RokumaiOchi => "rokumai-ochi",
            Handicap::HidariNanamaiOchi => "hidari-nanamai-ochi",
            Handicap::MigiNanamaiOchi => "migi-nanamai-ochi",
            Handicap::HachimaiOchi => "hachimai-ochi",
            Handicap::JumaiOchi => "jumai-ochi",
        }
    }

    /// KIF 形式の手合割の表記
    pub const fn kif_name(self) -> &'static str {
        match self {
            Handicap::Hirate => "平手",
            Handicap::KyoOchi => "香落ち",
            Handicap::MigiKyoOchi => "右香落ち",
            Handicap::KakuOchi => "角落ち",
            Handicap::HishaOchi => "飛車落ち",
            Handicap::HiKyoOchi => "飛香落ち",
            Handicap::NimaiOchi => "二枚落ち",
            Handicap::SanmaiOchi => "三枚落ち",
            Handicap::YonmaiOchi => "四枚落ち",
            Handicap::GomaiOchi => "五枚落ち",
            Handicap::HidariGomaiOchi => "左五枚落ち",
            Handicap::RokumaiOchi => "六枚落ち",
            Handicap::HidariNanamaiOchi => "左七枚落ち",
            Handicap::MigiNanamaiOchi => "右七枚落ち",
            Handicap::HachimaiOchi => "八枚落ち",
            Handicap::JumaiOchi => "十枚落ち",
        }
    }

    /// KIF 形式の手合割の表記から変換
    pub fn from_kif_name(name: &str) -> Option<Handicap> {
        Handicap::ALL.into_iter().find(|h| h.kif_name() == name)
    }

    /// 開始局面を生成
    pub fn position(self) -> Result<Position, SfenError> {
        Position::from_sfen(self.sfen())
    }
}

impl std::fmt::Display for Handicap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Handicap {
    type Err = ParseHandicapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handicap::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| ParseHandicapError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceType};

    #[test]
    fn test_all_presets_decode() {
        for h in Handicap::ALL {
            let pos = h.position().unwrap_or_else(|e| panic!("{h}: {e}"));
            assert!(pos.verify_conservation(), "{h}");
            let expected = if h == Handicap::Hirate { Color::Black } else { Color::White };
            assert_eq!(pos.side_to_move(), expected, "{h}");
        }
    }

    #[test]
    fn test_removed_pieces_stay_in_supply() {
        let pos = Handicap::NimaiOchi.position().unwrap();
        assert_eq!(pos.supply().count(PieceType::Rook), 1);
        assert_eq!(pos.supply().count(PieceType::Bishop), 1);

        let pos = Handicap::JumaiOchi.position().unwrap();
        assert_eq!(pos.supply().count(PieceType::Gold), 2);
        assert_eq!(pos.supply().count(PieceType::Lance), 2);
    }

    #[test]
    fn test_name_roundtrip() {
        for h in Handicap::ALL {
            assert_eq!(h.name().parse::<Handicap>(), Ok(h));
            let json = serde_json::to_value(h).unwrap();
            assert_eq!(json, h.name());
        }
        assert!("hirate ".parse::<Handicap>().is_err());
    }

    #[test]
    fn test_kif_name() {
        for h in Handicap::ALL {
            assert_eq!(Handicap::from_kif_name(h.kif_name()), Some(h));
        }
        assert_eq!(Handicap::from_kif_name("飛車落ち"), Some(Handicap::HishaOchi));
        assert_eq!(Handicap::from_kif_name("その他"), None);
    }
}
