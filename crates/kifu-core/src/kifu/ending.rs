use serde::{Deserialize, Serialize};

/// 対局の終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ending {
    Toryo,
    Chudan,
    Sennichite,
    TimeUp,
    IllegalMove,
    #[serde(rename = "+ILLEGAL_ACTION")]
    BlackIllegalAction,
    #[serde(rename = "-ILLEGAL_ACTION")]
    WhiteIllegalAction,
    Jishogi,
    Kachi,
    Hikiwake,
    MaxMoves,
    Matta,
    Tsumi,
    Fuzumi,
    Error,
}

impl Ending {
    pub const ALL: [Ending; 15] = [
        Ending::Toryo,
        Ending::Chudan,
        Ending::Sennichite,
        Ending::TimeUp,
        Ending::IllegalMove,
        Ending::BlackIllegalAction,
        Ending::WhiteIllegalAction,
        Ending::Jishogi,
        Ending::Kachi,
        Ending::Hikiwake,
        Ending::MaxMoves,
        Ending::Matta,
        Ending::Tsumi,
        Ending::Fuzumi,
        Ending::Error,
    ];

    /// CSA 形式の表記（`%` を除く）
    pub const fn csa_name(self) -> &'static str {
        match self {
            Ending::Toryo => "TORYO",
            Ending::Chudan => "CHUDAN",
            Ending::Sennichite => "SENNICHITE",
            Ending::TimeUp => "TIME_UP",
            Ending::IllegalMove => "ILLEGAL_MOVE",
            Ending::BlackIllegalAction => "+ILLEGAL_ACTION",
            Ending::WhiteIllegalAction => "-ILLEGAL_ACTION",
            Ending::Jishogi => "JISHOGI",
            Ending::Kachi => "KACHI",
            Ending::Hikiwake => "HIKIWAKE",
            Ending::MaxMoves => "MAX_MOVES",
            Ending::Matta => "MATTA",
            Ending::Tsumi => "TSUMI",
            Ending::Fuzumi => "FUZUMI",
            Ending::Error => "ERROR",
        }
    }

    pub fn from_csa(name: &str) -> Option<Ending> {
        Ending::ALL.into_iter().find(|e| e.csa_name() == name)
    }

    /// KIF 形式の表記
    pub const fn kif_name(self) -> &'static str {
        match self {
            Ending::Toryo => "投了",
            Ending::Chudan => "中断",
            Ending::Sennichite => "千日手",
            Ending::TimeUp => "切れ負け",
            Ending::IllegalMove => "反則負け",
            Ending::BlackIllegalAction => "不戦敗",
            Ending::WhiteIllegalAction => "不戦勝",
            Ending::Jishogi => "持将棋",
            Ending::Kachi => "入玉勝ち",
            Ending::Hikiwake => "引き分け",
            Ending::MaxMoves => "最大手数",
            Ending::Matta => "待った",
            Ending::Tsumi => "詰み",
            Ending::Fuzumi => "不詰",
            Ending::Error => "エラー",
        }
    }

    /// KIF 形式の表記から変換（"反則勝ち" は `Kachi`）
    pub fn from_kif(name: &str) -> Option<Ending> {
        match name {
            "反則勝ち" => Some(Ending::Kachi),
            _ => Ending::ALL.into_iter().find(|e| e.kif_name() == name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for e in Ending::ALL {
            assert_eq!(Ending::from_csa(e.csa_name()), Some(e));
            assert_eq!(Ending::from_kif(e.kif_name()), Some(e));
            assert_eq!(serde_json::to_value(e).unwrap(), e.csa_name());
        }
        assert_eq!(Ending::from_kif("反則勝ち"), Some(Ending::Kachi));
        assert_eq!(Ending::from_kif("７六歩"), None);
        assert_eq!(Ending::from_csa("toryo"), None);
    }
}
