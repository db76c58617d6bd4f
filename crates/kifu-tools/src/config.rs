//! 再生設定
//!
//! TOML ファイルから読み込み、コマンドライン引数で上書きする。
//!
//! ```toml
//! handicap = "kaku-ochi"
//! format = "json"
//! pretty = true
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use kifu_core::Handicap;
use serde::{Deserialize, Serialize};

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 1手ごとに指した後の局面のSFEN
    #[default]
    Sfen,
    /// 指し手の木（`--ply` 指定時は盤面）のJSON
    Json,
    /// KIF 形式の指し手一覧
    Kif,
}

/// 再生設定
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// 開始局面のSFEN（棋譜ファイルの開始局面より優先）
    pub initial_position: Option<String>,
    /// 駒落ちの種類（`initial_position` と同時には指定できない）
    pub handicap: Option<Handicap>,
    /// 出力形式
    pub format: OutputFormat,
    /// JSON を整形して出力するか
    pub pretty: bool,
}

impl ReplayConfig {
    /// 設定ファイルを読み込む（ファイルがなければデフォルト）
    pub fn load(path: Option<&Path>) -> Result<ReplayConfig> {
        let Some(path) = path else {
            return Ok(ReplayConfig::default());
        };
        if !path.exists() {
            log::warn!("config file {} not found; using defaults", path.display());
            return Ok(ReplayConfig::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// TOML 文字列から読み込む
    pub fn from_toml(text: &str) -> Result<ReplayConfig> {
        let config: ReplayConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.initial_position.is_some() && self.handicap.is_some() {
            bail!("initial_position and handicap cannot both be set");
        }
        Ok(())
    }

    /// 開始局面の指定を上書きする（どちらか一方のみ有効）
    pub fn override_start(&mut self, initial: Option<String>, handicap: Option<Handicap>) {
        if let Some(sfen) = initial {
            self.initial_position = Some(sfen);
            self.handicap = None;
        } else if let Some(h) = handicap {
            self.handicap = Some(h);
            self.initial_position = None;
        }
    }

    /// 棋譜ファイルの開始局面に代えて使う局面（指定がなければ `None`）
    pub fn start_override(&self) -> Option<String> {
        self.initial_position
            .clone()
            .or_else(|| self.handicap.map(|h| h.sfen().to_string()))
    }
}
