//! 棋譜ファイルの読み込み

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use kifu_core::kifu::Kifu;

/// 入力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// 分岐の一覧を持つ JSON
    Json,
    /// KIF 形式（UTF-8）
    Kif,
    /// CSA 形式
    Csa,
}

impl InputFormat {
    /// 拡張子から判定する（`.kif`/`.kifu` と `.csa` 以外は JSON）
    pub fn from_path(path: &Path) -> InputFormat {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if ext.eq_ignore_ascii_case("kif") || ext.eq_ignore_ascii_case("kifu") {
            InputFormat::Kif
        } else if ext.eq_ignore_ascii_case("csa") {
            InputFormat::Csa
        } else {
            InputFormat::Json
        }
    }

    /// 文字列から棋譜を読み込む
    pub fn parse(self, text: &str) -> Result<Kifu> {
        let kifu = match self {
            InputFormat::Json => serde_json::from_str(text).context("Invalid kifu JSON")?,
            InputFormat::Kif => Kifu::from_kif(text).context("Invalid KIF record")?,
            InputFormat::Csa => Kifu::from_csa(text).context("Invalid CSA record")?,
        };
        Ok(kifu)
    }
}

/// 棋譜ファイル（"-" は標準入力）を読み込む
///
/// 形式の指定がなければ拡張子から判定する。
pub fn read_kifu(path: &Path, format: Option<InputFormat>) -> Result<Kifu> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read kifu from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open kifu file: {}", path.display()))?
    };
    log::debug!("reading {} as {format:?}", path.display());
    format.parse(&text).with_context(|| format!("Failed to load kifu: {}", path.display()))
}
