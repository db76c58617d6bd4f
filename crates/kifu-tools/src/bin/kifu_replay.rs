/// 棋譜の再生ツール
///
/// 使い方:
///   # 1手ごとの局面をSFENで出力
///   kifu-replay game.json
///
///   # KIF・CSA 形式の棋譜を読み、指し手を KIF 形式で出力
///   kifu-replay game.kif --format kif
///   kifu-replay - --input csa < game.csa
///
///   # 駒落ちの開始局面から再生し、10手目の盤面をJSONで出力
///   kifu-replay game.json --handicap kaku-ochi --format json --ply 10
///
///   # 設定ファイルを使い、標準入力から読む
///   kifu-replay - --config replay.toml
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kifu_core::Handicap;
use kifu_tools::{InputFormat, OutputFormat, ReplayConfig, Replayed, read_kifu};

#[derive(Parser, Debug)]
#[command(author, version, about = "棋譜を再生して各手の局面を出力する")]
struct Cli {
    /// 棋譜ファイル（JSON・KIF・CSA、"-" で標準入力）
    kifu: PathBuf,

    /// 入力形式（省略時は拡張子から判定し、不明なら JSON）
    #[arg(long, value_enum)]
    input: Option<InputFormat>,

    /// 設定ファイル（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 開始局面のSFEN
    #[arg(long, conflicts_with = "handicap")]
    initial: Option<String>,

    /// 駒落ちの種類（kyo-ochi, kaku-ochi, hisha-ochi, nimai-ochi など）
    #[arg(long)]
    handicap: Option<Handicap>,

    /// 出力形式
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// JSON を整形して出力
    #[arg(long)]
    pretty: bool,

    /// メインラインの指定手数の局面のみ出力（0 は開始局面）
    #[arg(long)]
    ply: Option<usize>,

    /// ログを詳細にする（-v: info, -vv: debug）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ReplayConfig::load(cli.config.as_deref())?;
    config.override_start(cli.initial, cli.handicap);
    if let Some(format) = cli.format {
        config.format = format;
    }
    config.pretty |= cli.pretty;

    let kifu = read_kifu(&cli.kifu, cli.input)?;
    let replayed = Replayed::run(&kifu, &config)?;
    let text = replayed.render(config.format, config.pretty, cli.ply)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("Failed to write output")?;
    stdout.flush()?;
    Ok(())
}
