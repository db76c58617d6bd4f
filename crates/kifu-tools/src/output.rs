//! 再生結果の出力

use anyhow::{Context, Result, bail};
use kifu_core::kifu::Kifu;
use kifu_core::{Ending, MoveNode, Position, SFEN_HIRATE, build_move_tree};

use crate::config::{OutputFormat, ReplayConfig};

/// 再生結果（開始局面とメインラインの木）
#[derive(Debug, Clone)]
pub struct Replayed {
    pub initial_sfen: String,
    pub tree: Vec<MoveNode>,
    /// メインラインの各手を指した後の局面（先頭は開始局面）
    positions: Vec<Position>,
    initial_number: u32,
    /// メインラインを最後まで再生できた場合の終局理由
    ending: Option<Ending>,
}

impl Replayed {
    /// 棋譜を設定に従って再生する
    pub fn run(kifu: &Kifu, config: &ReplayConfig) -> Result<Replayed> {
        let initial_sfen = config
            .start_override()
            .or_else(|| kifu.initial_position.clone())
            .unwrap_or_else(|| SFEN_HIRATE.to_string());

        let tree = build_move_tree(Some(&initial_sfen), &kifu.branches)
            .context("Failed to replay kifu")?;
        log::info!("replayed {} moves from {initial_sfen}", tree.len());

        let (mut position, initial_number) = Position::from_sfen_with_move_number(&initial_sfen)?;
        let mut positions = Vec::with_capacity(tree.len() + 1);
        positions.push(position.copy());
        for node in &tree {
            position
                .apply(&node.mv)
                .with_context(|| format!("Failed to replay move #{}", node.mv.number))?;
            positions.push(position.copy());
        }

        let ending = kifu
            .main_line()
            .filter(|main| main.moves.len() == tree.len())
            .and_then(|main| main.ending);

        Ok(Replayed { initial_sfen, tree, positions, initial_number, ending })
    }

    /// メインラインの `ply` 手目を指した後の局面（0 は開始局面）
    pub fn sfen_at(&self, ply: usize) -> Result<&str> {
        match ply {
            0 => Ok(&self.initial_sfen),
            n if n <= self.tree.len() => Ok(&self.tree[n - 1].sfen),
            n => bail!("ply {n} is beyond the end of the main line ({} moves)", self.tree.len()),
        }
    }

    /// メインラインの `ply` 手目を指した後の局面と手数
    fn position_at(&self, ply: usize) -> Result<(&Position, u32)> {
        let position = self.positions.get(ply).with_context(|| {
            format!("ply {ply} is beyond the end of the main line ({} moves)", self.tree.len())
        })?;
        let move_number = match ply {
            0 => self.initial_number,
            n => self.tree[n - 1].mv.number.saturating_add(1),
        };
        Ok((position, move_number))
    }

    /// 出力文字列を作る
    pub fn render(&self, format: OutputFormat, pretty: bool, ply: Option<usize>) -> Result<String> {
        match (format, ply) {
            (OutputFormat::Sfen, Some(ply)) => Ok(format!("{}\n", self.sfen_at(ply)?)),
            (OutputFormat::Sfen, None) => Ok(self.render_sfen()),
            (OutputFormat::Json, Some(ply)) => {
                let (position, move_number) = self.position_at(ply)?;
                to_json(&position.to_board_state_json(move_number)?, pretty)
            }
            (OutputFormat::Json, None) => to_json(&self.tree, pretty),
            (OutputFormat::Kif, Some(_)) => bail!("--ply cannot be combined with the kif format"),
            (OutputFormat::Kif, None) => Ok(self.render_kif()),
        }
    }

    fn render_sfen(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.initial_sfen);
        out.push('\n');
        for node in &self.tree {
            out.push_str(&node.sfen);
            out.push('\n');
        }
        out
    }

    fn render_kif(&self) -> String {
        let mut lines = vec!["手数----指手---------消費時間--".to_string()];
        kif_line(&mut lines, &self.tree, None);
        if let Some(ending) = self.ending {
            let number = self.tree.last().map_or(self.initial_number, |n| n.mv.number + 1);
            lines.push(format!("{:>4} {}", number, ending.kif_name()));
        }

        let mut variations = Vec::new();
        collect_variations(&self.tree, None, &mut variations);
        for (line, previous) in variations {
            if let Some(first) = line.first() {
                lines.push(String::new());
                lines.push(format!("変化：{}手", first.mv.number));
                kif_line(&mut lines, line, previous);
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}

/// KIF の指し手表記（"７六歩(77)"、"同　銀(31)"、"２二角成(88)"、"５五角打"）
fn kif_move_text(node: &MoveNode, previous: Option<&MoveNode>) -> String {
    let mv = &node.mv;
    let dest = if previous.is_some_and(|p| p.mv.to == mv.to) {
        "同　".to_string()
    } else {
        mv.to.label()
    };
    let promotion = match node.promotion {
        Some(true) => "成",
        Some(false) => "不成",
        None => "",
    };
    let source = if mv.is_drop() { "打".to_string() } else { format!("({})", mv.from) };
    format!("{}{}{}{}", dest, mv.piece.kif_name(), promotion, source)
}

/// 消費時間の表記（"( 1:05/)"）
fn kif_time(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("({:>2}:{:02}/)", seconds / 60, seconds % 60)
}

/// `previous` は `line` の最初の手の直前に指された手
fn kif_line<'a>(lines: &mut Vec<String>, line: &'a [MoveNode], mut previous: Option<&'a MoveNode>) {
    for node in line {
        let text = kif_move_text(node, previous);
        match node.time_spent_ms {
            Some(ms) => lines.push(format!("{:>4} {}   {}", node.mv.number, text, kif_time(ms))),
            None => lines.push(format!("{:>4} {}", node.mv.number, text)),
        }
        if let Some(comment) = &node.comment {
            lines.extend(comment.lines().map(|c| format!("*{c}")));
        }
        previous = Some(node);
    }
}

/// 変化を深さ優先で集める（変化の最初の手の直前に指された手と組にする）
fn collect_variations<'a>(
    line: &'a [MoveNode],
    line_previous: Option<&'a MoveNode>,
    out: &mut Vec<(&'a [MoveNode], Option<&'a MoveNode>)>,
) {
    for (i, node) in line.iter().enumerate() {
        let previous = if i == 0 { line_previous } else { Some(&line[i - 1]) };
        for variation in &node.variations {
            out.push((variation.as_slice(), previous));
            collect_variations(variation, previous, out);
        }
    }
}
