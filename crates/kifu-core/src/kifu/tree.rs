use crate::position::Position;

use super::{Branch, MoveNode, ReplayError};

/// 開始局面（`None` は平手）からメインラインを再生し、注釈付きの指し手の木を作る
///
/// 分岐は、分岐元の手を指す前の局面の複製から再生する。
/// 検証に失敗した手があると、その手以降のそのラインは打ち切られる。
pub fn build_move_tree(
    initial: Option<&str>,
    branches: &[Branch],
) -> Result<Vec<MoveNode>, ReplayError> {
    let position = Position::from_sfen_or_hirate(initial)?;

    let mut main_lines = branches.iter().filter(|b| b.is_main_line());
    let main = main_lines.next().ok_or(ReplayError::MissingMainLine)?;
    let extra = main_lines.count();
    if extra > 0 {
        return Err(ReplayError::AmbiguousMainLine(extra + 1));
    }

    let mut replay = Replay { branches, stack: Vec::new() };
    let nodes = replay.line(main, position)?;

    log::debug!("built move tree: {} moves on the main line", nodes.len());
    Ok(nodes)
}

struct Replay<'a> {
    branches: &'a [Branch],
    /// 再生中の分岐ID（循環検出用）
    stack: Vec<&'a str>,
}

impl<'a> Replay<'a> {
    fn line(
        &mut self,
        branch: &'a Branch,
        mut position: Position,
    ) -> Result<Vec<MoveNode>, ReplayError> {
        let branches = self.branches;
        self.stack.push(&branch.id);

        let mut nodes = Vec::with_capacity(branch.moves.len());
        for recorded in &branch.moves {
            let mv = &recorded.mv;
            let before = position.copy();
            let promotion = position.promotion_state(mv);
            let captured = position.captured_piece(mv);

            if let Err(e) = position.apply(mv) {
                log::warn!("branch {}: move #{} ({mv}) rejected: {e}", branch.id, mv.number);
                break;
            }

            let mut variations = Vec::new();
            for child in branches.iter().filter(|b| b.branches_from(&branch.id, mv.number)) {
                if self.stack.contains(&child.id.as_str()) {
                    log::warn!("branch {} is already being replayed; skipped", child.id);
                    continue;
                }
                variations.push(self.line(child, before.copy())?);
            }

            nodes.push(MoveNode {
                mv: *mv,
                promotion,
                captured,
                comment: recorded.comment.clone(),
                time_spent_ms: recorded.time_spent_ms,
                sfen: position.to_sfen(mv.number.saturating_add(1))?,
                variations,
            });
        }

        self.stack.pop();
        Ok(nodes)
    }
}
