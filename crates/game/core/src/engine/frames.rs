//! Pending frames: the end-of-turn rules that raise them and the resolution
//! that pops them.

use crate::diagnostics::Diagnostic;
use crate::env::GameEnv;
use crate::state::{
    BaseTile, FrameKind, GameState, GameStatus, PendingFrame, Point, SkillId, UpgradeOption,
};

use super::FrameError;

/// How the caller answers the top pending frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameResolution {
    /// Confirms stairs, victory or defeat; declines a shrine.
    Acknowledge,
    SelectUpgrade { skill_id: SkillId, upgrade: String },
}

impl FrameResolution {
    fn name(&self) -> &'static str {
        match self {
            Self::Acknowledge => "ACKNOWLEDGE",
            Self::SelectUpgrade { .. } => "SELECT_UPGRADE",
        }
    }
}

/// Player death: marks the run lost and raises `RunLost` once.
pub(super) fn check_defeat(state: &mut GameState) -> Option<FrameKind> {
    if state.player.is_alive() || state.status == GameStatus::Lost {
        return None;
    }
    state.status = GameStatus::Lost;
    state.push_message("You have fallen");
    state.push_frame(PendingFrame::RunLost {
        turn: state.turn_number,
    });
    Some(FrameKind::RunLost)
}

/// Rules checked at the end of any actor's turn during which the player
/// arrived on a new cell, on foot or pushed: stairs descend (or win on the
/// final floor) and shrines offer upgrades. `started_at` is where the player
/// stood when that turn began.
pub(super) fn check_arrival(
    state: &mut GameState,
    env: &GameEnv<'_>,
    started_at: Point,
) -> Option<FrameKind> {
    if !state.player.is_alive() {
        return None;
    }
    let position = state.player.position;
    if started_at == position {
        return None;
    }

    match state.tiles.base(position)? {
        BaseTile::Stairs if state.floor >= env.config.final_floor => {
            state.status = GameStatus::Won;
            state.push_message("You escape the depths");
            state.push_frame(PendingFrame::RunWon { floor: state.floor });
            Some(FrameKind::RunWon)
        }
        BaseTile::Stairs => {
            state.push_frame(PendingFrame::StairsTransition { floor: state.floor });
            Some(FrameKind::StairsTransition)
        }
        BaseTile::Shrine => {
            let options = shrine_options(state, env);
            if options.is_empty() {
                state.push_message("The shrine is silent");
                return None;
            }
            state.push_frame(PendingFrame::ShrineChoice { options });
            Some(FrameKind::ShrineChoice)
        }
        _ => None,
    }
}

/// Draws up to `shrine_options` distinct upgrades the player does not have
/// yet, from the skills in the loadout.
fn shrine_options(state: &mut GameState, env: &GameEnv<'_>) -> Vec<UpgradeOption> {
    let mut candidates: Vec<UpgradeOption> = state
        .player
        .skills
        .iter()
        .flat_map(|slot| {
            env.skills
                .base(&slot.id)
                .map(|base| base.upgrades.as_slice())
                .unwrap_or_default()
                .iter()
                .filter(move |upgrade| !slot.has_upgrade(upgrade))
                .map(move |upgrade| UpgradeOption {
                    skill_id: slot.id.clone(),
                    upgrade: upgrade.clone(),
                })
        })
        .collect();

    let mut options = Vec::new();
    while options.len() < env.config.shrine_options && !candidates.is_empty() {
        let index = state.rng.next_index(candidates.len());
        options.push(candidates.remove(index));
    }
    options
}

/// Pops the top frame if `resolution` answers it.
pub fn resolve_pending(
    mut state: GameState,
    resolution: FrameResolution,
    env: &GameEnv<'_>,
) -> Result<GameState, FrameError> {
    let frame = state.pending.last().ok_or(FrameError::NothingPending)?;

    match (frame, &resolution) {
        (PendingFrame::StairsTransition { floor }, FrameResolution::Acknowledge) => {
            let next = floor + 1;
            state.pending.pop();
            state.floor = next;
            state.push_message(format!("You descend to floor {next}"));
        }
        (
            PendingFrame::RunWon { .. } | PendingFrame::RunLost { .. },
            FrameResolution::Acknowledge,
        ) => {
            state.pending.pop();
        }
        (PendingFrame::ShrineChoice { .. }, FrameResolution::Acknowledge) => {
            state.pending.pop();
            state.push_message("You leave the shrine untouched");
        }
        (
            PendingFrame::ShrineChoice { options },
            FrameResolution::SelectUpgrade { skill_id, upgrade },
        ) => {
            let offered = options
                .iter()
                .any(|option| option.skill_id == *skill_id && option.upgrade == *upgrade);
            if !offered {
                return Err(FrameError::UpgradeNotOffered {
                    skill_id: skill_id.clone(),
                    upgrade: upgrade.clone(),
                });
            }
            state.pending.pop();
            if let Some(slot) = state.player.skill_mut(skill_id) {
                slot.upgrades.push(upgrade.clone());
            }
            let shrine = state.player.position;
            state.tiles.set(shrine, BaseTile::Floor);
            state.push_message(format!("{skill_id} learns {upgrade}"));
        }
        (frame, resolution) => {
            let error = FrameError::Mismatch {
                frame: frame.kind(),
                resolution: resolution.name().to_owned(),
            };
            env.report(Diagnostic::from_error(&error).at_turn(state.turn_number));
            return Err(error);
        }
    }
    Ok(state)
}
