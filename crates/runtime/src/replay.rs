//! Replay validation and re-simulation.
//!
//! A replay is a JSON array of actions tagged by `type`. Validation never
//! fails outright: it reports one error per bad entry and keeps the entries
//! that parsed. Re-simulation feeds accepted actions through a fresh
//! [`Session`] with the same seed, so a recorded command log reproduces the
//! run it came from.

use std::path::Path;

use hexbound_content::ContentPack;
use hexbound_core::state::Point;
use hexbound_core::{Action, GameState, LoopStop};
use serde::Serialize;
use serde_json::Value;

use crate::config::RuntimeConfig;
use crate::error::{ReplayError, Result, RuntimeError};
use crate::session::Session;

/// Outcome of [`validate_replay`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Entries that parsed, in file order.
    pub actions: Vec<Action>,
}

impl ReplayReport {
    fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![error.into()],
            actions: Vec::new(),
        }
    }

    /// The accepted actions, or an error when any entry was rejected.
    pub fn into_actions(self) -> std::result::Result<Vec<Action>, ReplayError> {
        if self.valid {
            Ok(self.actions)
        } else {
            Err(ReplayError::Rejected {
                errors: self.errors,
            })
        }
    }
}

/// Checks that `input` is an array of well-formed actions with a whitelisted
/// `type`.
pub fn validate_replay(input: &Value) -> ReplayReport {
    let Some(entries) = input.as_array() else {
        return ReplayReport::rejected("replay must be a JSON array");
    };

    let mut errors = Vec::new();
    let mut actions = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Ok(action) => actions.push(action),
            Err(error) => errors.push(format!("entry {index}: {error}")),
        }
    }

    ReplayReport {
        valid: errors.is_empty(),
        errors,
        actions,
    }
}

fn parse_entry(entry: &Value) -> std::result::Result<Action, String> {
    let Some(object) = entry.as_object() else {
        return Err("expected an object".to_owned());
    };
    let Some(kind) = object.get("type").and_then(Value::as_str) else {
        return Err("missing action type".to_owned());
    };
    if !Action::TYPES.contains(&kind) {
        return Err(format!("unknown action type {kind:?}"));
    }

    let action: Action =
        serde_json::from_value(entry.clone()).map_err(|e| format!("malformed {kind}: {e}"))?;
    let target = match &action {
        Action::Move { target } => Some(*target),
        Action::UseSkill { target, .. } => *target,
        _ => None,
    };
    if target.is_some_and(|point: Point| !point.is_valid()) {
        return Err(format!("{kind} target breaks q + r + s = 0"));
    }
    Ok(action)
}

/// Parses and validates replay text.
pub fn parse_replay(text: &str) -> std::result::Result<ReplayReport, ReplayError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(validate_replay(&value))
}

/// Reads and validates a replay file.
pub fn read_replay_file(path: &Path) -> std::result::Result<ReplayReport, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_replay(&text)
}

/// Final state of a re-simulated run.
#[derive(Clone, Debug)]
pub struct SimulationReport {
    pub state: GameState,
    pub stop: LoopStop,
    pub digest: String,
    /// Actions the engine refused (blocked by a frame, game over, bad frame
    /// resolution). They are skipped, as in a live session.
    pub skipped: usize,
}

/// Replays `actions` from `seed` with the standard content.
pub fn simulate(seed: &str, actions: &[Action], config: &RuntimeConfig) -> Result<SimulationReport> {
    let pack = ContentPack::standard().map_err(RuntimeError::content)?;
    simulate_with(seed, actions, config, pack)
}

pub fn simulate_with(
    seed: &str,
    actions: &[Action],
    config: &RuntimeConfig,
    pack: ContentPack,
) -> Result<SimulationReport> {
    let config = config.clone().with_seed(seed);
    let mut session = Session::with_pack(config, pack)?;
    let mut skipped = 0;

    for (index, action) in actions.iter().enumerate() {
        if let Err(error) = session.dispatch(action.clone()) {
            tracing::warn!(index, action = action.type_name(), %error, "replay action skipped");
            skipped += 1;
        }
    }

    Ok(SimulationReport {
        digest: session.digest()?,
        stop: session.last_stop(),
        state: session.state().clone(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_array_is_rejected_whole() {
        let report = validate_replay(&json!({"type": "WAIT"}));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.actions.is_empty());
    }

    #[test]
    fn one_error_per_bad_entry() {
        let report = validate_replay(&json!([
            {"type": "WAIT"},
            {"type": "TELEPORT"},
            42,
            {"target": {"q": 1, "r": 1, "s": -2}},
            {"type": "MOVE", "target": {"q": 1, "r": 1, "s": -2}},
            {"type": "MOVE"},
            {"type": "MOVE", "target": {"q": 1, "r": 1, "s": 5}},
        ]));

        assert!(!report.valid);
        assert_eq!(report.errors.len(), 5);
        assert!(report.errors[0].starts_with("entry 1:"));
        assert!(report.errors[2].contains("missing action type"));
        assert!(report.errors[3].starts_with("entry 5:"));
        assert!(report.errors[4].starts_with("entry 6:"));
        assert_eq!(
            report.actions,
            vec![
                Action::Wait,
                Action::Move {
                    target: Point::new(1, 1)
                },
            ]
        );
    }

    #[test]
    fn malformed_fields_are_reported() {
        let report = validate_replay(&json!([{"type": "MOVE"}]));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("malformed MOVE"));
    }

    #[test]
    fn every_action_kind_parses() {
        let report = validate_replay(&json!([
            {"type": "MOVE", "target": {"q": 0, "r": 1, "s": -1}},
            {"type": "USE_SKILL", "skill_id": "DASH", "target": {"q": 2, "r": 0, "s": -2}},
            {"type": "USE_SKILL", "skill_id": "SMOKE_SCREEN"},
            {"type": "WAIT"},
            {"type": "ADVANCE_TURN"},
            {"type": "RESOLVE_PENDING"},
            {"type": "SELECT_UPGRADE", "skill_id": "DASH", "upgrade": "MOMENTUM"},
        ]));
        assert!(report.valid, "{:?}", report.errors);
        assert_eq!(report.actions.len(), 7);
    }

    #[test]
    fn into_actions_refuses_invalid_reports() {
        let report = validate_replay(&json!([{"type": "NOPE"}]));
        assert!(matches!(
            report.into_actions(),
            Err(ReplayError::Rejected { errors }) if errors.len() == 1
        ));
    }

    #[test]
    fn unreadable_text_is_a_json_error() {
        assert!(matches!(parse_replay("[{"), Err(ReplayError::Json(_))));
    }
}
