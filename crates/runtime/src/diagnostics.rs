//! `tracing`-backed diagnostics sink.
use std::cell::RefCell;
use std::collections::VecDeque;

use hexbound_core::{Diagnostic, DiagnosticLevel, DiagnosticsSink};

/// Forwards core diagnostics to `tracing` and keeps the most recent ones for
/// display.
#[derive(Debug)]
pub struct TracingSink {
    capacity: usize,
    recent: RefCell<VecDeque<Diagnostic>>,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl TracingSink {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            recent: RefCell::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Retained records, oldest first.
    pub fn recent(&self) -> Vec<Diagnostic> {
        self.recent.borrow().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.recent.borrow_mut().clear();
    }
}

impl DiagnosticsSink for TracingSink {
    fn record(&self, diagnostic: Diagnostic) {
        let actor = diagnostic.actor.map(|id| id.0);
        let code = diagnostic.code;
        let turn = diagnostic.turn;
        match diagnostic.level {
            DiagnosticLevel::Debug => {
                tracing::debug!(code, ?actor, turn, "{}", diagnostic.message)
            }
            DiagnosticLevel::Info => tracing::info!(code, ?actor, turn, "{}", diagnostic.message),
            DiagnosticLevel::Warn => tracing::warn!(code, ?actor, turn, "{}", diagnostic.message),
            DiagnosticLevel::Error => {
                tracing::error!(code, ?actor, turn, "{}", diagnostic.message)
            }
        }

        if self.capacity == 0 {
            return;
        }
        let mut recent = self.recent.borrow_mut();
        while recent.len() >= self.capacity {
            recent.pop_front();
        }
        recent.push_back(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use hexbound_core::ActorId;

    use super::*;

    #[test]
    fn keeps_only_the_latest_records() {
        let sink = TracingSink::with_capacity(2);
        sink.record(Diagnostic::warn("ghost.desync", "first"));
        sink.record(Diagnostic::error("loop.iteration_cap", "second").with_actor(ActorId(2)));
        sink.record(Diagnostic::debug("loop.intent_rejected", "third").at_turn(7));

        let codes: Vec<_> = sink.recent().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["loop.iteration_cap", "loop.intent_rejected"]);
        assert_eq!(sink.recent()[1].turn, 7);

        sink.clear();
        assert!(sink.recent().is_empty());
    }

    #[test]
    fn zero_capacity_only_traces() {
        let sink = TracingSink::with_capacity(0);
        sink.record(Diagnostic::warn("ghost.exhausted", "no more intents"));
        assert!(sink.recent().is_empty());
    }
}
