//! Structured diagnostics channel.
//!
//! The core never logs. Invariant violations, desyncs and rejected inputs are
//! reported as [`Diagnostic`] records through an injected [`DiagnosticsSink`];
//! the runtime forwards them to `tracing`.

use std::cell::RefCell;

use crate::error::{ErrorSeverity, GameError};
use crate::state::ActorId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<ErrorSeverity> for DiagnosticLevel {
    fn from(severity: ErrorSeverity) -> Self {
        match severity {
            ErrorSeverity::Recoverable => Self::Debug,
            ErrorSeverity::Validation => Self::Warn,
            ErrorSeverity::Internal | ErrorSeverity::Fatal => Self::Error,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Stable machine-readable code such as `ghost.exhausted`.
    pub code: &'static str,
    pub message: String,
    pub actor: Option<ActorId>,
    pub turn: u32,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
            actor: None,
            turn: 0,
        }
    }

    pub fn warn(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, code, message)
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, code, message)
    }

    pub fn debug(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Debug, code, message)
    }

    /// Level and code are taken from the error's severity and error code.
    pub fn from_error<E: GameError>(error: &E) -> Self {
        Self::new(error.severity().into(), error.error_code(), error.to_string())
    }

    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn at_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }
}

/// Destination for diagnostics emitted by the simulation.
pub trait DiagnosticsSink {
    fn record(&self, diagnostic: Diagnostic);
}

/// Discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&self, _diagnostic: Diagnostic) {}
}

/// Keeps every record in memory; used by tests and replay tooling.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.records.borrow().iter().map(|d| d.code).collect()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.borrow().iter().any(|d| d.code == code)
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        self.records.take()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.records.borrow_mut().push(diagnostic);
    }
}
