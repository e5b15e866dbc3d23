//! Pipeline phase state machine.

use serde::{Deserialize, Serialize};

/// The phase of an order travelling through the pipeline.
///
/// Phase transitions:
/// ```text
/// Submitted ──► Validating ──► Reserving ──► Paying ──► Finalizing ──► Notified
///                   │              │            │            ▲
///                   └──────────────┴────────────┴─ failure ──┘
/// ```
///
/// A failure in any business phase jumps straight to `Finalizing`
/// carrying a failure result; `Finalizing` always runs notification
/// exactly once before reaching the terminal `Notified` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderPhase {
    /// Order accepted, validation not yet scheduled.
    #[default]
    Submitted,

    /// Validation stage is running.
    Validating,

    /// Stock reservation stage is running.
    Reserving,

    /// Payment capture stage is running.
    Paying,

    /// Terminal result computed, notification pending.
    Finalizing,

    /// Notification dispatched (terminal phase).
    Notified,
}

impl OrderPhase {
    /// Returns the happy-path successor phase, if any.
    pub fn next(&self) -> Option<OrderPhase> {
        match self {
            OrderPhase::Submitted => Some(OrderPhase::Validating),
            OrderPhase::Validating => Some(OrderPhase::Reserving),
            OrderPhase::Reserving => Some(OrderPhase::Paying),
            OrderPhase::Paying => Some(OrderPhase::Finalizing),
            OrderPhase::Finalizing => Some(OrderPhase::Notified),
            OrderPhase::Notified => None,
        }
    }

    /// Returns true if a business-stage failure can occur in this
    /// phase (and shortcut to `Finalizing`).
    pub fn can_fail(&self) -> bool {
        matches!(
            self,
            OrderPhase::Validating | OrderPhase::Reserving | OrderPhase::Paying
        )
    }

    /// Returns true if this is the terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderPhase::Notified)
    }

    /// Returns true if the pipeline may move from this phase to `to`:
    /// either the happy-path successor, or the failure shortcut from a
    /// fallible phase to `Finalizing`.
    pub fn can_transition_to(&self, to: OrderPhase) -> bool {
        self.next() == Some(to) || (self.can_fail() && to == OrderPhase::Finalizing)
    }

    /// Returns the phase name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPhase::Submitted => "Submitted",
            OrderPhase::Validating => "Validating",
            OrderPhase::Reserving => "Reserving",
            OrderPhase::Paying => "Paying",
            OrderPhase::Finalizing => "Finalizing",
            OrderPhase::Notified => "Notified",
        }
    }
}

impl std::fmt::Display for OrderPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The pipeline stage a log line or error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Validation,
    Reservation,
    Payment,
    Notification,
}

impl Stage {
    /// Returns the pipeline phase during which this stage runs.
    pub fn phase(&self) -> OrderPhase {
        match self {
            Stage::Validation => OrderPhase::Validating,
            Stage::Reservation => OrderPhase::Reserving,
            Stage::Payment => OrderPhase::Paying,
            Stage::Notification => OrderPhase::Finalizing,
        }
    }

    /// Returns the stage name as used in messages and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validation => "validation",
            Stage::Reservation => "stock reservation",
            Stage::Payment => "payment",
            Stage::Notification => "notification",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
