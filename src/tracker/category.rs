use serde::Serialize;

/// How a tracked object is shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCategory {
    /// Unprocessed and seen this tick
    #[default]
    New,
    /// Consumed by the mission state machine
    Processed,
    /// Unprocessed and either rejected this tick or out of view
    Ignored,
}
