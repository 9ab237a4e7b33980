use std::fmt;

use serde::Serialize;

/// Mission phase. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MissionState {
    /// Collecting navigation votes
    #[default]
    #[serde(rename = "PHASE_1_SCANNING")]
    Phase1Scanning,
    /// Waiting for a single drop decision
    #[serde(rename = "PHASE_2_SCANNING")]
    Phase2Scanning,
    /// Terminal
    #[serde(rename = "MISSION_COMPLETE")]
    MissionComplete,
}

impl MissionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, MissionState::MissionComplete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MissionState::Phase1Scanning => "PHASE_1_SCANNING",
            MissionState::Phase2Scanning => "PHASE_2_SCANNING",
            MissionState::MissionComplete => "MISSION_COMPLETE",
        }
    }
}

impl fmt::Display for MissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
