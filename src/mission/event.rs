//! Observable mission events and the vehicle commands they carry.

use std::fmt;

use serde::Serialize;

use crate::mission::state::MissionState;
use crate::tracker::ObjectId;

/// Command for the vehicle controller. Execution is outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "target", rename_all = "snake_case")]
pub enum VehicleCommand {
    NavigateTo(String),
    Pickup,
    Drop(String),
}

impl fmt::Display for VehicleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCommand::NavigateTo(target) => write!(f, "navigate to '{target}'"),
            VehicleCommand::Pickup => f.write_str("pickup"),
            VehicleCommand::Drop(target) => write!(f, "drop '{target}'"),
        }
    }
}

/// One entry of the mission event stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MissionEvent {
    VoteAccepted {
        id: ObjectId,
        payload: String,
        votes: usize,
        target: usize,
    },
    PayloadIgnored {
        id: ObjectId,
        payload: String,
        state: MissionState,
    },
    PhaseChanged {
        from: MissionState,
        to: MissionState,
        decision: String,
    },
    MissionCompleted {
        phase1_decision: String,
        phase2_decision: String,
    },
    Command(VehicleCommand),
}

impl fmt::Display for MissionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionEvent::VoteAccepted {
                id,
                payload,
                votes,
                target,
            } => write!(f, "vote {votes}/{target} from {id}: '{payload}'"),
            MissionEvent::PayloadIgnored { id, payload, state } => {
                write!(f, "ignored '{payload}' from {id} during {state}")
            }
            MissionEvent::PhaseChanged { from, to, decision } => {
                write!(f, "{from} -> {to}, decision '{decision}'")
            }
            MissionEvent::MissionCompleted {
                phase1_decision,
                phase2_decision,
            } => write!(
                f,
                "mission complete: path '{phase1_decision}', drop '{phase2_decision}'"
            ),
            MissionEvent::Command(command) => write!(f, "command: {command}"),
        }
    }
}
