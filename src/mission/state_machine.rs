//! Mission state machine driven by the tracker's unprocessed objects.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::mission::event::{MissionEvent, VehicleCommand};
use crate::mission::state::MissionState;
use crate::mission::vocabulary::Vocabulary;
use crate::mission::votes::VoteLedger;
use crate::tracker::{ObjectId, ObjectTracker};

/// Configuration for the MissionStateMachine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MissionConfig {
    /// Payloads counted as votes in phase 1
    pub phase1_vocabulary: Vocabulary,
    /// Payloads accepted as the drop decision in phase 2
    pub phase2_vocabulary: Vocabulary,
    /// Number of votes that ends phase 1
    pub vote_target: usize,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            phase1_vocabulary: Vocabulary::phase1_default(),
            phase2_vocabulary: Vocabulary::phase2_default(),
            vote_target: 5,
        }
    }
}

/// Vote progress as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteProgress {
    Collecting { votes: usize, target: usize },
    Decided(String),
}

impl std::fmt::Display for VoteProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteProgress::Collecting { votes, target } => write!(f, "Votes: {votes}/{target}"),
            VoteProgress::Decided(decision) => write!(f, "Decision: {decision}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MissionStateMachine {
    state: MissionState,
    ledger: VoteLedger,
    phase1_decision: Option<String>,
    phase2_decision: Option<String>,
    config: MissionConfig,
}

impl MissionStateMachine {
    pub fn new(config: MissionConfig) -> Self {
        Self {
            state: MissionState::Phase1Scanning,
            ledger: VoteLedger::new(config.vote_target),
            phase1_decision: None,
            phase2_decision: None,
            config,
        }
    }

    pub fn state(&self) -> MissionState {
        self.state
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn phase1_decision(&self) -> Option<&str> {
        self.phase1_decision.as_deref()
    }

    pub fn phase2_decision(&self) -> Option<&str> {
        self.phase2_decision.as_deref()
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn progress(&self) -> VoteProgress {
        match &self.phase1_decision {
            Some(decision) => VoteProgress::Decided(decision.clone()),
            None => VoteProgress::Collecting {
                votes: self.ledger.len(),
                target: self.ledger.target(),
            },
        }
    }

    /// Vocabulary of the current phase, if any.
    pub fn active_vocabulary(&self) -> Option<&Vocabulary> {
        match self.state {
            MissionState::Phase1Scanning => Some(&self.config.phase1_vocabulary),
            MissionState::Phase2Scanning => Some(&self.config.phase2_vocabulary),
            MissionState::MissionComplete => None,
        }
    }

    /// Consume this tick's unprocessed objects. May reset `tracker` on a phase change.
    pub fn step(&mut self, tracker: &mut ObjectTracker) -> Vec<MissionEvent> {
        let mut events = Vec::new();
        if self.state.is_terminal() {
            return events;
        }
        if self.state == MissionState::Phase1Scanning {
            self.step_phase1(tracker, &mut events);
        } else {
            self.step_phase2(tracker, &mut events);
        }
        events
    }

    fn accepts(&self, payload: &str) -> bool {
        self.active_vocabulary()
            .is_some_and(|vocabulary| vocabulary.contains(payload))
    }

    fn step_phase1(&mut self, tracker: &mut ObjectTracker, events: &mut Vec<MissionEvent>) {
        let pending: Vec<(ObjectId, String)> = tracker
            .unprocessed()
            .map(|o| (o.id, o.payload.clone()))
            .collect();

        for (id, payload) in pending {
            if !self.accepts(&payload) {
                self.ignore(id, payload, events);
                continue;
            }

            tracker.mark_processed(id);
            self.ledger.push(payload.clone());
            info!(
                id = %id,
                payload = %payload,
                votes = self.ledger.len(),
                target = self.ledger.target(),
                "vote accepted"
            );
            events.push(MissionEvent::VoteAccepted {
                id,
                payload,
                votes: self.ledger.len(),
                target: self.ledger.target(),
            });

            if self.ledger.is_full() {
                self.finish_phase1(tracker, events);
                return;
            }
        }
    }

    fn finish_phase1(&mut self, tracker: &mut ObjectTracker, events: &mut Vec<MissionEvent>) {
        let Some(decision) = self.ledger.majority().map(str::to_owned) else {
            return;
        };

        self.phase1_decision = Some(decision.clone());
        tracker.reset();
        self.transition(MissionState::Phase2Scanning, &decision, events);
        self.command(VehicleCommand::NavigateTo(decision), events);
    }

    fn step_phase2(&mut self, tracker: &mut ObjectTracker, events: &mut Vec<MissionEvent>) {
        let Some((id, payload)) = tracker
            .unprocessed()
            .next()
            .map(|o| (o.id, o.payload.clone()))
        else {
            return;
        };

        if !self.accepts(&payload) {
            // stays unprocessed and is looked at again next tick
            self.ignore(id, payload, events);
            return;
        }

        tracker.mark_processed(id);
        self.phase2_decision = Some(payload.clone());
        self.transition(MissionState::MissionComplete, &payload, events);

        let phase1_decision = self.phase1_decision.clone().unwrap_or_default();
        info!(
            phase1_decision = %phase1_decision,
            phase2_decision = %payload,
            "mission complete"
        );
        events.push(MissionEvent::MissionCompleted {
            phase1_decision,
            phase2_decision: payload.clone(),
        });

        self.command(VehicleCommand::Pickup, events);
        self.command(VehicleCommand::NavigateTo(payload.clone()), events);
        self.command(VehicleCommand::Drop(payload), events);
    }

    fn ignore(&self, id: ObjectId, payload: String, events: &mut Vec<MissionEvent>) {
        info!(id = %id, payload = %payload, state = %self.state, "payload ignored");
        events.push(MissionEvent::PayloadIgnored {
            id,
            payload,
            state: self.state,
        });
    }

    fn transition(&mut self, to: MissionState, decision: &str, events: &mut Vec<MissionEvent>) {
        let from = self.state;
        self.state = to;
        info!(from = %from, to = %to, decision = %decision, "phase transition");
        events.push(MissionEvent::PhaseChanged {
            from,
            to,
            decision: decision.to_owned(),
        });
    }

    fn command(&self, command: VehicleCommand, events: &mut Vec<MissionEvent>) {
        info!(command = %command, "vehicle command");
        events.push(MissionEvent::Command(command));
    }
}

impl Default for MissionStateMachine {
    fn default() -> Self {
        Self::new(MissionConfig::default())
    }
}
