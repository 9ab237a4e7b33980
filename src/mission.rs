mod event;
mod state;
mod state_machine;
mod vocabulary;
mod votes;

pub use event::{MissionEvent, VehicleCommand};
pub use state::MissionState;
pub use state_machine::{MissionConfig, MissionStateMachine, VoteProgress};
pub use vocabulary::Vocabulary;
pub use votes::{VoteLedger, majority};
