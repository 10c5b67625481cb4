//! Durable storage for the part of a Raft server's election state which
//! must survive a restart: the current term and the vote cast in it.

mod bytes_encoding;
mod configuration;
mod election_record;
mod envelope;
mod error;
mod integrity;
mod persistent_state;
mod persistent_storage;
mod state_file;
#[cfg(test)]
mod test_utilities;

pub use configuration::Configuration;
pub use election_record::ElectionRecord;
pub use envelope::Envelope;
pub use error::{
    Corruption,
    Error,
    Operation,
    Result,
};
pub use persistent_state::PersistentState;
pub use persistent_storage::PersistentStorage;
pub use state_file::StateFile;
