use crate::Corruption;
use serde::{
    Deserialize,
    Serialize,
};

/// This is the part of a server's election state which must survive a
/// restart: the latest term it knows about, and who (if anyone) it voted
/// for in that term.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PersistentState {
    #[serde(
        rename = "CurrentTerm",
        alias = "currentTerm",
        alias = "currentterm"
    )]
    pub current_term: u64,

    /// An empty string means no vote has been cast in `current_term`.
    #[serde(rename = "VotedFor", alias = "votedFor", alias = "votedfor")]
    pub voted_for: String,
}

impl PersistentState {
    pub fn new<S>(
        current_term: u64,
        voted_for: S,
    ) -> Self
    where
        S: Into<String>,
    {
        Self {
            current_term,
            voted_for: voted_for.into(),
        }
    }

    pub fn voted_for(&self) -> Option<&str> {
        if self.voted_for.is_empty() {
            None
        } else {
            Some(&self.voted_for)
        }
    }

    pub fn serialize(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn deserialize<B>(serialization: B) -> Result<Self, Corruption>
    where
        B: AsRef<[u8]>,
    {
        serde_json::from_slice(serialization.as_ref())
            .map_err(Corruption::MalformedState)
    }
}
