
use crate::{
    Error,
    PersistentState,
    PersistentStorage,
    Result,
};
use log::{
    info,
    warn,
};
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError,
};

struct Inner<S> {
    state: PersistentState,
    storage: S,
}

/// This keeps a server's current term and vote in memory, backed by
/// persistent storage.
///
/// Every change is written to storage before it takes effect in memory, so
/// the in-memory values never get ahead of what would be recovered after a
/// crash.  A single lock covers both the values and the write, which keeps
/// writes to the storage from overlapping.
pub struct ElectionRecord<S> {
    inner: Mutex<Inner<S>>,
}

impl<S> ElectionRecord<S>
where
    S: PersistentStorage,
{
    /// Initialize the storage and recover any state it holds.
    ///
    /// Storage with no prior state yields term 0 with no vote.  Any other
    /// failure, corruption included, is returned, because a server must not
    /// start without knowing whether it has already voted.
    pub fn open(mut storage: S) -> Result<Self> {
        let state = match storage.initialize() {
            Ok(state) => {
                info!(
                    "Recovered term {}, voted for {:?}",
                    state.current_term,
                    state.voted_for()
                );
                state
            },
            Err(Error::NoPriorState) => {
                info!("No prior election state; starting fresh");
                PersistentState::default()
            },
            Err(error) => return Err(error),
        };
        Ok(Self {
            inner: Mutex::new(Inner {
                state,
                storage,
            }),
        })
    }

    pub fn term(&self) -> u64 {
        self.lock().state.current_term
    }

    pub fn voted_for(&self) -> Option<String> {
        self.lock().state.voted_for().map(String::from)
    }

    pub fn snapshot(&self) -> PersistentState {
        self.lock().state.clone()
    }

    /// Persist a new term and vote, and only then adopt them.  If the write
    /// fails, the previous values stay in effect and whatever action
    /// depended on the change must not go ahead.
    pub fn update(
        &self,
        term: u64,
        voted_for: Option<&str>,
    ) -> Result<()> {
        let mut inner = self.lock();
        let state = PersistentState::new(term, voted_for.unwrap_or_default());
        inner.storage.write(&state)?;
        inner.state = state;
        Ok(())
    }

    /// Move to a new term in which no vote has been cast yet.
    pub fn advance_term(
        &self,
        term: u64,
    ) -> Result<()> {
        self.update(term, None)
    }

    /// Record a vote for the given candidate in the current term.
    pub fn vote_for(
        &self,
        candidate_id: &str,
    ) -> Result<()> {
        let mut inner = self.lock();
        let state =
            PersistentState::new(inner.state.current_term, candidate_id);
        inner.storage.write(&state)?;
        inner.state = state;
        Ok(())
    }

    /// Remove the backing storage.  Failure is reported but leaves nothing
    /// else to undo.
    pub fn close(self) -> Result<()> {
        let mut inner =
            self.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        inner.storage.close().map_err(|error| {
            warn!("Unable to remove election state: {}", error);
            error
        })
    }

    // Values are only replaced after a successful write, so they remain
    // consistent even if a holder of the lock panicked.
    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
