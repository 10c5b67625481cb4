use crate::{
    PersistentState,
    Result,
};

/// This is what an [`ElectionRecord`] needs from wherever it keeps the
/// server's term and vote.
///
/// [`ElectionRecord`]: struct.ElectionRecord.html
pub trait PersistentStorage: Send {
    /// Prepare the storage for use and return the state it already holds,
    /// or [`Error::NoPriorState`] if it holds none.
    ///
    /// [`Error::NoPriorState`]: enum.Error.html#variant.NoPriorState
    fn initialize(&mut self) -> Result<PersistentState>;

    fn write(
        &mut self,
        state: &PersistentState,
    ) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}
