/// This holds the settings which control how a [`StateFile`] touches the
/// file system.
///
/// [`StateFile`]: struct.StateFile.html
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Configuration {
    /// These are the permission bits given to the backing file when it is
    /// created, and to the temporary file used to replace it on each write.
    /// They are only honored on Unix platforms.
    pub file_mode: u32,

    /// This determines whether written state is flushed to stable storage
    /// before it replaces the previous contents of the backing file.
    pub sync_writes: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            file_mode: 0o660,
            sync_writes: true,
        }
    }
}
