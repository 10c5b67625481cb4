
use crate::{
    integrity::{
        self,
        Scheme,
    },
    Configuration,
    Envelope,
    Error,
    Operation,
    PersistentState,
    PersistentStorage,
    Result,
};
use log::{
    debug,
    warn,
};
use std::{
    ffi::OsString,
    fs::{
        self,
        OpenOptions,
    },
    io::Write as _,
    path::{
        Path,
        PathBuf,
    },
};

/// This is the file holding one server's [`PersistentState`], wrapped in an
/// [`Envelope`] so that corruption can be detected when it's read back.
///
/// The file is owned by a single `StateFile` at a time.  Nothing here
/// serializes concurrent calls; whoever holds the `StateFile` must make
/// sure only one operation is in flight.
///
/// [`PersistentState`]: struct.PersistentState.html
/// [`Envelope`]: struct.Envelope.html
#[derive(Debug)]
pub struct StateFile {
    configuration: Configuration,
    path: PathBuf,
}

impl StateFile {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::with_configuration(path, Configuration::default())
    }

    pub fn with_configuration<P>(
        path: P,
        configuration: Configuration,
    ) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            configuration,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Make sure the backing file exists and is both readable and writable,
    /// creating it empty if necessary, and then load whatever state it
    /// holds.
    ///
    /// Writes replace the file through a temporary sibling, so this also
    /// makes sure that sibling can be created and removed.
    ///
    /// An empty file yields [`Error::NoPriorState`], which callers should
    /// treat as a fresh start rather than a failure.
    ///
    /// [`Error::NoPriorState`]: enum.Error.html#variant.NoPriorState
    pub fn initialize(&self) -> Result<PersistentState> {
        debug!("Opening state file {}", self.path.display());
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        self.apply_file_mode(&mut options);
        options
            .open(&self.path)
            .map_err(Error::io(Operation::Open, &self.path))?;
        self.check_replaceable()?;
        self.read()
    }

    pub fn read(&self) -> Result<PersistentState> {
        let encoding = fs::read(&self.path)
            .map_err(Error::io(Operation::Read, &self.path))?;
        if encoding.is_empty() {
            return Err(Error::NoPriorState);
        }
        let envelope = Envelope::decode(encoding)?;
        if integrity::verify(&envelope)? == Scheme::Legacy {
            warn!(
                "State file {} carries a legacy digest; accepting it",
                self.path.display()
            );
        }
        let state = PersistentState::deserialize(&envelope.payload)?;
        debug!(
            "Read state from {}: term {}, voted for {:?}",
            self.path.display(),
            state.current_term,
            state.voted_for()
        );
        Ok(state)
    }

    /// Replace the entire contents of the backing file with the given state.
    ///
    /// The new envelope goes into a sibling temporary file which is then
    /// renamed over the backing file, so a crash leaves either the old
    /// envelope or the new one in place.
    pub fn write(
        &self,
        state: &PersistentState,
    ) -> Result<()> {
        let payload = state.serialize().map_err(Error::Encode)?;
        let encoding =
            integrity::seal(payload).encode().map_err(Error::Encode)?;
        let temporary_path = self.temporary_path();
        let result = self.replace_with(&temporary_path, &encoding);
        if result.is_err() {
            let _ = fs::remove_file(&temporary_path);
        }
        result?;
        debug!(
            "Wrote state to {}: term {}, voted for {:?}",
            self.path.display(),
            state.current_term,
            state.voted_for()
        );
        Ok(())
    }

    /// Delete the backing file.  This fails if the file is already gone.
    pub fn close(&self) -> Result<()> {
        debug!("Removing state file {}", self.path.display());
        fs::remove_file(&self.path)
            .map_err(Error::io(Operation::Remove, &self.path))
    }

    fn check_replaceable(&self) -> Result<()> {
        let temporary_path = self.temporary_path();
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        self.apply_file_mode(&mut options);
        options
            .open(&temporary_path)
            .map_err(Error::io(Operation::Create, &temporary_path))?;
        fs::remove_file(&temporary_path)
            .map_err(Error::io(Operation::Remove, &temporary_path))
    }

    fn replace_with(
        &self,
        temporary_path: &Path,
        encoding: &[u8],
    ) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        self.apply_file_mode(&mut options);
        let mut file = options
            .open(temporary_path)
            .map_err(Error::io(Operation::Create, temporary_path))?;
        file.write_all(encoding)
            .map_err(Error::io(Operation::Write, temporary_path))?;
        if self.configuration.sync_writes {
            file.sync_data()
                .map_err(Error::io(Operation::Sync, temporary_path))?;
        }
        drop(file);
        fs::rename(temporary_path, &self.path)
            .map_err(Error::io(Operation::Rename, &self.path))?;
        if self.configuration.sync_writes {
            self.sync_directory()?;
        }
        Ok(())
    }

    #[cfg(unix)]
    fn apply_file_mode(
        &self,
        options: &mut OpenOptions,
    ) {
        use std::os::unix::fs::OpenOptionsExt as _;
        options.mode(self.configuration.file_mode);
    }

    #[cfg(not(unix))]
    fn apply_file_mode(
        &self,
        _options: &mut OpenOptions,
    ) {
    }

    // The rename is only durable once the directory entry is.
    #[cfg(unix)]
    fn sync_directory(&self) -> Result<()> {
        use std::fs::File;
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        File::open(directory)
            .and_then(|directory| directory.sync_all())
            .map_err(Error::io(Operation::Sync, directory))
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> Result<()> {
        Ok(())
    }

    fn temporary_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| OsString::from("state"));
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl PersistentStorage for StateFile {
    fn initialize(&mut self) -> Result<PersistentState> {
        StateFile::initialize(self)
    }

    fn write(
        &mut self,
        state: &PersistentState,
    ) -> Result<()> {
        StateFile::write(self, state)
    }

    fn close(&mut self) -> Result<()> {
        StateFile::close(self)
    }
}
