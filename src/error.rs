use std::{
    fmt,
    io,
    path::PathBuf,
};

/// This identifies the file system step which failed when an [`Error::Io`]
/// is reported.
///
/// [`Error::Io`]: enum.Error.html#variant.Io
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Create,
    Open,
    Read,
    Write,
    Sync,
    Rename,
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Open => "open",
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Sync => "sync",
            Operation::Rename => "rename",
            Operation::Remove => "remove",
        };
        write!(f, "{}", name)
    }
}

/// The ways stored bytes can fail to be trusted.  Callers generally only
/// care that the state is corrupt; the variant says why.
#[derive(Debug, thiserror::Error)]
pub enum Corruption {
    #[error("stored bytes are not a valid envelope")]
    MalformedEnvelope(#[source] serde_json::Error),

    #[error("envelope payload is not a valid persistent state")]
    MalformedState(#[source] serde_json::Error),

    #[error("envelope digest matches neither the current nor the legacy scheme")]
    DigestMismatch,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no prior state has been recorded")]
    NoPriorState,

    #[error("unable to encode persistent state")]
    Encode(#[source] serde_json::Error),

    #[error("persistent state is corrupt")]
    Corrupt(#[from] Corruption),

    #[error("unable to {operation} \"{}\"", .path.display())]
    Io {
        operation: Operation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io<P>(
        operation: Operation,
        path: P,
    ) -> impl FnOnce(io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        let path = path.into();
        move |source| Error::Io {
            operation,
            path,
            source,
        }
    }

    pub fn is_no_prior_state(&self) -> bool {
        matches!(self, Error::NoPriorState)
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::Corrupt(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
