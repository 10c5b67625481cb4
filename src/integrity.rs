//! Digest computation and verification for envelopes.
//!
//! Early releases stored `payload ++ SHA1("")` in place of `SHA1(payload)`.
//! Those files are still in the field and are never rewritten by reading
//! them, so verification has to accept both forms indefinitely.

use crate::{
    Corruption,
    Envelope,
};
use sha1::{
    Digest as _,
    Sha1,
};

/// Identifies which digest scheme an envelope was found to satisfy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scheme {
    Current,
    Legacy,
}

pub fn digest(payload: &[u8]) -> Vec<u8> {
    Sha1::digest(payload).to_vec()
}

/// Reproduces the digest written by the early releases.  This is a
/// compatibility shim, not a checksum; it must stay exactly as it is.
pub fn legacy_digest(payload: &[u8]) -> Vec<u8> {
    let hash_of_nothing = Sha1::digest(b"");
    let mut legacy_digest =
        Vec::with_capacity(payload.len() + hash_of_nothing.len());
    legacy_digest.extend_from_slice(payload);
    legacy_digest.extend_from_slice(&hash_of_nothing);
    legacy_digest
}

pub fn seal(payload: Vec<u8>) -> Envelope {
    Envelope {
        digest: digest(&payload),
        payload,
    }
}

pub fn verify(envelope: &Envelope) -> Result<Scheme, Corruption> {
    if digest(&envelope.payload) == envelope.digest {
        Ok(Scheme::Current)
    } else if legacy_digest(&envelope.payload) == envelope.digest {
        Ok(Scheme::Legacy)
    } else {
        Err(Corruption::DigestMismatch)
    }
}
