use crate::{
    bytes_encoding,
    Corruption,
};
use serde::{
    Deserialize,
    Serialize,
};

/// This is the wrapper written to the backing file, pairing the serialized
/// persistent state with the digest used to detect corruption.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Envelope {
    #[serde(
        rename = "SHA",
        alias = "sha",
        alias = "Sha",
        with = "bytes_encoding"
    )]
    pub digest: Vec<u8>,

    #[serde(
        rename = "Data",
        alias = "data",
        alias = "DATA",
        with = "bytes_encoding"
    )]
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn decode<B>(encoding: B) -> Result<Self, Corruption>
    where
        B: AsRef<[u8]>,
    {
        serde_json::from_slice(encoding.as_ref())
            .map_err(Corruption::MalformedEnvelope)
    }
}
