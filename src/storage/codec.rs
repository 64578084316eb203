//! Record Codec
//!
//! Records are stored as tab-indented JSON followed by a single `\n`.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{AtlasError, Result};

/// Indentation used for every record file
const INDENT: &[u8] = b"\t";

/// Stateless JSON encoder/decoder for records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordCodec;

impl RecordCodec {
    /// Serialize `value` to pretty-printed bytes terminated by a newline
    ///
    /// Fails with `Serialization` if the value has no JSON form (e.g. a map
    /// with non-string keys). Nothing touches the filesystem here.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(128);
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

        value
            .serialize(&mut serializer)
            .map_err(AtlasError::Serialization)?;

        buf.push(b'\n');
        Ok(buf)
    }

    /// Deserialize bytes read from `path`
    ///
    /// `path` is only used to label the error.
    pub fn decode<T: DeserializeOwned>(bytes: &[u8], path: &Path) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|source| AtlasError::Deserialization {
            path: path.to_path_buf(),
            source,
        })
    }
}
