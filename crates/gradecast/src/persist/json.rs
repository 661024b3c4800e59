//! JSON reading and writing of artifact documents.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::{ReadError, WriteError};
use super::schema::{
    ArtifactHeader, ArtifactKind, ModelArtifactSchema, ScalerArtifactSchema, FORMAT_VERSION,
};
use crate::repr::{ModelArtifact, ScalerArtifact};

/// Options for JSON output.
#[derive(Debug, Clone, Copy)]
pub struct JsonWriteOptions {
    /// Indent the output.
    pub pretty: bool,
}

impl Default for JsonWriteOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonWriteOptions {
    /// Single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

/// Parse a document, checking version and kind before the payload.
fn read_document<T: DeserializeOwned, R: Read>(
    reader: R,
    expected: ArtifactKind,
) -> Result<T, ReadError> {
    let value: Value = serde_json::from_reader(reader)?;
    let header = ArtifactHeader::deserialize(&value)?;
    if header.format_version != FORMAT_VERSION {
        return Err(ReadError::UnsupportedVersion {
            found: header.format_version,
            supported: FORMAT_VERSION,
        });
    }
    if header.kind != expected {
        return Err(ReadError::KindMismatch {
            expected,
            found: header.kind,
        });
    }
    Ok(T::deserialize(value)?)
}

fn write_document<T: Serialize, W: Write>(
    doc: &T,
    mut writer: W,
    options: JsonWriteOptions,
) -> Result<(), WriteError> {
    if options.pretty {
        serde_json::to_writer_pretty(&mut writer, doc)?;
    } else {
        serde_json::to_writer(&mut writer, doc)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a scaler artifact from any reader.
pub fn read_scaler_json<R: Read>(reader: R) -> Result<ScalerArtifact, ReadError> {
    let doc: ScalerArtifactSchema = read_document(reader, ArtifactKind::Scaler)?;
    ScalerArtifact::try_from(doc)
}

/// Read a model artifact from any reader.
pub fn read_model_json<R: Read>(reader: R) -> Result<ModelArtifact, ReadError> {
    let doc: ModelArtifactSchema = read_document(reader, ArtifactKind::Model)?;
    ModelArtifact::try_from(doc)
}

/// Load a scaler artifact from a file.
pub fn load_scaler(path: impl AsRef<Path>) -> Result<ScalerArtifact, ReadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading scaler artifact");
    read_scaler_json(BufReader::new(File::open(path)?))
}

/// Load a model artifact from a file.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact, ReadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading model artifact");
    read_model_json(BufReader::new(File::open(path)?))
}

/// Write a scaler artifact as JSON.
pub fn write_scaler_json<W: Write>(
    artifact: &ScalerArtifact,
    writer: W,
    options: JsonWriteOptions,
) -> Result<(), WriteError> {
    write_document(&ScalerArtifactSchema::from(artifact), writer, options)
}

/// Write a model artifact as JSON.
pub fn write_model_json<W: Write>(
    artifact: &ModelArtifact,
    writer: W,
    options: JsonWriteOptions,
) -> Result<(), WriteError> {
    write_document(&ModelArtifactSchema::from(artifact), writer, options)
}

/// Write a scaler artifact to a file, replacing it.
pub fn save_scaler(artifact: &ScalerArtifact, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let file = File::create(path)?;
    write_scaler_json(artifact, BufWriter::new(file), JsonWriteOptions::default())
}

/// Write a model artifact to a file, replacing it.
pub fn save_model(artifact: &ModelArtifact, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let file = File::create(path)?;
    write_model_json(artifact, BufWriter::new(file), JsonWriteOptions::default())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::repr::{LinearModel, Scaler};
    use ndarray::array;

    #[test]
    fn write_then_read_model() {
        let artifact = ModelArtifact::new(LinearModel::new(array![0.25, -0.5], 3.0));
        let mut buf = Vec::new();
        write_model_json(&artifact, &mut buf, JsonWriteOptions::compact()).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with(r#"{"format_version":1,"kind":"model""#), "{text}");

        assert_eq!(read_model_json(Cursor::new(buf)).unwrap(), artifact);
    }

    #[test]
    fn unsupported_version() {
        let json = r#"{"format_version":7,"kind":"scaler","meta":{"n_features":1},"scaler":{"type":"identity"}}"#;
        let err = read_scaler_json(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ReadError::UnsupportedVersion {
                found: 7,
                supported: 1
            }
        ));
    }

    #[test]
    fn kind_mismatch_reported_before_payload() {
        let json = r#"{"format_version":1,"kind":"scaler","meta":{"n_features":1},"scaler":{"type":"identity"}}"#;
        let err = read_model_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ReadError::KindMismatch { .. }), "got: {err:?}");
    }

    #[test]
    fn malformed_json() {
        let err = read_scaler_json("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, ReadError::Json(_)));
    }

    #[test]
    fn missing_file_is_io() {
        let err = load_scaler("/definitely/not/here/scaler.json").unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }

    #[test]
    fn pretty_output_is_readable_back() {
        let artifact = ScalerArtifact::new(Scaler::Identity { n_features: 2 });
        let mut buf = Vec::new();
        write_scaler_json(&artifact, &mut buf, JsonWriteOptions::default()).unwrap();
        assert!(buf.contains(&b'\n'));
        assert_eq!(read_scaler_json(buf.as_slice()).unwrap(), artifact);
    }
}
