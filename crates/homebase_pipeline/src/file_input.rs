//! Staging an uploaded file as prompt text.

use homebase_error::{PipelineError, PipelineErrorKind};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, instrument, warn};

const STAGED_PREFIX: &str = "homebase-upload-";

/// Copy `reader` to a scoped temporary file and read back up to `byte_cap`
/// bytes as UTF-8 text.
///
/// The temporary file is deleted when this function returns, on success
/// and on every error path. A multi-byte character split by the cap is
/// dropped rather than reported as invalid.
///
/// # Errors
///
/// Returns [`PipelineErrorKind::FileInput`] on I/O failure or when the
/// content is not UTF-8.
///
/// # Examples
///
/// ```
/// use homebase_pipeline::stage_file_input;
///
/// let mut upload: &[u8] = "résumé".as_bytes();
/// // the cap splits the final 'é'
/// assert_eq!(stage_file_input(&mut upload, 7).unwrap(), "résum");
/// ```
pub fn stage_file_input<R: Read + ?Sized>(
    reader: &mut R,
    byte_cap: usize,
) -> Result<String, PipelineError> {
    stage_file_input_in(std::env::temp_dir(), reader, byte_cap)
}

/// [`stage_file_input`] with the temporary file created under `dir`.
///
/// # Errors
///
/// See [`stage_file_input`].
#[instrument(skip(dir, reader), fields(dir = %dir.as_ref().display()))]
pub fn stage_file_input_in<P: AsRef<Path>, R: Read + ?Sized>(
    dir: P,
    reader: &mut R,
    byte_cap: usize,
) -> Result<String, PipelineError> {
    let mut staged = tempfile::Builder::new()
        .prefix(STAGED_PREFIX)
        .suffix(".txt")
        .tempfile_in(dir)
        .map_err(file_error)?;

    let copied = std::io::copy(reader, &mut staged).map_err(file_error)?;
    staged.flush().map_err(file_error)?;
    debug!(path = %staged.path().display(), bytes = copied, "Staged upload");

    let mut buffer = Vec::with_capacity(byte_cap.min(copied as usize));
    staged
        .reopen()
        .map_err(file_error)?
        .take(byte_cap as u64)
        .read_to_end(&mut buffer)
        .map_err(file_error)?;

    let truncated = (buffer.len() as u64) < copied;
    if truncated {
        warn!(byte_cap, total = copied, "Upload exceeds byte cap, truncating");
    }

    decode_utf8(buffer)
}

fn decode_utf8(buffer: Vec<u8>) -> Result<String, PipelineError> {
    match String::from_utf8(buffer) {
        Ok(text) => Ok(text),
        Err(e) => {
            let utf8 = e.utf8_error();
            // error_len of None means the input ended mid-character
            if utf8.error_len().is_none() {
                let valid = utf8.valid_up_to();
                let mut bytes = e.into_bytes();
                bytes.truncate(valid);
                String::from_utf8(bytes).map_err(|e| file_error(e.to_string()))
            } else {
                Err(file_error(utf8))
            }
        }
    }
}

fn file_error(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::new(PipelineErrorKind::FileInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_whole_file_under_cap() {
        let mut upload: &[u8] = b"name,city\nAda,Portland\n";
        let text = stage_file_input(&mut upload, 900_000).unwrap();
        assert_eq!(text, "name,city\nAda,Portland\n");
    }

    #[test]
    fn cap_limits_bytes_read() {
        let data = "a".repeat(2_000);
        let mut upload = data.as_bytes();
        assert_eq!(stage_file_input(&mut upload, 1_500).unwrap().len(), 1_500);
    }

    #[test]
    fn invalid_utf8_is_file_input_error() {
        let mut upload: &[u8] = &[b'o', b'k', 0xff, b'!'];
        let err = stage_file_input(&mut upload, 100).unwrap_err();
        assert!(matches!(err.kind, PipelineErrorKind::FileInput(_)));
    }

    #[test]
    fn empty_upload_is_empty_text() {
        let mut upload: &[u8] = b"";
        assert_eq!(stage_file_input(&mut upload, 100).unwrap(), "");
    }

    struct FailingReader {
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.sent {
                return Err(std::io::Error::other("connection dropped"));
            }
            self.sent = true;
            buf[..4].copy_from_slice(b"part");
            Ok(4)
        }
    }

    fn staged_files(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(STAGED_PREFIX))
            .count()
    }

    #[test]
    fn staged_file_removed_on_every_path() {
        let dir = tempfile::tempdir().unwrap();

        let mut upload: &[u8] = b"name,city\nAda,Portland\n";
        stage_file_input_in(dir.path(), &mut upload, 900_000).unwrap();
        assert_eq!(staged_files(dir.path()), 0);

        let mut upload: &[u8] = &[b'o', b'k', 0xff, b'!'];
        stage_file_input_in(dir.path(), &mut upload, 100).unwrap_err();
        assert_eq!(staged_files(dir.path()), 0);

        let err = stage_file_input_in(dir.path(), &mut FailingReader { sent: false }, 100)
            .unwrap_err();
        assert!(err.kind.to_string().contains("connection dropped"));
        assert_eq!(staged_files(dir.path()), 0);
    }

    #[test]
    fn missing_staging_dir_is_file_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");

        let mut upload: &[u8] = b"text";
        let err = stage_file_input_in(&missing, &mut upload, 100).unwrap_err();
        assert!(matches!(err.kind, PipelineErrorKind::FileInput(_)));
    }
}
