//! Bounded stream capture.
//!
//! Each pipe is drained to EOF so the child never blocks on a full pipe, but
//! only the first `limit` bytes are kept. The total byte count is still tracked
//! so truncation notices can report the original size.

use std::io::{self, Read};

const READ_CHUNK: usize = 8 * 1024;

/// Output captured from one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedStream {
    /// Leading bytes of the stream, at most the capture limit.
    pub bytes: Vec<u8>,
    /// Number of bytes the stream produced in total.
    pub total_len: usize,
}

impl CapturedStream {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self {
            total_len: bytes.len(),
            bytes,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.total_len > self.bytes.len()
    }

    /// Decode the kept bytes, cut to `limit` bytes on a char boundary.
    pub fn to_text(&self, limit: usize) -> String {
        let end = self.bytes.len().min(limit);
        let kept = &self.bytes[..end];

        // A multi-byte character split by the cap is dropped rather than
        // turned into a replacement character.
        let kept = match std::str::from_utf8(kept) {
            Err(e) if e.error_len().is_none() => &kept[..e.valid_up_to()],
            _ => kept,
        };

        String::from_utf8_lossy(kept).into_owned()
    }
}

/// Read `reader` to EOF, keeping at most `limit` bytes.
pub fn read_bounded<R: Read>(mut reader: R, limit: usize) -> io::Result<CapturedStream> {
    let mut captured = CapturedStream::default();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let room = limit.saturating_sub(captured.bytes.len());
        captured.bytes.extend_from_slice(&chunk[..n.min(room)]);
        captured.total_len += n;
    }

    Ok(captured)
}
