//! Content hashing for uploads.
//!
//! An upload body can only be read once, but it is needed twice: once to compute
//! its checksum and once to send it to the artifact repository. Each chunk is
//! therefore hashed and written to an anonymous temporary file as it arrives,
//! and the file is rewound once the stream ends. Memory use stays bounded by the
//! size of a single chunk.

use actix_web::web::Bytes;
use futures_util::{Stream, StreamExt};
use md5::Context;
use std::fmt::Display;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};

#[derive(Debug, thiserror::Error)]
pub enum SpoolError {
    #[error("failed to read upload stream: {0}")]
    Stream(String),
    #[error("failed to spool upload: {0}")]
    Io(#[from] std::io::Error),
}

/// An upload body written to disk, positioned at its first byte.
#[derive(Debug)]
pub struct SpooledFile {
    pub file: File,
    /// Lowercase hex MD5 of the content.
    pub checksum: String,
    pub size: u64,
}

pub async fn spool_and_hash<S, E>(mut stream: S) -> Result<SpooledFile, SpoolError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    let mut file = tempfile::tempfile()?;
    let mut hasher = Context::new();
    let mut size = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| SpoolError::Stream(e.to_string()))?;
        hasher.consume(&chunk);
        file.write_all(&chunk)?;
        size += chunk.len() as u64;
    }

    file.flush()?;
    file.seek(SeekFrom::Start(0))?;

    Ok(SpooledFile {
        file,
        checksum: format!("{:x}", hasher.finalize()),
        size,
    })
}
