//! Whole-buffer standard I/O.
//!
//! The archive formats involved need random access, so input is collected in
//! full before anything is parsed, and output is written in one piece once
//! the archive is complete.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Read `reader` to EOF
pub async fn read_input<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Write all of `data` to `writer` and flush it
pub async fn write_output<W: AsyncWrite + Unpin>(mut writer: W, data: &[u8]) -> std::io::Result<()> {
    writer.write_all(data).await?;
    writer.flush().await
}
