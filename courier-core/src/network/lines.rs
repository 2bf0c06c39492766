//! One-line request/reply I/O over `LinesCodec`.

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use crate::error::CourierError;

/// Longest line accepted from a peer (64 KiB).
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Read exactly one newline-terminated line.
///
/// `what` names the expected line in the error raised when the peer
/// closes first.
pub async fn read_line<R>(reader: R, max_length: usize, what: &'static str) -> Result<String, CourierError>
where
    R: AsyncRead + Unpin,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(max_length));
    match lines.next().await {
        Some(line) => Ok(line?),
        None => Err(CourierError::ConnectionClosed(what)),
    }
}

/// Write `line` plus the delimiter and flush.
pub async fn write_line<W>(writer: W, line: &str) -> Result<(), CourierError>
where
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedWrite::new(writer, LinesCodec::new());
    lines.send(line).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn reads_first_line_without_delimiter() {
        let input: &[u8] = b"hello there\r\nsecond\n";
        let line = read_line(input, 1024, "a line").await.unwrap();
        assert_eq!(line, "hello there");
    }

    #[tokio::test]
    async fn line_split_across_reads() {
        let mock = tokio_test::io::Builder::new()
            .read(b"New message ")
            .read(b"from client: hi\nignored")
            .build();
        let line = read_line(mock, 1024, "a reply").await.unwrap();
        assert_eq!(line, "New message from client: hi");
    }

    #[tokio::test]
    async fn unterminated_final_line_is_returned_at_eof() {
        let input: &[u8] = b"no newline";
        let line = read_line(input, 1024, "a line").await.unwrap();
        assert_eq!(line, "no newline");
    }

    #[tokio::test]
    async fn empty_input_is_a_closed_connection() {
        let input: &[u8] = b"";
        let err = read_line(input, 1024, "a reply").await.unwrap_err();
        assert_eq!(err.to_string(), "connection closed before a reply was received");
    }

    #[tokio::test]
    async fn over_long_line_is_rejected() {
        let input = vec![b'x'; 64];
        let err = read_line(&input[..], 16, "a line").await.unwrap_err();
        assert!(matches!(err, CourierError::Line(_)));
    }

    #[tokio::test]
    async fn write_appends_newline() {
        let (mut tx, mut rx) = tokio::io::duplex(64);
        write_line(&mut tx, "ping").await.unwrap();
        tx.shutdown().await.unwrap();

        let mut out = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut rx, &mut out).await.unwrap();
        assert_eq!(out, b"ping\n");
    }
}
