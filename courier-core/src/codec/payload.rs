//! Legacy framing: extension field followed by an unterminated payload.
//!
//! The receiver stops reading as soon as the socket reports that no more
//! bytes are immediately available. On a slow or chunked delivery this
//! returns before the sender has finished writing; the remainder of the
//! file is never read.

use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::codec::extension::{EXTENSION_FIELD_LEN, decode_extension, encode_extension};
use crate::codec::frame::FileFrame;
use crate::error::CourierError;

/// Bytes requested from the socket per read.
pub const READ_CHUNK_SIZE: usize = 256;

/// Read whatever payload is currently deliverable.
///
/// Waits for the first chunk (or EOF), then keeps reading while the
/// socket has buffered data, stopping at the first `WouldBlock`.
pub async fn read_available_payload(stream: &TcpStream) -> io::Result<BytesMut> {
    let mut payload = BytesMut::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        stream.readable().await?;
        match stream.try_read(&mut chunk) {
            Ok(0) => return Ok(payload),
            Ok(n) => {
                payload.extend_from_slice(&chunk[..n]);
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => continue,
            Err(e) => return Err(e),
        }
    }

    loop {
        match stream.try_read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => payload.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
            Err(e) => return Err(e),
        }
    }

    Ok(payload)
}

/// Receive one legacy frame, refusing payloads above `max_payload`.
pub async fn read_legacy_frame(
    stream: &mut TcpStream,
    max_payload: u64,
) -> Result<FileFrame, CourierError> {
    let mut field = [0u8; EXTENSION_FIELD_LEN];
    stream.read_exact(&mut field).await.map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CourierError::ConnectionClosed("the file header")
        } else {
            e.into()
        }
    })?;
    let extension = decode_extension(&field);

    let payload = read_available_payload(stream).await?;
    let size = payload.len() as u64;
    if size > max_payload {
        return Err(CourierError::PayloadTooLarge {
            size,
            max: max_payload,
        });
    }

    Ok(FileFrame {
        extension,
        payload: payload.freeze(),
    })
}

/// Send one legacy frame and half-close the write side.
///
/// The shutdown lets the receiver see EOF, so an empty file does not
/// leave it waiting for a first chunk that never comes.
pub async fn write_legacy_frame<W>(stream: &mut W, frame: &FileFrame) -> Result<(), CourierError>
where
    W: AsyncWrite + Unpin,
{
    let field = encode_extension(&frame.extension)?;
    stream.write_all(&field).await?;
    stream.write_all(&frame.payload).await?;
    stream.flush().await?;
    stream.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, accepted) = tokio::join!(TcpStream::connect(addr), listener.accept());
        (client.unwrap(), accepted.unwrap().0)
    }

    #[tokio::test]
    async fn legacy_frame_over_loopback() {
        let (mut client, mut server) = pair().await;
        let frame = FileFrame::new(".txt", b"0123456789".to_vec());
        write_legacy_frame(&mut client, &frame).await.unwrap();

        let received = read_legacy_frame(&mut server, 1024).await.unwrap();
        assert_eq!(received, frame);
    }

    #[tokio::test]
    async fn empty_legacy_payload_ends_at_eof() {
        let (mut client, mut server) = pair().await;
        write_legacy_frame(&mut client, &FileFrame::new(".log", Vec::new()))
            .await
            .unwrap();

        let received = read_legacy_frame(&mut server, 1024).await.unwrap();
        assert_eq!(received.extension, ".log");
        assert!(received.payload.is_empty());
    }

    #[tokio::test]
    async fn payload_spanning_several_chunks() {
        let (mut client, server) = pair().await;
        let data = vec![0x5Au8; READ_CHUNK_SIZE * 3 + 17];
        client.write_all(&data).await.unwrap();
        client.shutdown().await.unwrap();

        // Wait until everything has landed in the receive buffer.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let payload = read_available_payload(&server).await.unwrap();
        assert_eq!(payload.len(), data.len());
    }

    #[tokio::test]
    async fn truncated_header_reports_closed_connection() {
        let (mut client, mut server) = pair().await;
        client.write_all(b".tx").await.unwrap();
        client.shutdown().await.unwrap();

        let err = read_legacy_frame(&mut server, 1024).await.unwrap_err();
        assert!(matches!(err, CourierError::ConnectionClosed(_)));
    }

    #[tokio::test]
    async fn legacy_payload_over_limit() {
        let (mut client, mut server) = pair().await;
        write_legacy_frame(&mut client, &FileFrame::new(".bin", vec![1u8; 64]))
            .await
            .unwrap();

        let err = read_legacy_frame(&mut server, 16).await.unwrap_err();
        assert!(matches!(err, CourierError::PayloadTooLarge { size: 64, max: 16 }));
    }
}
