//! Length-prefixed file frames for `tokio_util` framed I/O.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::extension::{EXTENSION_FIELD_LEN, ExtensionField, decode_extension, encode_extension};
use crate::error::CourierError;

/// Width of the little-endian payload length that follows the extension field.
pub const LENGTH_FIELD_LEN: usize = 8;

/// Full header size for length-prefixed frames.
pub const FILE_HEADER_LEN: usize = EXTENSION_FIELD_LEN + LENGTH_FIELD_LEN;

/// Default cap on a single file payload (256 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

// ── FileHeader ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Extension including the leading dot, or empty.
    pub extension: String,
    /// Payload length in bytes.
    pub length: u64,
}

impl FileHeader {
    pub fn encode(&self) -> Result<[u8; FILE_HEADER_LEN], CourierError> {
        let field = encode_extension(&self.extension)?;
        let mut buf = [0u8; FILE_HEADER_LEN];
        buf[..EXTENSION_FIELD_LEN].copy_from_slice(&field);
        buf[EXTENSION_FIELD_LEN..].copy_from_slice(&self.length.to_le_bytes());
        Ok(buf)
    }

    pub fn decode(bytes: &[u8; FILE_HEADER_LEN]) -> Self {
        let mut field: ExtensionField = [0u8; EXTENSION_FIELD_LEN];
        field.copy_from_slice(&bytes[..EXTENSION_FIELD_LEN]);
        let mut length = [0u8; LENGTH_FIELD_LEN];
        length.copy_from_slice(&bytes[EXTENSION_FIELD_LEN..]);
        Self {
            extension: decode_extension(&field),
            length: u64::from_le_bytes(length),
        }
    }
}

// ── FileFrame ────────────────────────────────────────────────────

/// One file transfer: its extension and the raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFrame {
    pub extension: String,
    pub payload: Bytes,
}

impl FileFrame {
    pub fn new(extension: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            extension: extension.into(),
            payload: payload.into(),
        }
    }
}

// ── FileFrameCodec ───────────────────────────────────────────────

#[derive(Debug)]
pub struct FileFrameCodec {
    max_payload: u64,
    // Header already consumed from the buffer, waiting on its payload.
    pending: Option<FileHeader>,
}

impl FileFrameCodec {
    pub fn new(max_payload: u64) -> Self {
        Self {
            max_payload,
            pending: None,
        }
    }

    pub fn max_payload(&self) -> u64 {
        self.max_payload
    }

    fn check_size(&self, size: u64) -> Result<usize, CourierError> {
        let too_large = CourierError::PayloadTooLarge {
            size,
            max: self.max_payload,
        };
        if size > self.max_payload {
            return Err(too_large);
        }
        usize::try_from(size).map_err(|_| too_large)
    }
}

impl Default for FileFrameCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl Decoder for FileFrameCodec {
    type Item = FileFrame;
    type Error = CourierError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let header = match self.pending.take() {
            Some(header) => header,
            None => {
                if src.len() < FILE_HEADER_LEN {
                    return Ok(None);
                }
                let mut raw = [0u8; FILE_HEADER_LEN];
                raw.copy_from_slice(&src[..FILE_HEADER_LEN]);
                let header = FileHeader::decode(&raw);
                let len = self.check_size(header.length)?;
                src.advance(FILE_HEADER_LEN);
                src.reserve(len.saturating_sub(src.len()));
                header
            }
        };

        let len = self.check_size(header.length)?;
        if src.len() < len {
            self.pending = Some(header);
            return Ok(None);
        }

        let payload = src.split_to(len).freeze();
        Ok(Some(FileFrame {
            extension: header.extension,
            payload,
        }))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() && self.pending.is_none() => Ok(None),
            None => Err(CourierError::ConnectionClosed("the complete file")),
        }
    }
}

impl Encoder<FileFrame> for FileFrameCodec {
    type Error = CourierError;

    fn encode(&mut self, item: FileFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let length = item.payload.len() as u64;
        self.check_size(length)?;

        let header = FileHeader {
            extension: item.extension,
            length,
        }
        .encode()?;
        dst.reserve(FILE_HEADER_LEN + item.payload.len());
        dst.extend_from_slice(&header);
        dst.extend_from_slice(&item.payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(frame: FileFrame) -> BytesMut {
        let mut buf = BytesMut::new();
        FileFrameCodec::default().encode(frame, &mut buf).unwrap();
        buf
    }

    #[test]
    fn header_layout() {
        let header = FileHeader {
            extension: ".txt".into(),
            length: 0x0102,
        };
        let bytes = header.encode().unwrap();
        assert_eq!(&bytes[..4], b".txt");
        assert!(bytes[4..EXTENSION_FIELD_LEN].iter().all(|&b| b == 0));
        assert_eq!(bytes[EXTENSION_FIELD_LEN], 0x02);
        assert_eq!(bytes[EXTENSION_FIELD_LEN + 1], 0x01);
        assert_eq!(FileHeader::decode(&bytes), header);
    }

    #[test]
    fn decode_waits_for_header_and_payload() {
        let full = encoded(FileFrame::new(".bin", vec![7u8; 600]));
        let mut codec = FileFrameCodec::default();
        let mut src = BytesMut::new();

        // Header split across two reads.
        src.extend_from_slice(&full[..10]);
        assert!(codec.decode(&mut src).unwrap().is_none());
        src.extend_from_slice(&full[10..FILE_HEADER_LEN + 256]);
        assert!(codec.decode(&mut src).unwrap().is_none());
        src.extend_from_slice(&full[FILE_HEADER_LEN + 256..]);

        let frame = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(frame.extension, ".bin");
        assert_eq!(frame.payload.len(), 600);
        assert!(src.is_empty());
    }

    #[test]
    fn empty_payload_decodes_immediately() {
        let mut src = encoded(FileFrame::new("", Vec::new()));
        let frame = FileFrameCodec::default().decode(&mut src).unwrap().unwrap();
        assert_eq!(frame.extension, "");
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn oversized_declared_length_is_rejected_before_buffering() {
        let header = FileHeader {
            extension: ".iso".into(),
            length: 1024,
        };
        let mut src = BytesMut::from(&header.encode().unwrap()[..]);
        let err = FileFrameCodec::new(512).decode(&mut src).unwrap_err();
        assert!(matches!(err, CourierError::PayloadTooLarge { size: 1024, max: 512 }));
    }

    #[test]
    fn encoder_rejects_long_extension() {
        let mut buf = BytesMut::new();
        let frame = FileFrame::new(".abcdefghijklmnopqrs", vec![1u8]);
        let err = FileFrameCodec::default().encode(frame, &mut buf).unwrap_err();
        assert!(matches!(err, CourierError::ExtensionTooLong { len: 20, .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn eof_mid_payload_is_an_error() {
        let full = encoded(FileFrame::new(".txt", b"0123456789".to_vec()));
        let mut src = BytesMut::from(&full[..FILE_HEADER_LEN + 4]);
        let mut codec = FileFrameCodec::default();
        assert!(codec.decode(&mut src).unwrap().is_none());
        let err = codec.decode_eof(&mut src).unwrap_err();
        assert!(matches!(err, CourierError::ConnectionClosed(_)));
    }

    #[test]
    fn eof_on_clean_boundary_ends_stream() {
        let mut src = BytesMut::new();
        assert!(FileFrameCodec::default().decode_eof(&mut src).unwrap().is_none());
    }
}
