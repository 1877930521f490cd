//! Length-delimited framing over a boundary-less byte stream.
//!
//! TCP gives no message boundaries, so the protocol layer owns them: each
//! frame is a 4-byte big-endian length prefix followed by the encoded
//! message body. The frame functions work on raw `&[u8]` bodies; what the
//! bytes mean is the [`Codec`](crate::Codec)'s business, keeping this
//! module format-agnostic.
//!
//! [`MAX_FRAME_LEN`] bounds allocation from malformed or hostile length
//! prefixes. Chat traffic is small; 64 KiB is generous headroom.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum allowed frame body length in bytes.
pub const MAX_FRAME_LEN: u32 = 64 * 1024;

/// Writes one frame: 4-byte big-endian length, then the body, then flush.
///
/// # Errors
/// Returns `InvalidInput` if the body exceeds [`MAX_FRAME_LEN`] (nothing
/// is written), or the underlying I/O error.
pub async fn write_frame<W>(writer: &mut W, body: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if body.len() > MAX_FRAME_LEN as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "frame too large: {} bytes (max {MAX_FRAME_LEN})",
                body.len()
            ),
        ));
    }
    let len = body.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one frame: 4-byte big-endian length, then the body.
///
/// # Errors
/// Returns `UnexpectedEof` if the stream ends before or inside a frame,
/// and `InvalidData` if the prefix exceeds [`MAX_FRAME_LEN`].
pub async fn read_frame<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame too large: {len} bytes (max {MAX_FRAME_LEN})"),
        ));
    }
    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    Ok(body)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_simple_frame() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        write_frame(&mut client, b"hello, parley!").await.unwrap();
        let body = read_frame(&mut server).await.unwrap();
        assert_eq!(body, b"hello, parley!");
    }

    #[tokio::test]
    async fn test_round_trip_empty_frame() {
        let (mut client, mut server) = tokio::io::duplex(64);

        write_frame(&mut client, b"").await.unwrap();
        let body = read_frame(&mut server).await.unwrap();
        assert_eq!(body, Vec::<u8>::new());
    }

    #[tokio::test]
    async fn test_multiple_frames_in_sequence() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        let frames: [&[u8]; 3] = [b"first", b"second", b"third"];
        for frame in frames {
            write_frame(&mut client, frame).await.unwrap();
        }
        for expected in frames {
            let body = read_frame(&mut server).await.unwrap();
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn test_write_rejects_oversized_body() {
        let (mut client, _server) = tokio::io::duplex(64);

        let big = vec![0u8; MAX_FRAME_LEN as usize + 1];
        let err = write_frame(&mut client, &big).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_read_rejects_oversized_prefix() {
        // A hostile prefix claiming more than MAX_FRAME_LEN must fail
        // before any allocation of that size happens.
        let prefix = (MAX_FRAME_LEN + 1).to_be_bytes();
        let mut reader: &[u8] = &prefix;

        let err = read_frame(&mut reader).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_read_truncated_prefix_is_unexpected_eof() {
        // Two bytes where four are needed.
        let mut reader: &[u8] = &[0u8, 1];

        let err = read_frame(&mut reader).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[tokio::test]
    async fn test_read_truncated_body_is_unexpected_eof() {
        // Prefix promises ten bytes; only three arrive.
        let mut wire = 10u32.to_be_bytes().to_vec();
        wire.extend_from_slice(b"abc");
        let mut reader: &[u8] = &wire;

        let err = read_frame(&mut reader).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
