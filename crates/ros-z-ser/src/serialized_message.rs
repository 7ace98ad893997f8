//! Whole-message framing.
//!
//! A framed message is a 4-byte payload length followed by the payload. A
//! service response prepends a 1-byte success flag; a failed response is
//! the flag and a zero length, and nothing else.
//!
//! Framing runs a length pass first, allocates exactly once, then runs the
//! write pass into that allocation. The finished buffer is frozen behind an
//! `Arc` so producer and transport can share it without copying.

use std::sync::Arc;

use tracing::trace;

use crate::error::{Error, Result};
use crate::primitives::{LENGTH_PREFIX_SIZE, write_length_prefix};
use crate::serializer::{Serializer, serialization_length};
use crate::stream::{IStream, OStream, Stream};

/// Size of the success flag leading a service response.
pub const SERVICE_OK_SIZE: usize = 1;

/// An owned, immutable, shareable message buffer.
///
/// Cloning is cheap and shares the allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedMessage {
    buf: Arc<[u8]>,
    message_start: usize,
}

impl SerializedMessage {
    /// Wrap received bytes whose payload starts at offset 0.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self {
            buf: Arc::from(buf),
            message_start: 0,
        }
    }

    /// Wrap bytes whose payload starts at `message_start`.
    ///
    /// `message_start` is clamped to the buffer length.
    pub fn with_message_start(buf: Vec<u8>, message_start: usize) -> Self {
        let message_start = message_start.min(buf.len());
        Self {
            buf: Arc::from(buf),
            message_start,
        }
    }

    /// The whole buffer, prefixes included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Total byte count, prefixes included.
    #[inline]
    pub fn num_bytes(&self) -> usize {
        self.buf.len()
    }

    /// Offset of the first payload byte.
    #[inline]
    pub fn message_start(&self) -> usize {
        self.message_start
    }

    /// The payload, without the prefixes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.buf[self.message_start..]
    }

    /// The shared allocation.
    #[inline]
    pub fn shared(&self) -> &Arc<[u8]> {
        &self.buf
    }
}

impl AsRef<[u8]> for SerializedMessage {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Run the write pass into a buffer of exactly `total` bytes.
fn write_framed<F>(total: usize, fill: F) -> Result<(Vec<u8>, usize)>
where
    F: FnOnce(&mut OStream<'_>) -> Result<usize>,
{
    let mut buf = vec![0u8; total];
    let mut stream = OStream::new(&mut buf);
    let message_start = fill(&mut stream)?;
    debug_assert_eq!(stream.remaining(), 0, "length pass disagrees with write pass");
    Ok((buf, message_start))
}

/// Serialize a message behind a 4-byte payload length.
pub fn serialize_message<M: Serializer>(message: &M) -> Result<SerializedMessage> {
    let len = serialization_length(message);
    let total = len
        .checked_add(LENGTH_PREFIX_SIZE)
        .ok_or(Error::LengthOverflow(len))?;
    trace!("[SER] serialize_message: payload {} bytes, buffer {} bytes", len, total);

    let (buf, message_start) = write_framed(total, |stream| {
        write_length_prefix(stream, len)?;
        let start = stream.position();
        stream.next(message)?;
        Ok(start)
    })?;
    Ok(SerializedMessage::with_message_start(buf, message_start))
}

/// Serialize a service response: success flag, payload length, payload.
///
/// When `ok` is false the response is exactly five bytes (the flag and a
/// zero length) and `message` is not serialized.
pub fn serialize_service_response<M: Serializer>(ok: bool, message: &M) -> Result<SerializedMessage> {
    if !ok {
        trace!("[SER] serialize_service_response: failure");
        let (buf, message_start) = write_framed(SERVICE_OK_SIZE + LENGTH_PREFIX_SIZE, |stream| {
            stream.next(&0u8)?;
            stream.next(&0u32)?;
            Ok(stream.position())
        })?;
        return Ok(SerializedMessage::with_message_start(buf, message_start));
    }

    let len = serialization_length(message);
    let total = len
        .checked_add(SERVICE_OK_SIZE + LENGTH_PREFIX_SIZE)
        .ok_or(Error::LengthOverflow(len))?;
    trace!(
        "[SER] serialize_service_response: payload {} bytes, buffer {} bytes",
        len, total
    );

    let (buf, message_start) = write_framed(total, |stream| {
        stream.next(&1u8)?;
        write_length_prefix(stream, len)?;
        let start = stream.position();
        stream.next(message)?;
        Ok(start)
    })?;
    Ok(SerializedMessage::with_message_start(buf, message_start))
}

/// Deserialize a message in place.
///
/// With `includes_length` the first 4 bytes are skipped as the length
/// prefix; otherwise decoding starts at byte 0. The prefix is not checked
/// against the buffer: a wrong prefix surfaces as an overrun or as unread
/// trailing bytes.
pub fn deserialize_message<M: Serializer>(
    serialized: &SerializedMessage,
    message: &mut M,
    includes_length: bool,
) -> Result<()> {
    let bytes = serialized.as_bytes();
    let mut stream = IStream::new(bytes);
    if includes_length {
        stream.advance(LENGTH_PREFIX_SIZE)?;
    }
    stream.next(message)?;
    trace!(
        "[SER] deserialize_message: consumed {} of {} bytes",
        stream.position(),
        bytes.len()
    );
    Ok(())
}

/// Deserialize a freshly constructed message.
pub fn message_from<M: Serializer + Default>(
    serialized: &SerializedMessage,
    includes_length: bool,
) -> Result<M> {
    let mut message = M::default();
    deserialize_message(serialized, &mut message, includes_length)?;
    Ok(message)
}
