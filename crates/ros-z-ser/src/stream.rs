//! Bounds-checked cursors over a message buffer.
//!
//! Every traversal of a value runs over one of three stream flavors:
//!
//! - [`IStream`] reads from a borrowed byte slice,
//! - [`OStream`] writes into a borrowed, pre-sized byte slice,
//! - [`LStream`] touches no memory and only counts bytes.
//!
//! `advance` is the single gate for buffer access. It is checked on every
//! call and fails with [`Error::StreamOverrun`] the moment the cursor would
//! move past the end of the backing range.

use tracing::debug;

use crate::error::{Error, Result};
use crate::serializer::Serializer;

/// Direction of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StreamType {
    Input,
    Output,
    Length,
}

/// State shared by the three stream flavors.
pub trait Stream {
    const STREAM_TYPE: StreamType;

    /// Bytes advanced past since the stream was created.
    fn position(&self) -> usize;

    /// Bytes left before the end of the backing range.
    fn remaining(&self) -> usize;
}

/// Compute the end offset of an advance, or report the overrun.
#[inline(always)]
fn checked_end(stream: StreamType, position: usize, len: usize, capacity: usize) -> Result<usize> {
    match position.checked_add(len) {
        Some(end) if end <= capacity => Ok(end),
        _ => Err(overrun(stream, position, len, capacity - position)),
    }
}

#[cold]
#[inline(never)]
fn overrun(stream: StreamType, position: usize, requested: usize, remaining: usize) -> Error {
    debug!(
        "[SER] {} stream overrun at offset {}: requested {} bytes, {} remaining",
        stream, position, requested, remaining
    );
    Error::StreamOverrun {
        stream,
        position,
        requested,
        remaining,
    }
}

/// Input stream: deserializes values out of a borrowed buffer.
#[derive(Debug)]
pub struct IStream<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> IStream<'a> {
    /// Create a new input stream over the given bytes.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Consume the next `len` bytes and return them.
    #[inline(always)]
    pub fn advance(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = checked_end(Self::STREAM_TYPE, self.position, len, self.data.len())?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Deserialize the next item of this stream into `value`.
    #[inline(always)]
    pub fn next<T: Serializer>(&mut self, value: &mut T) -> Result<()> {
        value.read(self)
    }
}

impl Stream for IStream<'_> {
    const STREAM_TYPE: StreamType = StreamType::Input;

    #[inline]
    fn position(&self) -> usize {
        self.position
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

/// Output stream: serializes values into a borrowed, pre-sized buffer.
#[derive(Debug)]
pub struct OStream<'a> {
    data: &'a mut [u8],
    position: usize,
}

impl<'a> OStream<'a> {
    /// Create a new output stream over the given buffer.
    #[inline]
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Reserve the next `len` bytes and return them for writing.
    #[inline(always)]
    pub fn advance(&mut self, len: usize) -> Result<&mut [u8]> {
        let end = checked_end(Self::STREAM_TYPE, self.position, len, self.data.len())?;
        let start = self.position;
        self.position = end;
        Ok(&mut self.data[start..end])
    }

    /// Serialize `value` as the next item of this stream.
    #[inline(always)]
    pub fn next<T: Serializer>(&mut self, value: &T) -> Result<()> {
        value.write(self)
    }
}

impl Stream for OStream<'_> {
    const STREAM_TYPE: StreamType = StreamType::Output;

    #[inline]
    fn position(&self) -> usize {
        self.position
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

/// Length stream.
///
/// Not a stream in the usual sense: nothing is read or written, the stream
/// only accumulates the byte count a write pass would produce. It exists so
/// one traversal can drive all three directions.
#[derive(Debug, Default, Clone, Copy)]
pub struct LStream {
    count: usize,
}

impl LStream {
    #[inline]
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Add `len` bytes to the count.
    #[inline(always)]
    pub fn advance(&mut self, len: usize) {
        self.count = self.count.saturating_add(len);
    }

    /// Add the serialized length of `value` to the count.
    #[inline(always)]
    pub fn next<T: Serializer>(&mut self, value: &T) {
        value.serialized_length(self)
    }

    /// Total bytes counted so far.
    #[inline]
    pub fn length(&self) -> usize {
        self.count
    }
}

impl Stream for LStream {
    const STREAM_TYPE: StreamType = StreamType::Length;

    #[inline]
    fn position(&self) -> usize {
        self.count
    }

    /// The length stream has no end.
    #[inline]
    fn remaining(&self) -> usize {
        usize::MAX - self.count
    }
}
