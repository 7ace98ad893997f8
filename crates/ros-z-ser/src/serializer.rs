//! The serialization customization point and its free-function entry points.

use crate::error::Result;
use crate::stream::{IStream, LStream, OStream, Stream};
use crate::strategy::SequenceStrategy;

/// Per-type serialization behavior.
///
/// Implementing this trait is the only thing a type needs to take part in
/// the codec: each method covers one traversal direction, and all three
/// must walk the same logical structure so that the computed length, the
/// bytes written and the bytes consumed agree.
///
/// `Strategy` carries the type's classification. It decides how sequences
/// of this type are encoded (see [`crate::strategy`]).
pub trait Serializer: Sized {
    type Strategy: SequenceStrategy<Self>;

    /// Write `self` to the stream.
    fn write(&self, stream: &mut OStream<'_>) -> Result<()>;

    /// Read `self` from the stream, overwriting its current contents.
    fn read(&mut self, stream: &mut IStream<'_>) -> Result<()>;

    /// Add the serialized length of `self` to the stream.
    fn serialized_length(&self, stream: &mut LStream);
}

/// Serialize an object into an output stream.
#[inline]
pub fn serialize<T: Serializer>(stream: &mut OStream<'_>, value: &T) -> Result<()> {
    value.write(stream)
}

/// Deserialize an object from an input stream.
#[inline]
pub fn deserialize<T: Serializer>(stream: &mut IStream<'_>, value: &mut T) -> Result<()> {
    value.read(stream)
}

/// Determine the serialized length of an object without producing bytes.
#[inline]
pub fn serialization_length<T: Serializer>(value: &T) -> usize {
    let mut stream = LStream::new();
    value.serialized_length(&mut stream);
    stream.length()
}

/// Serialize to a new `Vec<u8>` sized exactly by a length pass.
pub fn to_vec<T: Serializer>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; serialization_length(value)];
    let mut stream = OStream::new(&mut buffer);
    value.write(&mut stream)?;
    debug_assert_eq!(stream.remaining(), 0, "length pass disagrees with write pass");
    Ok(buffer)
}

/// Deserialize into an existing value.
///
/// Returns the count of bytes consumed.
pub fn from_bytes_into<T: Serializer>(input: &[u8], value: &mut T) -> Result<usize> {
    let mut stream = IStream::new(input);
    value.read(&mut stream)?;
    Ok(stream.position())
}

/// Deserialize a freshly constructed value.
///
/// Returns deserialized object + count of bytes consumed.
pub fn from_bytes<T: Serializer + Default>(input: &[u8]) -> Result<(T, usize)> {
    let mut value = T::default();
    let consumed = from_bytes_into(input, &mut value)?;
    Ok((value, consumed))
}
