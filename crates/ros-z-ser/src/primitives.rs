//! Serializers for scalars, booleans and strings.
//!
//! Numeric scalars are written as their raw in-memory bit pattern in native
//! byte order, which is what lets sequences of them take the bulk-copy path
//! and still produce the same bytes. Booleans are one byte (0 or 1). Strings
//! are a 4-byte byte count followed by the UTF-8 bytes, without terminator.

use std::mem::size_of;

use byteorder::ByteOrder;

use crate::NativeEndian;
use crate::error::{Error, Result};
use crate::serializer::Serializer;
use crate::stream::{IStream, LStream, OStream};
use crate::strategy::{BulkCopy, FixedElementwise, VariableElementwise};

/// Size of the prefix carried by strings, dynamic sequences and framed messages.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Write a 4-byte length prefix.
#[inline]
pub(crate) fn write_length_prefix(stream: &mut OStream<'_>, len: usize) -> Result<()> {
    let len = u32::try_from(len).map_err(|_| Error::LengthOverflow(len))?;
    stream.next(&len)
}

/// Read a 4-byte length prefix.
#[inline]
pub(crate) fn read_length_prefix(stream: &mut IStream<'_>) -> Result<usize> {
    let mut len = 0u32;
    stream.next(&mut len)?;
    Ok(len as usize)
}

macro_rules! impl_scalar_serializer {
    ($($ty:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl Serializer for $ty {
                type Strategy = BulkCopy;

                #[inline(always)]
                fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
                    NativeEndian::$write(stream.advance(size_of::<$ty>())?, *self);
                    Ok(())
                }

                #[inline(always)]
                fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
                    *self = NativeEndian::$read(stream.advance(size_of::<$ty>())?);
                    Ok(())
                }

                #[inline(always)]
                fn serialized_length(&self, stream: &mut LStream) {
                    stream.advance(size_of::<$ty>());
                }
            }
        )*
    };
}

impl_scalar_serializer! {
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    i32 => write_i32, read_i32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}

impl Serializer for u8 {
    type Strategy = BulkCopy;

    #[inline(always)]
    fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
        stream.advance(1)?[0] = *self;
        Ok(())
    }

    #[inline(always)]
    fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
        *self = stream.advance(1)?[0];
        Ok(())
    }

    #[inline(always)]
    fn serialized_length(&self, stream: &mut LStream) {
        stream.advance(1);
    }
}

impl Serializer for i8 {
    type Strategy = BulkCopy;

    #[inline(always)]
    fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
        stream.advance(1)?[0] = *self as u8;
        Ok(())
    }

    #[inline(always)]
    fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
        *self = stream.advance(1)?[0] as i8;
        Ok(())
    }

    #[inline(always)]
    fn serialized_length(&self, stream: &mut LStream) {
        stream.advance(1);
    }
}

/// Booleans are one byte on the wire but not bit-copyable: only 0 and 1
/// are valid in memory, so any nonzero byte reads as `true`.
impl Serializer for bool {
    type Strategy = FixedElementwise;

    #[inline(always)]
    fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
        stream.advance(1)?[0] = u8::from(*self);
        Ok(())
    }

    #[inline(always)]
    fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
        *self = stream.advance(1)?[0] != 0;
        Ok(())
    }

    #[inline(always)]
    fn serialized_length(&self, stream: &mut LStream) {
        stream.advance(1);
    }
}

impl Serializer for String {
    type Strategy = VariableElementwise;

    #[inline]
    fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
        write_length_prefix(stream, self.len())?;
        if !self.is_empty() {
            stream.advance(self.len())?.copy_from_slice(self.as_bytes());
        }
        Ok(())
    }

    #[inline]
    fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
        let len = read_length_prefix(stream)?;
        self.clear();
        if len > 0 {
            let bytes = stream.advance(len)?;
            self.push_str(std::str::from_utf8(bytes)?);
        }
        Ok(())
    }

    #[inline]
    fn serialized_length(&self, stream: &mut LStream) {
        stream.advance(LENGTH_PREFIX_SIZE + self.len());
    }
}
