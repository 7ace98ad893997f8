//! Sequence encoding strategies, selected statically per element type.
//!
//! Every [`Serializer`] names one of three strategies as its `Strategy`
//! type. Sequence serializers call through `T::Strategy`, so the choice is
//! made once at monomorphization and never inside the per-element loop:
//!
//! - [`BulkCopy`]: the element is simple (every bit pattern is a valid value
//!   and the in-memory layout is the wire layout). A whole run of elements
//!   is moved with one contiguous copy.
//! - [`FixedElementwise`]: the element has a value-independent serialized
//!   length but is not simple (`bool`, fixed-size records). Elements are
//!   encoded one by one; the length of a run is one element's length times
//!   the count.
//! - [`VariableElementwise`]: everything else. Elements are encoded and
//!   measured one by one.
//!
//! `BulkCopy` is only implemented for [`bytemuck::Pod`] types, so a type
//! cannot claim the bulk path unless its layout really allows it.

use std::mem::size_of_val;

use bytemuck::Pod;

use crate::error::Result;
use crate::serializer::Serializer;
use crate::stream::{IStream, LStream, OStream, Stream};

/// Tag naming one of the three strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StrategyKind {
    BulkCopy,
    FixedElementwise,
    VariableElementwise,
}

impl StrategyKind {
    /// Pick a strategy from the two classification facts.
    ///
    /// Simple wins over fixed-size, fixed-size over variable.
    pub const fn classify(is_simple: bool, is_fixed_size: bool) -> Self {
        if is_simple {
            StrategyKind::BulkCopy
        } else if is_fixed_size {
            StrategyKind::FixedElementwise
        } else {
            StrategyKind::VariableElementwise
        }
    }

    pub const fn is_simple(self) -> bool {
        matches!(self, StrategyKind::BulkCopy)
    }

    pub const fn is_fixed_size(self) -> bool {
        !matches!(self, StrategyKind::VariableElementwise)
    }
}

/// How a contiguous run of `T` is written, read and measured.
pub trait SequenceStrategy<T> {
    const KIND: StrategyKind;

    /// Strategy of a fixed-arity array of `T`.
    type Array<const N: usize>: SequenceStrategy<[T; N]>;

    fn write_items(items: &[T], stream: &mut OStream<'_>) -> Result<()>;

    fn read_items(items: &mut [T], stream: &mut IStream<'_>) -> Result<()>;

    fn items_length(items: &[T], stream: &mut LStream);

    /// Resize `items` to exactly `count` elements and fill them from the stream.
    ///
    /// Elements are decoded one at a time and capacity never runs ahead of
    /// the bytes left in the stream, so a corrupt count ends in an overrun.
    fn read_vec(items: &mut Vec<T>, count: usize, stream: &mut IStream<'_>) -> Result<()>
    where
        T: Default + Serializer,
    {
        items.clear();
        items.reserve(count.min(stream.remaining()));
        for _ in 0..count {
            let mut item = T::default();
            stream.next(&mut item)?;
            items.push(item);
        }
        Ok(())
    }
}

/// Whether `T` is simple: bit-copyable with in-memory layout equal to wire layout.
pub const fn is_simple<T: Serializer>() -> bool {
    <T::Strategy as SequenceStrategy<T>>::KIND.is_simple()
}

/// Whether the serialized length of `T` is independent of its value.
pub const fn is_fixed_size<T: Serializer>() -> bool {
    <T::Strategy as SequenceStrategy<T>>::KIND.is_fixed_size()
}

/// Single contiguous copy of the whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkCopy;

/// Per-element encoding with a one-element length shortcut.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedElementwise;

/// Per-element encoding and per-element length.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableElementwise;

impl<T: Pod> SequenceStrategy<T> for BulkCopy {
    const KIND: StrategyKind = StrategyKind::BulkCopy;

    type Array<const N: usize> = BulkCopy;

    #[inline]
    fn write_items(items: &[T], stream: &mut OStream<'_>) -> Result<()> {
        if size_of_val(items) == 0 {
            return Ok(());
        }
        let bytes: &[u8] = bytemuck::cast_slice(items);
        stream.advance(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    #[inline]
    fn read_items(items: &mut [T], stream: &mut IStream<'_>) -> Result<()> {
        if size_of_val(items) == 0 {
            return Ok(());
        }
        let dst: &mut [u8] = bytemuck::cast_slice_mut(items);
        dst.copy_from_slice(stream.advance(dst.len())?);
        Ok(())
    }

    #[inline]
    fn items_length(items: &[T], stream: &mut LStream) {
        stream.advance(size_of_val(items));
    }

    /// Reserves the byte range before resizing, so a corrupt count fails
    /// as an overrun instead of allocating.
    fn read_vec(items: &mut Vec<T>, count: usize, stream: &mut IStream<'_>) -> Result<()>
    where
        T: Default,
    {
        let byte_len = count.saturating_mul(std::mem::size_of::<T>());
        let src = stream.advance(byte_len)?;
        items.clear();
        items.resize(count, T::zeroed());
        if byte_len > 0 {
            bytemuck::cast_slice_mut::<T, u8>(items).copy_from_slice(src);
        }
        Ok(())
    }
}

#[inline]
fn write_each<T: Serializer>(items: &[T], stream: &mut OStream<'_>) -> Result<()> {
    for item in items {
        stream.next(item)?;
    }
    Ok(())
}

#[inline]
fn read_each<T: Serializer>(items: &mut [T], stream: &mut IStream<'_>) -> Result<()> {
    for item in items {
        stream.next(item)?;
    }
    Ok(())
}

impl<T: Serializer> SequenceStrategy<T> for FixedElementwise {
    const KIND: StrategyKind = StrategyKind::FixedElementwise;

    type Array<const N: usize> = FixedElementwise;

    #[inline]
    fn write_items(items: &[T], stream: &mut OStream<'_>) -> Result<()> {
        write_each(items, stream)
    }

    #[inline]
    fn read_items(items: &mut [T], stream: &mut IStream<'_>) -> Result<()> {
        read_each(items, stream)
    }

    /// Measures the first element only and assumes every element has the
    /// same length. Types must not claim this strategy otherwise.
    #[inline]
    fn items_length(items: &[T], stream: &mut LStream) {
        if let Some(first) = items.first() {
            let mut one = LStream::new();
            first.serialized_length(&mut one);
            stream.advance(one.length().saturating_mul(items.len()));
        }
    }
}

impl<T: Serializer> SequenceStrategy<T> for VariableElementwise {
    const KIND: StrategyKind = StrategyKind::VariableElementwise;

    type Array<const N: usize> = VariableElementwise;

    #[inline]
    fn write_items(items: &[T], stream: &mut OStream<'_>) -> Result<()> {
        write_each(items, stream)
    }

    #[inline]
    fn read_items(items: &mut [T], stream: &mut IStream<'_>) -> Result<()> {
        read_each(items, stream)
    }

    #[inline]
    fn items_length(items: &[T], stream: &mut LStream) {
        for item in items {
            stream.next(item);
        }
    }
}
