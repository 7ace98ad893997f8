//! Serializers for dynamic (`Vec<T>`) and fixed-arity (`[T; N]`) sequences.
//!
//! A dynamic sequence is a 4-byte element count followed by the elements;
//! a fixed-arity sequence is the elements alone. How the elements are
//! moved is delegated to `T::Strategy`.

use crate::error::Result;
use crate::primitives::{LENGTH_PREFIX_SIZE, read_length_prefix, write_length_prefix};
use crate::serializer::Serializer;
use crate::stream::{IStream, LStream, OStream};
use crate::strategy::{SequenceStrategy, VariableElementwise};

impl<T> Serializer for Vec<T>
where
    T: Serializer + Default,
{
    type Strategy = VariableElementwise;

    #[inline]
    fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
        write_length_prefix(stream, self.len())?;
        <T::Strategy as SequenceStrategy<T>>::write_items(self, stream)
    }

    /// Leaves exactly the decoded count of elements.
    #[inline]
    fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
        let count = read_length_prefix(stream)?;
        <T::Strategy as SequenceStrategy<T>>::read_vec(self, count, stream)
    }

    #[inline]
    fn serialized_length(&self, stream: &mut LStream) {
        stream.advance(LENGTH_PREFIX_SIZE);
        <T::Strategy as SequenceStrategy<T>>::items_length(self, stream);
    }
}

impl<T, const N: usize> Serializer for [T; N]
where
    T: Serializer,
{
    type Strategy = <T::Strategy as SequenceStrategy<T>>::Array<N>;

    #[inline]
    fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
        <T::Strategy as SequenceStrategy<T>>::write_items(self, stream)
    }

    #[inline]
    fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
        <T::Strategy as SequenceStrategy<T>>::read_items(self, stream)
    }

    #[inline]
    fn serialized_length(&self, stream: &mut LStream) {
        <T::Strategy as SequenceStrategy<T>>::items_length(self, stream);
    }
}
