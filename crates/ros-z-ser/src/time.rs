//! Time and duration values.
//!
//! Both are a pair of 32-bit signed fields, seconds then nanoseconds, and
//! take 8 bytes on the wire. The codec does not normalize them.

use bytemuck::{Pod, Zeroable};

use crate::error::Result;
use crate::serializer::Serializer;
use crate::stream::{IStream, LStream, OStream};
use crate::strategy::BulkCopy;

/// Serialized size of [`Time`] and [`Duration`].
pub const TIME_SIZE: usize = 8;

/// A point in time.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub sec: i32,
    pub nsec: i32,
}

/// A span of time.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    pub sec: i32,
    pub nsec: i32,
}

impl Time {
    pub const fn new(sec: i32, nsec: i32) -> Self {
        Self { sec, nsec }
    }
}

impl Duration {
    pub const fn new(sec: i32, nsec: i32) -> Self {
        Self { sec, nsec }
    }
}

macro_rules! impl_time_serializer {
    ($($ty:ty),*) => {
        $(
            impl Serializer for $ty {
                type Strategy = BulkCopy;

                #[inline]
                fn write(&self, stream: &mut OStream<'_>) -> Result<()> {
                    stream.next(&self.sec)?;
                    stream.next(&self.nsec)
                }

                #[inline]
                fn read(&mut self, stream: &mut IStream<'_>) -> Result<()> {
                    stream.next(&mut self.sec)?;
                    stream.next(&mut self.nsec)
                }

                #[inline]
                fn serialized_length(&self, stream: &mut LStream) {
                    stream.advance(TIME_SIZE);
                }
            }
        )*
    };
}

impl_time_serializer!(Time, Duration);
