//! Structured-type hook: how composite records take part in the codec.
//!
//! A record implements [`Message`] to serialize, deserialize and measure
//! itself field by field. The codec never looks inside a record; it only
//! calls through the three hook functions below, which is what lets
//! arbitrarily nested records appear in sequences and other records.
//!
//! There are two ways to provide a `Message`:
//!
//! - write the three callbacks by hand and hook them up with
//!   [`impl_message_serializer!`](crate::impl_message_serializer);
//! - `#[derive(Message)]` (with the `derive` feature), which declares the
//!   field traversal once and expands it into all three directions.
//!
//! ```
//! use ros_z_ser::{IStream, LStream, Message, OStream, Result};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: f64,
//!     y: f64,
//! }
//!
//! impl Message for Point {
//!     fn write_fields(&self, stream: &mut OStream<'_>) -> Result<()> {
//!         stream.next(&self.x)?;
//!         stream.next(&self.y)
//!     }
//!
//!     fn read_fields(&mut self, stream: &mut IStream<'_>) -> Result<()> {
//!         stream.next(&mut self.x)?;
//!         stream.next(&mut self.y)
//!     }
//!
//!     fn fields_length(&self, stream: &mut LStream) {
//!         stream.next(&self.x);
//!         stream.next(&self.y);
//!     }
//! }
//!
//! ros_z_ser::impl_message_serializer!(Point, FixedElementwise);
//!
//! let bytes = ros_z_ser::to_vec(&vec![Point { x: 1.0, y: 2.0 }]).unwrap();
//! assert_eq!(bytes.len(), 4 + 16);
//! ```

use crate::error::Result;
use crate::stream::{IStream, LStream, OStream, Stream};

/// Field-level behavior of a composite record.
pub trait Message {
    /// Serialize every field, in declaration order.
    fn write_fields(&self, stream: &mut OStream<'_>) -> Result<()>;

    /// Deserialize every field, in the same order.
    fn read_fields(&mut self, stream: &mut IStream<'_>) -> Result<()>;

    /// Add the serialized length of every field.
    fn fields_length(&self, stream: &mut LStream);

    /// Receives the number of bytes the last read consumed.
    fn set_serialized_length(&mut self, _len: usize) {}
}

/// Write hook: the record serializes itself.
#[inline]
pub fn write_message<M: Message>(message: &M, stream: &mut OStream<'_>) -> Result<()> {
    message.write_fields(stream)
}

/// Read hook: the record deserializes itself, then learns how many bytes
/// it took.
#[inline]
pub fn read_message<M: Message>(message: &mut M, stream: &mut IStream<'_>) -> Result<()> {
    let start = stream.position();
    message.read_fields(stream)?;
    message.set_serialized_length(stream.position() - start);
    Ok(())
}

/// Length hook: the record reports its own serialized length.
#[inline]
pub fn message_length<M: Message>(message: &M, stream: &mut LStream) {
    message.fields_length(stream)
}

/// Implement [`Serializer`](crate::Serializer) for a [`Message`] type
/// through the structured-type hook.
///
/// The optional second argument names the strategy type from
/// [`crate::strategy`] (`VariableElementwise` when omitted). Claim
/// `FixedElementwise` only if every value of the type has the same
/// serialized length.
#[macro_export]
macro_rules! impl_message_serializer {
    ($ty:ty) => {
        $crate::impl_message_serializer!($ty, VariableElementwise);
    };
    ($ty:ty, $strategy:ident) => {
        impl $crate::Serializer for $ty {
            type Strategy = $crate::strategy::$strategy;

            #[inline]
            fn write(&self, stream: &mut $crate::OStream<'_>) -> $crate::Result<()> {
                $crate::message::write_message(self, stream)
            }

            #[inline]
            fn read(&mut self, stream: &mut $crate::IStream<'_>) -> $crate::Result<()> {
                $crate::message::read_message(self, stream)
            }

            #[inline]
            fn serialized_length(&self, stream: &mut $crate::LStream) {
                $crate::message::message_length(self, stream)
            }
        }
    };
}
