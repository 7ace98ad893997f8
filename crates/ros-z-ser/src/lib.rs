//! Length-prefixed message serialization for ROS-Z.
//!
//! This crate converts typed, possibly nested records into flat byte buffers
//! and back, using the ROS 1 wire format: scalars in native byte order,
//! strings and dynamic sequences behind a 4-byte length, whole messages
//! behind a 4-byte payload length.
//!
//! # Architecture
//!
//! 1. **Streams** (`IStream`, `OStream`, `LStream`): bounds-checked cursors
//!    for reading, writing, and length counting. Every traversal of a value
//!    runs the same code path over one of the three.
//!
//! 2. **Serializer trait**: the per-type customization point, implemented
//!    here for scalars, `bool`, `String`, `Time`, `Duration`, `Vec<T>` and
//!    `[T; N]`.
//!
//! 3. **Strategies**: each `Serializer` names how runs of it are encoded.
//!    Sequences of simple types are moved with one bulk copy; everything
//!    else goes element by element.
//!
//! 4. **Message hook**: records implement `Message` (by hand, or with
//!    `#[derive(Message)]`) and take part in the codec without it knowing
//!    their shape.
//!
//! 5. **Framing**: `serialize_message`, `serialize_service_response` and
//!    `deserialize_message` wrap a value in its length prefix.

pub mod error;
pub mod message;
pub mod primitives;
pub mod sequence;
pub mod serialized_message;
pub mod serializer;
pub mod strategy;
pub mod stream;
pub mod time;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use message::Message;
pub use serialized_message::{
    SerializedMessage, deserialize_message, message_from, serialize_message,
    serialize_service_response,
};
pub use serializer::{
    Serializer, deserialize, from_bytes, from_bytes_into, serialization_length, serialize, to_vec,
};
pub use strategy::{StrategyKind, is_fixed_size, is_simple};
pub use stream::{IStream, LStream, OStream, Stream, StreamType};
pub use time::{Duration, Time};

#[cfg(feature = "derive")]
pub use ros_z_ser_derive::Message;

/// Native endian type alias for the current platform.
///
/// Scalars are written in host byte order so that single-value writes and
/// bulk copies of the same values produce identical bytes.
#[cfg(target_endian = "little")]
pub type NativeEndian = byteorder::LittleEndian;

#[cfg(target_endian = "big")]
pub type NativeEndian = byteorder::BigEndian;
