//! Integration tests for `#[derive(Message)]`
#![cfg(feature = "derive")]

use bytemuck::{Pod, Zeroable};
use ros_z_ser::strategy::SequenceStrategy;
use ros_z_ser::{
    Message, Serializer, StrategyKind, Time, from_bytes, from_bytes_into, is_fixed_size,
    is_simple, message_from, serialization_length, serialize_message, to_vec,
};

fn kind<T: Serializer>() -> StrategyKind {
    <T::Strategy as SequenceStrategy<T>>::KIND
}

// ============================================================================
// Record types
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq, Message)]
struct Header {
    seq: u32,
    stamp: Time,
    frame_id: String,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable, Message)]
#[ros(simple)]
struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Message)]
#[ros(fixed_size)]
struct Status {
    code: u16,
    active: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Message)]
struct Pair(u16, String);

#[derive(Debug, Default, Clone, PartialEq, Message)]
struct Empty;

#[derive(Debug, Default, Clone, PartialEq, Message)]
struct Stamped<T> {
    header: Header,
    data: T,
}

#[derive(Debug, Default, Clone, PartialEq, Message)]
struct Path {
    header: Header,
    poses: Vec<Vector3>,
    corners: [Status; 2],
    #[ros(skip)]
    cached_len: Option<f64>,
    #[ros(serialized_length)]
    wire_size: usize,
}

fn header(frame_id: &str) -> Header {
    Header {
        seq: 42,
        stamp: Time::new(1_700_000_000, 250),
        frame_id: frame_id.to_string(),
    }
}

// ============================================================================
// Field order and layout
// ============================================================================

#[test]
fn test_named_fields_in_declaration_order() {
    let bytes = to_vec(&header("base")).unwrap();
    assert_eq!(bytes.len(), 4 + 8 + 4 + 4);
    assert_eq!(&bytes[0..4], 42u32.to_ne_bytes());
    assert_eq!(&bytes[4..8], 1_700_000_000i32.to_ne_bytes());
    assert_eq!(&bytes[8..12], 250i32.to_ne_bytes());
    assert_eq!(&bytes[12..16], 4u32.to_ne_bytes());
    assert_eq!(&bytes[16..], b"base");
}

#[test]
fn test_tuple_struct() {
    let pair = Pair(9, "x".to_string());
    let bytes = to_vec(&pair).unwrap();
    assert_eq!(bytes.len(), 2 + 4 + 1);
    assert_eq!(&bytes[..2], 9u16.to_ne_bytes());

    let (back, _) = from_bytes::<Pair>(&bytes).unwrap();
    assert_eq!(back, pair);
}

#[test]
fn test_unit_struct_is_empty() {
    assert_eq!(serialization_length(&Empty), 0);
    assert!(to_vec(&Empty).unwrap().is_empty());
    let (_, consumed) = from_bytes::<Empty>(&[]).unwrap();
    assert_eq!(consumed, 0);
}

// ============================================================================
// Classification attributes
// ============================================================================

#[test]
fn test_container_attributes_pick_strategy() {
    assert_eq!(kind::<Header>(), StrategyKind::VariableElementwise);
    assert_eq!(kind::<Vector3>(), StrategyKind::BulkCopy);
    assert_eq!(kind::<Status>(), StrategyKind::FixedElementwise);
    assert!(is_simple::<[Vector3; 4]>());
    assert!(is_fixed_size::<[Status; 4]>());
    assert!(!is_fixed_size::<Path>());
}

#[test]
fn test_simple_record_bulk_copy_matches_fields() {
    let poses = vec![
        Vector3 {
            x: 1.0,
            y: 2.0,
            z: 3.0,
        },
        Vector3 {
            x: -1.5,
            y: 0.0,
            z: 1e10,
        },
    ];
    let bytes = to_vec(&poses).unwrap();
    assert_eq!(bytes.len(), 4 + 2 * 24);
    assert_eq!(&bytes[4..12], 1.0f64.to_ne_bytes());
    assert_eq!(&bytes[28..36], (-1.5f64).to_ne_bytes());

    // Same bytes as encoding each record field by field
    let mut each = 2u32.to_ne_bytes().to_vec();
    for pose in &poses {
        each.extend(to_vec(pose).unwrap());
    }
    assert_eq!(bytes, each);

    let (back, _) = from_bytes::<Vec<Vector3>>(&bytes).unwrap();
    assert_eq!(back, poses);
}

#[test]
fn test_fixed_size_record_length() {
    let statuses = vec![Status::default(); 5];
    assert_eq!(serialization_length(&statuses), 4 + 5 * 3);
}

// ============================================================================
// Field attributes
// ============================================================================

#[test]
fn test_skip_and_serialized_length_are_not_on_the_wire() {
    let path = Path {
        header: header("map"),
        poses: vec![Vector3::default(); 3],
        corners: [
            Status {
                code: 1,
                active: true,
            },
            Status::default(),
        ],
        cached_len: Some(12.5),
        wire_size: 999,
    };

    let bytes = to_vec(&path).unwrap();
    let expected = serialization_length(&path.header) + 4 + 3 * 24 + 2 * 3;
    assert_eq!(bytes.len(), expected);

    let mut back = Path {
        cached_len: Some(-1.0),
        ..Default::default()
    };
    let consumed = from_bytes_into(&bytes, &mut back).unwrap();

    assert_eq!(consumed, bytes.len());
    assert_eq!(back.wire_size, bytes.len());
    // Skipped fields keep whatever they held
    assert_eq!(back.cached_len, Some(-1.0));
    assert_eq!(back.header, path.header);
    assert_eq!(back.poses, path.poses);
    assert_eq!(back.corners, path.corners);
}

// ============================================================================
// Generics and nesting
// ============================================================================

#[test]
fn test_generic_record() {
    let stamped = Stamped {
        header: header("imu"),
        data: vec![0.5f32, 0.25],
    };
    let bytes = to_vec(&stamped).unwrap();
    assert_eq!(bytes.len(), 19 + 4 + 8);

    let (back, _) = from_bytes::<Stamped<Vec<f32>>>(&bytes).unwrap();
    assert_eq!(back, stamped);
}

#[test]
fn test_nested_records_in_sequences_and_arrays() {
    let items = vec![
        Stamped {
            header: header("a"),
            data: Pair(1, "one".to_string()),
        },
        Stamped {
            header: header("bb"),
            data: Pair(2, String::new()),
        },
    ];
    let grid: [[Status; 2]; 2] = Default::default();

    let bytes = to_vec(&items).unwrap();
    assert_eq!(bytes.len(), serialization_length(&items));
    let (back, _) = from_bytes::<Vec<Stamped<Pair>>>(&bytes).unwrap();
    assert_eq!(back, items);

    assert_eq!(to_vec(&grid).unwrap().len(), 4 * 3);
}

#[test]
fn test_derived_message_framing() {
    let path = Path {
        header: header("odom"),
        poses: vec![Vector3 {
            x: 4.0,
            y: 5.0,
            z: 6.0,
        }],
        ..Default::default()
    };
    let framed = serialize_message(&path).unwrap();
    let back: Path = message_from(&framed, true).unwrap();

    assert_eq!(back.wire_size, framed.num_bytes() - 4);
    assert_eq!(back.poses, path.poses);
}
