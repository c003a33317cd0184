use super::*;

fn roundtrip<T: InSaveState + Default + PartialEq + core::fmt::Debug + Clone>(value: T) {
    let mut ser = SaveStateSerializer { data: vec![] };
    value.serialize(&mut ser);
    let mut de = SaveStateDeserializer {
        data: ser.data.iter(),
    };
    let mut restored = T::default();
    restored.deserialize(&mut de);
    assert_eq!(value, restored);
    assert!(de.data.as_slice().is_empty());
}

#[test]
fn serialize_ints() {
    for v in [0u8, 1, 0x7f, 0xff] {
        roundtrip(v)
    }
    for v in [0u16, 0x1234, 0xffff] {
        roundtrip(v)
    }
    for v in [0u64, 0x0123_4567_89ab_cdef, u64::MAX] {
        roundtrip(v)
    }
    for v in [i64::MIN, -1, 0, i64::MAX] {
        roundtrip(v)
    }
}

#[test]
fn int_encoding_is_little_endian() {
    let mut ser = SaveStateSerializer { data: vec![] };
    0x1234_5678u32.serialize(&mut ser);
    assert_eq!(ser.data, vec![0x78, 0x56, 0x34, 0x12]);
}

#[test]
fn serialize_bool() {
    roundtrip(true);
    roundtrip(false);
}

#[test]
fn serialize_array() {
    let mut arr = [0u16; 128];
    for (i, v) in arr.iter_mut().enumerate() {
        *v = (i as u16).wrapping_mul(0x1337)
    }
    roundtrip(arr);
}

#[test]
fn serialize_vec_of_words() {
    roundtrip(vec![0x1234u16, 0x5678, 0x9abc]);
    roundtrip(Vec::<u16>::new());
}

#[test]
fn serialize_option() {
    roundtrip(Some(0xdeadu16));
    roundtrip(Option::<u16>::None);
}

#[test]
#[should_panic(expected = "not enough data")]
fn deserialize_short_input_panics() {
    let data = [0u8; 3];
    let mut de = SaveStateDeserializer { data: data.iter() };
    let mut v: u64 = 0;
    v.deserialize(&mut de);
}
