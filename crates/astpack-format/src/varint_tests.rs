use crate::{MAX_VAR_U32_LEN, decode_var_u32, encode_var_u32, var_u32_len};

fn encode(value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    encode_var_u32(value, &mut out);
    out
}

#[test]
fn known_encodings() {
    assert_eq!(encode(0), [0x00]);
    assert_eq!(encode(1), [0x01]);
    assert_eq!(encode(127), [0x7f]);
    assert_eq!(encode(128), [0x80, 0x01]);
    assert_eq!(encode(300), [0xac, 0x02]);
    assert_eq!(encode(16_383), [0xff, 0x7f]);
    assert_eq!(encode(16_384), [0x80, 0x80, 0x01]);
    assert_eq!(encode(u32::MAX), [0xff, 0xff, 0xff, 0xff, 0x0f]);
}

#[test]
fn length_is_ceil_bitlength_over_seven() {
    let cases = [
        (0u32, 1usize),
        (127, 1),
        (128, 2),
        ((1 << 14) - 1, 2),
        (1 << 14, 3),
        ((1 << 21) - 1, 3),
        (1 << 21, 4),
        ((1 << 28) - 1, 4),
        (1 << 28, 5),
        (u32::MAX, 5),
    ];
    for (value, len) in cases {
        assert_eq!(var_u32_len(value), len, "value {value}");
        assert_eq!(encode(value).len(), len, "value {value}");
    }
}

#[test]
fn roundtrip_boundaries_and_sweep() {
    let mut values: Vec<u32> = vec![0, 1, u32::MAX, u32::MAX - 1];
    for shift in 0..32 {
        let p = 1u32 << shift;
        values.extend([p - 1, p, p.wrapping_add(1)]);
    }
    // Deterministic pseudo-random sweep.
    let mut x: u32 = 0x9e37_79b9;
    for _ in 0..10_000 {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        values.push(x);
    }

    for value in values {
        let bytes = encode(value);
        assert_eq!(decode_var_u32(&bytes), Some((value, bytes.len())), "value {value}");
    }
}

#[test]
fn decode_ignores_trailing_bytes() {
    assert_eq!(decode_var_u32(&[0xac, 0x02, 0xff]), Some((300, 2)));
}

#[test]
fn decode_rejects_truncated_input() {
    assert_eq!(decode_var_u32(&[]), None);
    assert_eq!(decode_var_u32(&[0x80]), None);
    assert_eq!(decode_var_u32(&[0xff, 0xff]), None);
}

#[test]
fn decode_rejects_overflow() {
    assert_eq!(decode_var_u32(&[0xff, 0xff, 0xff, 0xff, 0x1f]), None);
    assert_eq!(decode_var_u32(&[0x80; MAX_VAR_U32_LEN + 1]), None);
}
