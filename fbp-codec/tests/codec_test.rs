//! End-to-end codec tests.

use fbp_codec::{
    Decoder, DictionaryBuilder, DictionaryDescriptor, DictionaryLayout, DictionaryRegistry,
    Encoder, FbpError, compress, decode, decode_into, decompress, encode, encode_into,
};

/// code 3 = "e", code 4 = "th"
fn the_dict() -> DictionaryDescriptor {
    DictionaryDescriptor::new(b"eth".to_vec(), DictionaryLayout::packed(1, 1))
        .expect("valid dictionary")
}

#[test]
fn test_the_scenario() {
    let dict = the_dict();
    let compressed = encode(&dict, b"the");
    assert_eq!(compressed, [0x04, 0x03, 0x00]);
    assert_eq!(decode(&dict, &compressed).expect("decode failed"), b"the");
}

#[test]
fn test_greedy_match_preference() {
    // 3 = "a", 4 = "ab"
    let dict = DictionaryDescriptor::new(b"aab".to_vec(), DictionaryLayout::packed(1, 1))
        .expect("valid dictionary");
    assert_eq!(encode(&dict, b"ab"), [0x04, 0x00]);
}

#[test]
fn test_literal_framing_boundary() {
    let dict = the_dict();
    assert_eq!(encode(&dict, b"q"), [0x02, b'q', 0x00]);
    assert_eq!(encode(&dict, b"qz"), [0x01, 0x02, b'q', b'z', 0x00]);
}

#[test]
fn test_capacity_zero_writes_nothing() {
    let dict = DictionaryDescriptor::builtin();
    let mut dst: [u8; 0] = [];
    let err = encode_into(dict, &mut dst, b"anything at all").unwrap_err();
    assert!(matches!(err, FbpError::CapacityExhausted { written: 0, .. }));
}

#[test]
fn test_empty_input() {
    let dict = DictionaryDescriptor::builtin();
    let mut packed = [0xAAu8; 8];
    assert_eq!(encode_into(dict, &mut packed, b"").expect("encode failed"), 1);
    assert_eq!(packed[0], 0x00);

    let mut text = [0xAAu8; 8];
    assert_eq!(decode_into(dict, &mut text, &[0x00]).expect("decode failed"), 1);
    assert_eq!(text[0], 0x00);
}

#[test]
fn test_roundtrip_string_table() {
    let lines: [&[u8]; 6] = [
        b"Battery low",
        b"Connecting to network...",
        b"Error: sensor #3 not responding (code 0x1F)",
        b"Press OK to continue",
        b"Temperature: 23.5 C",
        b"\xC3\xA9t\xC3\xA9 ~ {unicode & tildes}",
    ];
    for line in lines {
        let compressed = compress(line);
        assert_eq!(decompress(&compressed).expect("decompress failed"), line);
    }
}

#[test]
fn test_truncated_encode_decodes_to_prefix() {
    let dict = DictionaryDescriptor::builtin();
    let text = b"Connecting to network ~~~ please wait";
    let full = encode(dict, text);

    for capacity in 1..full.len() {
        let mut packed = vec![0xAAu8; capacity];
        let err = encode_into(dict, &mut packed, text).unwrap_err();
        let FbpError::CapacityExhausted { written, required } = err else {
            panic!("unexpected error: {err}");
        };
        assert!(written <= capacity);
        assert_eq!(required, full.len());
        assert_eq!(packed[written - 1], 0x00);

        let prefix = decode(dict, &packed[..written]).expect("truncated stream is valid");
        assert!(text.starts_with(&prefix), "capacity {capacity}");
    }

    let mut packed = vec![0u8; full.len()];
    assert_eq!(encode_into(dict, &mut packed, text).expect("fits"), full.len());
    assert_eq!(packed, full);
}

#[test]
fn test_truncated_decode_is_terminated_prefix() {
    let dict = DictionaryDescriptor::builtin();
    let text = b"the other thing";
    let packed = encode(dict, text);

    for capacity in 1..=text.len() {
        let mut out = vec![0xAAu8; capacity];
        let err = decode_into(dict, &mut out, &packed).unwrap_err();
        assert!(matches!(
            err,
            FbpError::CapacityExhausted { written, required }
                if written == capacity && required == text.len() + 1
        ));
        assert_eq!(out[capacity - 1], 0x00);
        assert_eq!(&out[..capacity - 1], &text[..capacity - 1]);
    }
}

#[test]
fn test_malformed_streams_rejected() {
    let dict = the_dict();
    let decoder = Decoder::new(&dict);
    let cases: [&[u8]; 5] = [
        &[0x01, 0x09, b'a', b'b'],
        &[0x01],
        &[0x02],
        &[0x03, 0x04],
        &[0x03, 0xF0, 0x00],
    ];
    for stream in cases {
        assert!(
            matches!(decoder.decode(stream), Err(FbpError::MalformedStream { .. })),
            "{stream:?}"
        );
    }
}

#[test]
fn test_built_dictionary_roundtrip() {
    let corpus = b"# device messages\n\
                   Door open\n\
                   Door closed\n\
                   Door locked\n\
                   Motion detected in hallway\n\
                   Motion cleared\n";
    let dict = DictionaryBuilder::new()
        .add_text(corpus)
        .comment_prefix(Some("#"))
        .build()
        .expect("build failed");

    let encoder = Encoder::new(&dict);
    let decoder = Decoder::new(&dict);
    for line in ["Door open", "Motion detected", "Door unlocked?"] {
        let packed = encoder.encode(line.as_bytes());
        assert_eq!(decoder.decode(&packed).expect("decode failed"), line.as_bytes());
    }

    let packed = encoder.encode(b"Door closed");
    assert!(packed.len() < "Door closed".len());
}

#[test]
fn test_registry_selects_dictionary() {
    let mut registry = DictionaryRegistry::with_builtin();
    registry.register("the", the_dict());

    let custom = registry.get("the").expect("registered");
    assert_eq!(encode(&custom, b"the"), [0x04, 0x03, 0x00]);

    let default = registry.get("").expect("default registered");
    assert_eq!(decode(&default, &compress(b"the")).expect("decode failed"), b"the");
}
