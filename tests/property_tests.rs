use {
    huffman_archive::{archive, compress, decompress, ByteFrequency, CodeTable},
    proptest::{collection::vec, prelude::*},
    quickcheck_macros::quickcheck,
};

#[quickcheck]
fn roundtrip(bytes: Vec<u8>) -> bool {
    compress(&bytes).and_then(|encoded| decompress(&encoded)).ok() == Some(bytes)
}

#[quickcheck]
fn stats_agree_on_both_ends(bytes: Vec<u8>) -> bool {
    let mut encoded = Vec::new();
    let mut restored = Vec::new();
    let packed = archive::compress(&bytes[..], &mut encoded).unwrap();
    let unpacked = archive::decompress(&encoded[..], &mut restored).unwrap();
    packed == unpacked
        && packed.original_size == bytes.len() as u64
        && packed.extra_size + packed.compressed_size == encoded.len() as u64
}

#[quickcheck]
fn truncated_payload_is_rejected(bytes: Vec<u8>) -> bool {
    if bytes.is_empty() {
        return true;
    }
    let encoded = compress(&bytes).unwrap();
    match decompress(&encoded[..encoded.len() - 1]) {
        Err(err) => err.is_format(),
        Ok(_) => false,
    }
}

fn weighted_frequencies() -> impl Strategy<Value = ByteFrequency> {
    vec((any::<u8>(), 1usize..10_000), 1..64).prop_map(|entries| {
        let mut frequency = ByteFrequency::default();
        for (byte, count) in entries {
            frequency[byte] = count;
        }
        frequency
    })
}

proptest! {
    #[test]
    fn codes_are_prefix_free(frequency in weighted_frequencies()) {
        let table = CodeTable::from_frequencies(&frequency);
        prop_assert_eq!(table.len(), frequency.len());
        for (x, a) in table.iter() {
            for (y, b) in table.iter() {
                if x != y {
                    prop_assert!(!a.is_prefix_of(b), "{:?} prefixes {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn more_frequent_bytes_never_get_longer_codes(frequency in weighted_frequencies()) {
        let table = CodeTable::from_frequencies(&frequency);
        for (a, fa) in frequency.iter() {
            for (b, fb) in frequency.iter() {
                if fa > fb {
                    prop_assert!(table.get(a).unwrap().len() <= table.get(b).unwrap().len());
                }
            }
        }
    }

    #[test]
    fn code_lengths_satisfy_kraft_equality(frequency in weighted_frequencies()) {
        // Huffman trees are full, so the code space is used exactly.
        let table = CodeTable::from_frequencies(&frequency);
        if table.len() > 1 {
            let deepest = table.iter().map(|(_, code)| code.len()).max().unwrap();
            let used: u128 = table
                .iter()
                .map(|(_, code)| 1u128 << (deepest - code.len()))
                .sum();
            prop_assert_eq!(used, 1u128 << deepest);
        }
    }

    #[test]
    fn payload_matches_weighted_code_length(bytes in vec(any::<u8>(), 0..2048)) {
        let frequency = ByteFrequency::of(&bytes);
        let table = CodeTable::from_frequencies(&frequency);
        let bits = table.encoded_bits(&frequency) as u64;

        let mut encoded = Vec::new();
        let stats = archive::compress(&bytes[..], &mut encoded).unwrap();
        prop_assert_eq!(stats.compressed_size, (bits + 7) / 8);
    }
}
