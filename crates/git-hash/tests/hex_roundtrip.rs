use git_hash::hex::{hex_decode, hex_encode, hex_to_bytes, hex_to_string, is_valid_hex};
use git_hash::{HashAlgorithm, ObjectId};
use proptest::prelude::*;

proptest! {
    #[test]
    fn string_roundtrip_recovers_the_original_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let hex = hex_to_string(&bytes);
        prop_assert_eq!(hex_to_bytes(&hex).unwrap(), bytes);
    }

    #[test]
    fn encoded_output_is_always_lowercase(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let hex = hex_to_string(&bytes);
        prop_assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn encoded_length_is_always_double_the_input(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(hex_to_string(&bytes).len(), bytes.len() * 2);
    }

    #[test]
    fn buffer_encode_and_decode_agree_with_the_string_api(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let mut encoded = vec![0u8; bytes.len() * 2];
        hex_encode(&bytes, &mut encoded);

        let mut decoded = vec![0u8; bytes.len()];
        hex_decode(std::str::from_utf8(&encoded).unwrap(), &mut decoded).unwrap();

        prop_assert_eq!(&decoded, &bytes);
    }

    #[test]
    fn every_string_this_module_produces_is_accepted_as_valid(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert!(is_valid_hex(&hex_to_string(&bytes)));
    }

    #[test]
    fn sha1_object_ids_survive_a_display_and_parse_cycle(bytes in proptest::collection::vec(any::<u8>(), 20..=20)) {
        let oid = ObjectId::from_bytes(&bytes, HashAlgorithm::Sha1).unwrap();
        let parsed: ObjectId = oid.to_hex().parse().unwrap();
        prop_assert_eq!(oid, parsed);
    }

    #[test]
    fn sha256_object_ids_survive_a_display_and_parse_cycle(bytes in proptest::collection::vec(any::<u8>(), 32..=32)) {
        let oid = ObjectId::from_bytes(&bytes, HashAlgorithm::Sha256).unwrap();
        let parsed: ObjectId = oid.to_hex().parse().unwrap();
        prop_assert_eq!(oid, parsed);
    }
}
