//! Property tests: every engine against the bit-at-a-time oracle

use crc32c_fold::software::update_bitwise;
use crc32c_fold::{available_engines, crc32c, crc32c_update, Engine};
use proptest::prelude::*;

fn engines() -> Vec<Engine> {
    available_engines().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn engines_match_bitwise_oracle(
        data in proptest::collection::vec(any::<u8>(), 0..=4096),
        offset in 0usize..8,
        seed in any::<u32>(),
    ) {
        // Copy behind `offset` bytes so the start lands on every alignment
        let mut backing = vec![0u8; offset + data.len()];
        backing[offset..].copy_from_slice(&data);
        let shifted = &backing[offset..];

        let expected = update_bitwise(seed, shifted);
        for engine in engines() {
            prop_assert_eq!(engine.update(seed, shifted), expected, "{}", engine.name());
        }
    }
}

proptest! {
    #[test]
    fn concatenation_is_invariant(
        a in proptest::collection::vec(any::<u8>(), 0..=2500),
        b in proptest::collection::vec(any::<u8>(), 0..=2500),
    ) {
        let mut joined = a.clone();
        joined.extend_from_slice(&b);

        for engine in engines() {
            let split = engine.update(engine.update(0, &a), &b);
            prop_assert_eq!(split, engine.update(0, &joined), "{}", engine.name());
        }
    }

    #[test]
    fn chunked_stream_matches_one_shot(
        data in proptest::collection::vec(any::<u8>(), 0..=4096),
        chunk in 1usize..=1100,
    ) {
        let mut crc = 0;
        for part in data.chunks(chunk) {
            crc = crc32c_update(crc, part);
        }
        prop_assert_eq!(crc, crc32c(&data));
    }

    #[test]
    fn all_engines_agree(data in proptest::collection::vec(any::<u8>(), 0..=3100), seed in any::<u32>()) {
        let results: Vec<u32> = engines().iter().map(|engine| engine.update(seed, &data)).collect();
        prop_assert!(results.windows(2).all(|pair| pair[0] == pair[1]), "{:?}", results);
    }
}
