// Property tests: codec bound and block slicing

use blockpress::{BlockCodec, Config, ScratchBuffers, ZstdCodec, compress_block, compress_file_in_chunks};
use proptest::prelude::*;
use std::fs;

proptest! {
    #[test]
    fn bound_is_never_below_input_size(size in 0usize..(16 << 20)) {
        prop_assert!(ZstdCodec.compress_bound(size) >= size);
    }

    #[test]
    fn destination_covers_bound_after_every_block(
        sizes in proptest::collection::vec(0usize..20_000, 1..8),
    ) {
        let cfg = Config::default();
        let mut dst = Vec::new();
        let mut high_water = 0;
        for size in sizes {
            let src = vec![0xA5u8; size];
            let n = compress_block(&ZstdCodec, &src, &cfg, &mut dst).unwrap();
            high_water = high_water.max(ZstdCodec.compress_bound(size));
            prop_assert!(dst.len() >= ZstdCodec.compress_bound(size));
            prop_assert_eq!(dst.len(), high_water);
            prop_assert!(n <= dst.len());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn chunk_count_is_ceil_of_size_over_block(len in 0usize..5000, block in 1usize..700) {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("input.bin");
        let data: Vec<u8> = (0..len).map(|i| (i % 97) as u8).collect();
        fs::write(&input, &data).unwrap();

        let cfg = Config::default().with_block_size(block).with_persist_chunks(false);
        let report =
            compress_file_in_chunks(&input, tmp.path(), &cfg, &mut ScratchBuffers::default()).unwrap();

        prop_assert_eq!(report.chunk_count(), len.div_ceil(block));
        prop_assert!(report.chunks.iter().all(|c| c.bytes_in > 0 && c.bytes_in <= block));
        for (i, chunk) in report.chunks.iter().enumerate() {
            prop_assert_eq!(chunk.index, i);
        }
        prop_assert_eq!(report.bytes_in(), len);
    }
}
