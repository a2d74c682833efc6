#[cfg(test)]
mod qr_tests {
    use qrforge::*;
    use test_case::test_case;

    fn grid_str(qr: &QR) -> Vec<String> {
        let w = qr.width() as i32;
        (0..w)
            .map(|y| (0..w).map(|x| if qr.get_module(x, y) { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_hello_world_1l() {
        let qr = encode(Version::new(1).unwrap(), ECLevel::L, b"HELLO WORLD").unwrap();
        let exp = [
            "#######...#.#.#######",
            "#.....#.#.#.#.#.....#",
            "#.###.#.#.##..#.###.#",
            "#.###.#.....#.#.###.#",
            "#.###.#.#####.#.###.#",
            "#.....#.###...#.....#",
            "#######.#.#.#.#######",
            "........#............",
            "##.#..##..###.###.##.",
            "###.##..#.##....#...#",
            "#.#...#..#.#.##..#.#.",
            "#.####.###..####..###",
            "...#####.###..###.#.#",
            "........#....##.#.###",
            "#######.#..##.##..#.#",
            "#.....#...#...##.#...",
            "#.###.#..##.####.##.#",
            "#.###.#.#.#..###.#.##",
            "#.###.#...##.###.#..#",
            "#.....#.#.###...##..#",
            "#######.#.#..#.#.#...",
        ];
        assert_eq!(grid_str(&qr), exp);
        assert_eq!(qr.mode(), Mode::Alphanumeric);
        assert_eq!(*qr.mask(), 7);
        assert_eq!(qr.count_dark_modules(), 234);
    }

    #[test]
    fn test_hello_world_2q_byte() {
        let qr = encode(Version::new(2).unwrap(), ECLevel::Q, b"hello, world").unwrap();
        let exp = [
            "#######.###....##.#######",
            "#.....#..#..#.....#.....#",
            "#.###.#...##..#.#.#.###.#",
            "#.###.#....##...#.#.###.#",
            "#.###.#.#....###..#.###.#",
            "#.....#.#....####.#.....#",
            "#######.#.#.#.#.#.#######",
            "...........#.#.#.........",
            ".#######...#..##...##...#",
            "####.#.........###.#..#..",
            "#....##.#.###.....####.##",
            "....#..#.#.#..#.#..##..##",
            "#.#######...#...###.#####",
            "######.#.#######...#..#..",
            "#.#.#.##.#########.###.##",
            "#.###.......#.##..##....#",
            "#....##...#...#########..",
            "........##....###...#.#..",
            "#######.#.##..###.#.#.###",
            "#.....#.#######.#...##..#",
            "#.###.#.#...##..########.",
            "#.###.#.#####..######.#.#",
            "#.###.#.###.....#..#.#..#",
            "#.....#.#####.##.##..#..#",
            "#######..##.#.##..#..####",
        ];
        assert_eq!(grid_str(&qr), exp);
        assert_eq!(qr.mode(), Mode::Byte);
        assert_eq!(*qr.mask(), 2);
    }

    #[test_case(b"HELLO WORLD", ECLevel::M, 1, Mode::Alphanumeric, 0, 222)]
    #[test_case(b"01234567", ECLevel::M, 1, Mode::Numeric, 0, 220)]
    fn test_auto_version(data: &[u8], ecl: ECLevel, ver: usize, mode: Mode, mask: u8, dark: usize) {
        let qr = QRBuilder::new(data).ec_level(ecl).build().unwrap();
        assert_eq!(*qr.version(), ver);
        assert_eq!(qr.mode(), mode);
        assert_eq!(*qr.mask(), mask);
        assert_eq!(qr.count_dark_modules(), dark);
    }

    #[test]
    fn test_version_info_7() {
        let data = "1234567890".repeat(10);
        let qr = encode(Version::new(7).unwrap(), ECLevel::M, data.as_bytes()).unwrap();
        assert_eq!(*qr.mask(), 0);
        assert_eq!(qr.count_dark_modules(), 1058);

        // 0x07C94, least significant bit first
        let exp = [0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 0];
        let w = qr.width() as i32;
        for (i, &b) in exp.iter().enumerate() {
            let (near, far) = (i as i32 / 3, w - 11 + i as i32 % 3);
            assert_eq!(qr.get_module(near, far), b == 1, "Bottom left bit {i}");
            assert_eq!(qr.get_module(far, near), b == 1, "Top right bit {i}");
        }
    }

    // Last fitting length and first overflowing one
    #[test_case(1, ECLevel::M, '7', 34)]
    #[test_case(2, ECLevel::L, 'A', 47)]
    #[test_case(1, ECLevel::L, 'a', 17)]
    #[test_case(40, ECLevel::L, 'a', 2953)]
    #[test_case(40, ECLevel::H, '7', 3057)]
    fn test_capacity_boundary(ver: usize, ecl: ECLevel, ch: char, max_len: usize) {
        let ver = Version::new(ver).unwrap();
        let fits = ch.to_string().repeat(max_len);
        assert!(encode(ver, ecl, fits.as_bytes()).is_ok());
        let overflow = ch.to_string().repeat(max_len + 1);
        assert_eq!(encode(ver, ecl, overflow.as_bytes()), Err(QRError::DataTooLong));
    }

    #[test]
    fn test_every_version_and_level() {
        for ver in (1..=40).map(|v| Version::new(v).unwrap()) {
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let qr = encode(ver, ecl, b"Qr1").unwrap();
                assert_eq!(qr.width(), *ver * 4 + 17);
                assert_eq!(qr.modules().as_bytes().len(), required_grid_bytes(ver));
                assert_eq!(qr.mode(), Mode::Byte);
            }
        }
    }

    // Stepped alignment centres run down close to the origin in these versions
    #[test_case(36, 161)]
    #[test_case(39, 173)]
    fn test_tight_alignment_versions(ver: usize, width: usize) {
        for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            let qr = encode(Version::new(ver).unwrap(), ecl, b"hi").unwrap();
            assert_eq!(qr.width(), width);
            // Alignment pattern centred on the horizontal timing row, nearest the origin
            let c = if ver == 36 { 24 } else { 26 };
            for dy in -2..=2i32 {
                for dx in -2..=2i32 {
                    let ring = dx.abs().max(dy.abs()) == 1;
                    assert_eq!(qr.get_module(c + dx, 6 + dy), !ring, "({dx}, {dy})");
                }
            }
        }
    }

    #[test_case(1, 56)]
    #[test_case(2, 79)]
    #[test_case(7, 254)]
    #[test_case(40, 3917)]
    fn test_required_grid_bytes(ver: usize, exp: usize) {
        assert_eq!(required_grid_bytes(Version::new(ver).unwrap()), exp);
    }

    #[test]
    fn test_get_module_out_of_range() {
        let qr = encode(Version::new(1).unwrap(), ECLevel::L, b"HELLO WORLD").unwrap();
        // Finder corner is dark, surroundings read as quiet zone
        assert!(qr.get_module(0, 0));
        assert!(!qr.get_module(-1, 0));
        assert!(!qr.get_module(0, -1));
        assert!(!qr.get_module(21, 0));
        assert!(!qr.get_module(0, 21));
        assert!(!qr.get_module(i32::MIN, i32::MAX));
    }

    #[test]
    fn test_invalid_params() {
        assert_eq!(Version::new(0), Err(QRError::InvalidVersion));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion));
        assert_eq!(ECLevel::try_from(4u8), Err(QRError::InvalidECLevel));
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            QRError::DataTooLong.to_string(),
            "Data too long for the chosen version and error correction level"
        );
    }

    #[test]
    fn test_encoded_bit_len() {
        let ver = Version::new(1).unwrap();
        assert_eq!(encoded_bit_len(b"HELLO WORLD", ver), (Mode::Alphanumeric, 74));
        assert_eq!(encoded_bit_len(b"", ver), (Mode::Numeric, 14));
    }
}

#[cfg(test)]
mod qr_proptests {
    use proptest::prelude::*;
    use qrforge::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn proptest_auto_version_is_minimal(
            data in prop::collection::vec(any::<u8>(), 0..200),
            ecl in ec_level_strategy(),
        ) {
            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            let ver = qr.version();
            if *ver > 1 {
                let smaller = Version::new(*ver - 1).unwrap();
                prop_assert_eq!(encode(smaller, ecl, &data), Err(QRError::DataTooLong));
            }
            prop_assert_eq!(encode(ver, ecl, &data).unwrap(), qr);
        }

        #[test]
        fn proptest_numeric_mode(data in "[0-9]{1,300}", ecl in ec_level_strategy()) {
            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            prop_assert_eq!(qr.mode(), Mode::Numeric);
        }

        #[test]
        fn proptest_alphanumeric_mode(data in r"[0-9A-Z $%*+\-./:]{0,300}[A-Z $%*+\-./:]", ecl in ec_level_strategy()) {
            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            prop_assert_eq!(qr.mode(), Mode::Alphanumeric);
        }
    }
}

#[cfg(test)]
mod qr_concurrency_tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rayon::prelude::*;

    use qrforge::*;

    #[test]
    fn test_parallel_encoding_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(42);
        let inputs = (0..64)
            .map(|_| {
                let len = rng.random_range(0..500);
                (0..len).map(|_| rng.random::<u8>()).collect::<Vec<u8>>()
            })
            .collect::<Vec<_>>();

        let seq = inputs
            .iter()
            .map(|d| QRBuilder::new(d).ec_level(ECLevel::Q).build().unwrap())
            .collect::<Vec<_>>();
        let par = inputs
            .par_iter()
            .map(|d| QRBuilder::new(d).ec_level(ECLevel::Q).build().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(seq, par);
    }
}
