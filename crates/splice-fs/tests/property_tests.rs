use proptest::prelude::*;
use splice_fs::{LineEnding, NormalizedPath, RobustnessConfig, io};
use std::time::Duration;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_write_read_is_byte_identical(content in "[a-z{}:, \r\n\t]{0,200}") {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("doc.ts"));
        let config = RobustnessConfig {
            lock_timeout: Duration::from_millis(500),
            enable_fsync: false,
        };

        io::write_document(&path, &content, config).unwrap();
        let read_back = io::read_document(&path).unwrap();

        prop_assert_eq!(read_back, content);
    }

    #[test]
    fn test_apply_to_produces_single_convention(text in "[ab\r\n]{0,50}") {
        let converted = LineEnding::CrLf.apply_to(&text);
        let detected = LineEnding::detect(&converted);
        prop_assert!(detected == LineEnding::CrLf || detected == LineEnding::None);
    }

    #[test]
    fn test_normalized_path_has_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }
}
