use proptest::prelude::*;

use skillsmith::lint::SkillValidator;
use skillsmith::skill::SkillDocument;

proptest! {
    #[test]
    fn test_parse_never_panics(input in ".*") {
        let doc = SkillDocument::parse(&input);
        let _ = doc.headings();
        let _ = doc.prose_lines();
    }

    #[test]
    fn test_parse_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..1000)) {
        let input = String::from_utf8_lossy(&bytes);
        let _ = SkillDocument::parse(&input);
    }

    #[test]
    fn test_validation_is_deterministic(body in "[a-zA-Z#\\-\\[\\] \n]{0,200}") {
        let text = format!(
            "---\nname: demo\ndescription: Use when testing.\nmetadata:\n  version: 1.0.0\n  changelog: demo/CHANGELOG.md\n---\n{body}"
        );
        let doc = SkillDocument::parse(&text);
        let validator = SkillValidator::default();
        let first = validator.validate_document(&doc, None, true);
        let second = validator.validate_document(&doc, None, true);
        prop_assert_eq!(first.valid, second.valid);
        prop_assert_eq!(first.report, second.report);
    }
}
