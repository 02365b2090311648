use skillsmith::SmithError;
use skillsmith::pdf::{PageSpec, PageToken, parse_page_range};
use skillsmith::test_utils::{TestCase, run_table_tests};

#[test]
fn resolves_selections_against_document_length() -> Result<(), String> {
    let cases = vec![
        TestCase::new("all", ("all", 3), vec![0, 1, 2]),
        TestCase::new("all on empty document", ("all", 0), vec![]),
        TestCase::new("single", ("2", 5), vec![1]),
        TestCase::new("range", ("2-4", 5), vec![1, 2, 3]),
        TestCase::new("mixed", ("1-3,5", 10), vec![0, 1, 2, 4]),
        TestCase::new("duplicates collapse", ("3,3,2-3", 5), vec![1, 2]),
        TestCase::new("unordered input sorts", ("5,1", 5), vec![0, 4]),
        TestCase::new("past the end dropped", ("4,9", 5), vec![3]),
        TestCase::new("page zero dropped", ("0", 5), vec![]),
        TestCase::new("range clipped", ("4-8", 5), vec![3, 4]),
        TestCase::new("whitespace tolerated", (" 1 , 2 - 3 ", 5), vec![0, 1, 2]),
    ];

    run_table_tests(cases, |(spec, total)| parse_page_range(spec, total).unwrap())
}

#[test]
fn rejects_malformed_specs() {
    for spec in ["x", "1;2", "1,", "3-1", "1-2-3", "--", "one-two"] {
        let err = parse_page_range(spec, 10).unwrap_err();
        assert!(
            matches!(err, SmithError::PageRange(_)),
            "{spec:?} gave {err:?}"
        );
        assert_eq!(err.code(), "page_range");
    }
}

#[test]
fn parses_into_tokens() {
    let spec: PageSpec = "7,2-4".parse().unwrap();
    assert_eq!(
        spec,
        PageSpec::Selection(vec![PageToken::Single(7), PageToken::Range(2, 4)])
    );
    assert_eq!(spec.resolve(6), vec![1, 2, 3]);
}
