//! Shared test utilities for skillsmith.

pub mod fixtures;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

impl<I, E> TestCase<I, E> {
    pub const fn new(name: &'static str, input: I, expected: E) -> Self {
        Self {
            name,
            input,
            expected,
        }
    }
}

/// Run every case and report all mismatches at once.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    let mut failures = Vec::new();
    let total = cases.len();

    for case in cases {
        println!("[TEST] {}: {:?}", case.name, case.input);
        let actual = test_fn(case.input);
        if actual == case.expected {
            println!("[TEST] PASSED: {}", case.name);
        } else {
            println!("[TEST] FAILED: {}", case.name);
            failures.push(format!(
                "{}: expected {:?}, got {:?}",
                case.name, case.expected, actual
            ));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} of {total} case(s) failed:\n{}",
            failures.len(),
            failures.join("\n")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_failure() {
        let cases = vec![
            TestCase::new("ok", 2, 4),
            TestCase::new("bad-one", 3, 7),
            TestCase::new("bad-two", 4, 9),
        ];
        let err = run_table_tests(cases, |n| n * 2).unwrap_err();
        assert!(err.starts_with("2 of 3 case(s) failed"));
        assert!(err.contains("bad-one"));
        assert!(err.contains("bad-two"));
    }
}
