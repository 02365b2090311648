//! Unit-level tests run against the public library API.

mod cli_parse_tests;
mod config_tests;
mod page_range_tests;
mod validator_tests;
