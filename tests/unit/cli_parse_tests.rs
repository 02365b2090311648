use std::path::PathBuf;

use clap::Parser;

use skillsmith::app::AppContext;
use skillsmith::cli::{Cli, Commands, OutputFormat};
use skillsmith::config::Config;
use skillsmith::pdf::{PageSpec, PageToken};

fn parse(args: &[&str]) -> Commands {
    let mut argv = vec!["skillsmith"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv).command
}

fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
    let mut argv = vec!["skillsmith"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
}

#[test]
fn parse_init_minimal() {
    match parse(&["init", "my-skill", "--path", "skills", "--minimal"]) {
        Commands::Init(args) => {
            assert_eq!(args.name, "my-skill");
            assert_eq!(args.path, PathBuf::from("skills"));
            assert!(args.minimal);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_validate_flags() {
    match parse(&["validate", "skills/x", "--comprehensive", "--strict"]) {
        Commands::Validate(args) => {
            assert_eq!(args.path, Some(PathBuf::from("skills/x")));
            assert!(args.comprehensive);
            assert!(args.strict);
            assert!(!args.list_rules);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn validate_needs_path_unless_listing() {
    assert!(try_parse(&["validate"]).is_err());
    assert!(try_parse(&["validate", "--list-rules"]).is_ok());
}

#[test]
fn parse_package_default_output() {
    match parse(&["package", "skills/x"]) {
        Commands::Package(args) => {
            assert_eq!(args.path, PathBuf::from("skills/x"));
            assert!(args.output_dir.is_none());
            assert!(!args.comprehensive);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_rotate_pages() {
    match parse(&["rotate", "in.pdf", "out.pdf", "180", "--pages", "1-2,4"]) {
        Commands::Rotate(args) => {
            assert_eq!(args.angle, 180);
            assert_eq!(
                args.pages,
                PageSpec::Selection(vec![PageToken::Range(1, 2), PageToken::Single(4)])
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rotate_pages_default_to_all() {
    match parse(&["rotate", "in.pdf", "out.pdf", "90"]) {
        Commands::Rotate(args) => assert!(args.pages.is_all()),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn negative_angle_reaches_the_handler() {
    match parse(&["rotate", "in.pdf", "out.pdf", "-90"]) {
        Commands::Rotate(args) => assert_eq!(args.angle, -90),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn bad_page_spec_is_a_parse_error() {
    assert!(try_parse(&["split", "in.pdf", "out", "--pages", "4-2"]).is_err());
}

#[test]
fn merge_requires_two_inputs() {
    assert!(try_parse(&["merge", "out.pdf", "a.pdf"]).is_err());
    match parse(&["merge", "out.pdf", "a.pdf", "b.pdf", "c.pdf"]) {
        Commands::Merge(args) => {
            assert_eq!(args.output, PathBuf::from("out.pdf"));
            assert_eq!(args.inputs.len(), 3);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn format_flags_override_config() {
    let mut config = Config::default();
    config.output.format = OutputFormat::Json;

    let plain = try_parse(&["validate", "x"]).unwrap();
    assert_eq!(AppContext::resolve_format(&plain, Some(&config)), OutputFormat::Json);

    let human = try_parse(&["--format", "human", "validate", "x"]).unwrap();
    assert_eq!(AppContext::resolve_format(&human, Some(&config)), OutputFormat::Human);

    let robot = try_parse(&["--robot", "validate", "x"]).unwrap();
    assert_eq!(AppContext::resolve_format(&robot, None), OutputFormat::Json);
}
