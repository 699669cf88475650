//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without actually executing the detector (which would require a running
//! emulator process).

use clap::Parser;

// Re-create the Args structure for testing since it's not publicly exported
#[derive(Parser)]
#[command(name = "wildtrack")]
struct Args {
    #[arg(short, long, default_value = "wildtrack.json")]
    config: String,

    #[arg(short, long)]
    output: Option<String>,

    #[arg(short, long)]
    profile: Option<String>,

    #[arg(long)]
    pid: Option<u32>,

    #[arg(long)]
    test_event: bool,
}

#[test]
fn test_parse_no_args() {
    let args = Args::try_parse_from(["wildtrack"]).unwrap();
    assert_eq!(args.config, "wildtrack.json");
    assert!(args.output.is_none());
    assert!(args.profile.is_none());
    assert!(args.pid.is_none());
    assert!(!args.test_event);
}

#[test]
fn test_parse_config_path() {
    let args = Args::try_parse_from(["wildtrack", "-c", "run42.json"]).unwrap();
    assert_eq!(args.config, "run42.json");
}

#[test]
fn test_parse_profile_override() {
    let args = Args::try_parse_from(["wildtrack", "--profile", "fire-red-us"]).unwrap();
    assert_eq!(args.profile.as_deref(), Some("fire-red-us"));
}

#[test]
fn test_parse_pid_and_test_event() {
    let args = Args::try_parse_from(["wildtrack", "--pid", "4242", "--test-event"]).unwrap();
    assert_eq!(args.pid, Some(4242));
    assert!(args.test_event);
}

#[test]
fn test_parse_rejects_bad_pid() {
    assert!(Args::try_parse_from(["wildtrack", "--pid", "not-a-pid"]).is_err());
}
