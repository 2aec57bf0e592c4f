//! CLI argument parsing tests
//!
//! Run with: cargo test --test cli_tests

use clap::Parser;
use flicknroll::cli::{Cli, Commands, OutputFormat};
use flicknroll::config::{load_config_from_path, loader::default_config_content};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_login_args() {
    let cli = Cli::try_parse_from([
        "flicknroll",
        "login",
        "--email",
        "admin@flicknroll.com",
        "--password",
        "fnr25",
    ])
    .unwrap();

    match cli.command {
        Commands::Login { email, password } => {
            assert_eq!(email, "admin@flicknroll.com");
            assert_eq!(password.as_deref(), Some("fnr25"));
        }
        _ => panic!("expected login"),
    }
}

#[test]
fn test_cli_login_requires_email() {
    assert!(Cli::try_parse_from(["flicknroll", "login"]).is_err());
}

#[test]
fn test_cli_open_defaults_to_root() {
    let cli = Cli::try_parse_from(["flicknroll", "open"]).unwrap();
    match cli.command {
        Commands::Open { path, format } => {
            assert_eq!(path, "/");
            assert!(matches!(format, OutputFormat::Table));
        }
        _ => panic!("expected open"),
    }
}

#[test]
fn test_cli_global_config_flag() {
    let cli = Cli::try_parse_from([
        "flicknroll",
        "whoami",
        "--format",
        "json",
        "--config",
        "/etc/flicknroll.toml",
    ])
    .unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/flicknroll.toml"))
    );
    assert!(matches!(
        cli.command,
        Commands::Whoami {
            format: OutputFormat::Json
        }
    ));
}

#[test]
fn test_cli_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["flicknroll", "accounts", "--format", "yaml"]).is_err());
}

#[test]
fn test_cli_init_template_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flicknroll.toml");
    fs::write(&path, default_config_content()).unwrap();
    assert!(load_config_from_path(&path).is_ok());
}
