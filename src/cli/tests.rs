//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

fn routes_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(command: &Commands) -> (bool, String) {
    let mut out = Vec::new();
    let success = execute(command, &mut out).unwrap();
    (success, String::from_utf8(out).unwrap())
}

#[test]
fn test_match_command_defaults_to_get() {
    let cli = Cli::try_parse_from([
        "actionrouter",
        "match",
        "--config",
        "routes.cfg",
        "/users/42",
    ])
    .unwrap();

    match cli.command {
        Commands::Match {
            config,
            method,
            path,
            json,
        } => {
            assert_eq!(config, PathBuf::from("routes.cfg"));
            assert_eq!(method, "GET");
            assert_eq!(path, "/users/42");
            assert!(!json);
        }
        other => panic!("Expected Match command, got {other:?}"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["actionrouter", "routes", "--config", "routes.cfg"],
        vec!["actionrouter", "routes", "-c", "routes.cfg", "--json"],
        vec![
            "actionrouter",
            "match",
            "-c",
            "routes.cfg",
            "-m",
            "post",
            "/x",
        ],
        vec!["actionrouter", "check", "--config", "routes.cfg"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_match_requires_path() {
    let cli = Cli::try_parse_from(["actionrouter", "match", "--config", "routes.cfg"]);
    assert!(cli.is_err());
}

#[test]
fn test_routes_lists_table_in_order() {
    let file = routes_file("get /about home#about\npost /users:params user#create\n");
    let (success, output) = run(&Commands::Routes {
        config: file.path().to_path_buf(),
        json: false,
    });

    assert!(success);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "[routes] count=3");
    assert_eq!(lines[1], "[route] get /about -> homecontroller#about");
    assert_eq!(lines[2], "[route] get /about/ -> homecontroller#about");
    assert_eq!(lines[3], "[route] post /users:params -> usercontroller#create");
}

#[test]
fn test_routes_json_includes_diagnostics() {
    let file = routes_file("weird /x\nget /a a#b\n");
    let (success, output) = run(&Commands::Routes {
        config: file.path().to_path_buf(),
        json: true,
    });

    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["routes"].as_array().unwrap().len(), 2);
    assert_eq!(value["routes"][0]["controller"], "acontroller");
    assert_eq!(value["diagnostics"].as_array().unwrap().len(), 1);
}

#[test]
fn test_match_reports_rejection() {
    let file = routes_file("post /users:params user#create\n");
    let (success, output) = run(&Commands::Match {
        config: file.path().to_path_buf(),
        method: "get".to_string(),
        path: "/users/1".to_string(),
        json: true,
    });

    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["outcome"], "rejected");
    assert_eq!(value["allowed"], "post");
}

#[test]
fn test_match_rejects_invalid_method() {
    let file = routes_file("get / home#index\n");
    let mut out = Vec::new();
    let result = execute(
        &Commands::Match {
            config: file.path().to_path_buf(),
            method: "GE T".to_string(),
            path: "/".to_string(),
            json: false,
        },
        &mut out,
    );
    assert!(result.is_err());
}

#[test]
fn test_check_fails_on_diagnostics() {
    let file = routes_file("get / home#index\nfetch /x a#b\n");
    let (success, output) = run(&Commands::Check {
        config: file.path().to_path_buf(),
    });

    assert!(!success);
    assert!(output.contains("[diagnostics] count=1"));
    assert!(output.contains("[line : 2]"));
}

#[test]
fn test_check_passes_clean_file() {
    let file = routes_file("# comment\n\nget / home#index\n");
    let (success, output) = run(&Commands::Check {
        config: file.path().to_path_buf(),
    });

    assert!(success);
    assert!(output.starts_with("OK: 1 route(s)"));
}
