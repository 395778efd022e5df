//! Unit tests for CLI commands

use super::commands::{write_match, write_routes};
use crate::cli::{Cli, Commands};
use crate::router::RouteTable;
use clap::Parser;

fn table_in(dir: &std::path::Path) -> RouteTable<crate::handlers::LoadedRoute> {
    std::fs::write(
        dir.join("pages.yaml"),
        "routes:\n  - path: /{title}\n    methods: { get: {} }\n  - path: /{title}/{part}\n",
    )
    .unwrap();
    RouteTable::from_handlers(dir, None).unwrap()
}

#[test]
fn test_match_command_parses_paths() {
    let cli = Cli::try_parse_from(["routeswitch", "match", "--handlers", "h", "/a", "/b"]).unwrap();

    match cli.command {
        Commands::Match {
            handlers,
            watch,
            paths,
        } => {
            assert_eq!(handlers.unwrap().to_string_lossy(), "h");
            assert!(!watch);
            assert_eq!(paths, vec!["/a", "/b"]);
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_watch_requires_stdin_mode() {
    let err = Cli::try_parse_from(["routeswitch", "match", "--watch", "/a"]).err();
    assert_eq!(
        err.map(|e| e.kind()),
        Some(clap::error::ErrorKind::ArgumentConflict)
    );

    let cli = Cli::try_parse_from(["routeswitch", "match", "--watch"]).unwrap();
    match cli.command {
        Commands::Match { watch, paths, .. } => {
            assert!(watch);
            assert!(paths.is_empty());
        }
        _ => panic!("Expected Match command"),
    }
}

#[test]
fn test_routes_command_with_flags() {
    let cli = Cli::try_parse_from(["routeswitch", "routes", "--json"]).unwrap();

    match cli.command {
        Commands::Routes { handlers, json } => {
            assert!(handlers.is_none());
            assert!(json);
        }
        _ => panic!("Expected Routes command"),
    }
}

#[test]
fn test_write_match_emits_json_line() {
    let dir = tempfile::tempdir().unwrap();
    let table = table_in(dir.path());

    let mut out = Vec::new();
    assert!(write_match(&table, "/Main_Page/html", &mut out).unwrap());
    assert!(!write_match(&table, "/a/b/c", &mut out).unwrap());

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    let first: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(first["handler"], "pages");
    assert_eq!(first["pattern"], "/{title}/{part}");
    assert_eq!(first["params"]["title"], "Main_Page");
    assert_eq!(first["params"]["1"], "html");
    assert_eq!(lines.next(), Some("null"));
}

#[test]
fn test_write_routes_lists_in_priority_order() {
    let dir = tempfile::tempdir().unwrap();
    let table = table_in(dir.path());

    let mut out = Vec::new();
    write_routes(&table, false, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "/{title} -> pages\n/{title}/{part} -> pages\n"
    );
}
