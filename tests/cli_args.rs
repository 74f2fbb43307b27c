//! CLI argument parsing tests.

use clap::Parser;
use hoopla::cli::{Cli, Collection, Command, OwnerKind};

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["hoopla", "list", "users", "--email", "ada@example.com"]);

    assert!(!cli.json);
    match cli.command {
        Command::List {
            collection, email, ..
        } => {
            assert_eq!(collection, Collection::Users);
            assert_eq!(email.as_deref(), Some("ada@example.com"));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_collection_singular_aliases() {
    let cli = Cli::parse_from(["hoopla", "list", "metric"]);
    assert!(matches!(
        cli.command,
        Command::List {
            collection: Collection::Metrics,
            ..
        }
    ));

    let cli = Cli::parse_from(["hoopla", "list", "newsflash", "--name", "Big Wins"]);
    match cli.command {
        Command::List {
            collection, name, ..
        } => {
            assert_eq!(collection, Collection::Newsflashes);
            assert_eq!(name.as_deref(), Some("Big Wins"));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_set_value_subcommand() {
    let cli = Cli::parse_from([
        "hoopla",
        "set-value",
        "Deals Closed",
        "widgets",
        "3.5",
        "--owner-kind",
        "generic",
    ]);

    match cli.command {
        Command::SetValue {
            metric,
            owner,
            value,
            owner_kind,
        } => {
            assert_eq!(metric, "Deals Closed");
            assert_eq!(owner, "widgets");
            assert_eq!(value, 3.5);
            assert_eq!(owner_kind, Some(OwnerKind::Generic));
        }
        _ => panic!("Expected SetValue command"),
    }
}

#[test]
fn test_set_value_rejects_non_numeric_value() {
    let result = Cli::try_parse_from(["hoopla", "set-value", "Deals Closed", "widgets", "lots"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_values_subcommand() {
    let cli = Cli::parse_from(["hoopla", "values", "Revenue", "--owner", "Closers"]);

    match cli.command {
        Command::Values {
            metric,
            owner,
            owner_kind,
        } => {
            assert_eq!(metric, "Revenue");
            assert_eq!(owner.as_deref(), Some("Closers"));
            assert_eq!(owner_kind, None);
        }
        _ => panic!("Expected Values command"),
    }
}

#[test]
fn test_cli_parses_newsflash_with_repeated_recipients() {
    let cli = Cli::parse_from([
        "hoopla",
        "newsflash",
        "Big Wins",
        "--title",
        "New record",
        "--recipient",
        "ada@example.com",
        "--recipient",
        "grace@example.com",
    ]);

    match cli.command {
        Command::Newsflash {
            newsflash,
            title,
            message,
            recipients,
            owner,
            ..
        } => {
            assert_eq!(newsflash, "Big Wins");
            assert_eq!(title, "New record");
            assert_eq!(message, None);
            assert_eq!(recipients, vec!["ada@example.com", "grace@example.com"]);
            assert_eq!(owner, None);
        }
        _ => panic!("Expected Newsflash command"),
    }
}

#[test]
fn test_newsflash_requires_title() {
    let result = Cli::try_parse_from(["hoopla", "newsflash", "Big Wins"]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags() {
    // --json before subcommand
    let cli = Cli::parse_from(["hoopla", "--json", "list", "teams"]);
    assert!(cli.json);

    // --json and --verbose after subcommand (global flags)
    let cli = Cli::parse_from(["hoopla", "list", "teams", "--json", "-v"]);
    assert!(cli.json);
    assert!(cli.verbose);
}

#[test]
fn test_credentials_from_flags() {
    let cli = Cli::parse_from([
        "hoopla",
        "--client-id",
        "id",
        "--client-secret",
        "secret",
        "--api-url",
        "http://localhost:9000/",
        "list",
        "users",
    ]);

    assert_eq!(cli.credentials.client_id.as_deref(), Some("id"));
    assert_eq!(cli.credentials.client_secret.as_deref(), Some("secret"));
    assert_eq!(cli.credentials.api_url, "http://localhost:9000/");
}
