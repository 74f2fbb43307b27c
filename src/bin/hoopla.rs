//! Hoopla API CLI binary.
//!
//! A command-line interface for interacting with the Hoopla API.

use std::process::ExitCode;

use clap::Parser;
use hoopla::cli::{Cli, Collection, Command, Credentials, OwnerKind};
use hoopla::output::{owner_label, PrettyPrint};
use hoopla::{
    Connection, Delete, HasOwner, HooplaClient, HooplaError, Metric, OwnerRef, Resource, Save,
};
use serde_json::Value;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let client = match authenticate(&cli.credentials).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set HOOPLA_CLIENT_ID and HOOPLA_CLIENT_SECRET environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn authenticate(credentials: &Credentials) -> hoopla::Result<HooplaClient> {
    let client_id = credentials.client_id.as_deref().ok_or_else(|| {
        HooplaError::ConfigMissing("client id not set (--client-id or HOOPLA_CLIENT_ID)".to_string())
    })?;
    let client_secret = credentials.client_secret.as_deref().ok_or_else(|| {
        HooplaError::ConfigMissing(
            "client secret not set (--client-secret or HOOPLA_CLIENT_SECRET)".to_string(),
        )
    })?;

    HooplaClient::authenticate(client_id, client_secret, &credentials.api_url).await
}

async fn run(client: &HooplaClient, cli: Cli) -> hoopla::Result<()> {
    let root = client.connect().await?;

    match cli.command {
        Command::List {
            collection,
            email,
            name,
        } => handle_list(&root, collection, email, name, cli.json).await,
        Command::Values {
            metric,
            owner,
            owner_kind,
        } => handle_values(&root, &metric, owner.as_deref(), owner_kind, cli.json).await,
        Command::SetValue {
            metric,
            owner,
            value,
            owner_kind,
        } => handle_set_value(&root, &metric, &owner, value, owner_kind, cli.json).await,
        Command::DeleteValue {
            metric,
            owner,
            owner_kind,
        } => handle_delete_value(&root, &metric, &owner, owner_kind).await,
        Command::Newsflash {
            newsflash,
            title,
            message,
            recipients,
            owner,
            owner_kind,
        } => {
            handle_newsflash(
                &root,
                &newsflash,
                title,
                message,
                &recipients,
                owner.as_deref(),
                owner_kind,
                cli.json,
            )
            .await
        }
    }
}

async fn handle_list(
    root: &Connection,
    collection: Collection,
    email: Option<String>,
    name: Option<String>,
    json: bool,
) -> hoopla::Result<()> {
    match collection {
        Collection::Users => {
            let users = match email {
                Some(email) => root.find_users_by_email(&email).await?,
                None => root.users().await?,
            };
            output_list(&users, json, |u| UserRow {
                name: u.display_name(),
                email: u.email().unwrap_or_default().to_string(),
                href: u.href().unwrap_or_default().to_string(),
            })
        }
        Collection::Teams => {
            let teams = match name {
                Some(name) => root.find_teams_by_name(&name).await?,
                None => root.teams().await?,
            };
            output_list(&teams, json, |t| NamedRow {
                name: t.name().unwrap_or_default().to_string(),
                href: t.href().unwrap_or_default().to_string(),
            })
        }
        Collection::Metrics => {
            let metrics = match name {
                Some(name) => root.find_metrics_by_name(&name).await?,
                None => root.metrics().await?,
            };
            output_list(&metrics, json, |m| MetricRow {
                name: m.name().unwrap_or_default().to_string(),
                metric_type: m.metric_type().unwrap_or_default().to_string(),
                href: m.href().unwrap_or_default().to_string(),
            })
        }
        Collection::Newsflashes => {
            let newsflashes = match name {
                Some(name) => root.find_newsflashes_by_name(&name).await?,
                None => root.newsflashes().await?,
            };
            output_list(&newsflashes, json, |n| NamedRow {
                name: n.name().unwrap_or_default().to_string(),
                href: n.href().unwrap_or_default().to_string(),
            })
        }
    }
}

async fn handle_values(
    root: &Connection,
    metric_name: &str,
    owner: Option<&str>,
    owner_kind: Option<OwnerKind>,
    json: bool,
) -> hoopla::Result<()> {
    let metric = find_metric(root, metric_name).await?;
    let values = match owner {
        Some(owner) => {
            let owner = resolve_owner_argument(root, owner, owner_kind).await?;
            metric.values_by_owner(&owner).await?
        }
        None => metric.values().await?,
    };
    output_list(&values, json, |v| ValueRow {
        owner: match v.owner_ref() {
            Ok(Some(owner)) => owner_label(&owner),
            Ok(None) => String::new(),
            Err(e) => format!("<{e}>"),
        },
        value: v.value().map(|x| x.to_string()).unwrap_or_default(),
        updated: v
            .updated_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    })
}

async fn handle_set_value(
    root: &Connection,
    metric_name: &str,
    owner: &str,
    value: f64,
    owner_kind: Option<OwnerKind>,
    json: bool,
) -> hoopla::Result<()> {
    let metric = find_metric(root, metric_name).await?;
    let owner = resolve_owner_argument(root, owner, owner_kind).await?;

    let mut metric_value = match metric.values_by_owner(&owner).await?.into_iter().next() {
        Some(existing) => existing,
        None => {
            let mut fresh = metric.new_value()?;
            fresh.set_owner(owner);
            fresh
        }
    };
    metric_value.set_value(value);
    metric_value.save().await?;

    output_single(&metric_value, json)
}

async fn handle_delete_value(
    root: &Connection,
    metric_name: &str,
    owner: &str,
    owner_kind: Option<OwnerKind>,
) -> hoopla::Result<()> {
    let metric = find_metric(root, metric_name).await?;
    let owner = resolve_owner_argument(root, owner, owner_kind).await?;

    let values = metric.values_by_owner(&owner).await?;
    if values.is_empty() {
        eprintln!("No value for {} on '{}'", owner_label(&owner), metric_name);
        return Ok(());
    }
    for value in &values {
        value.delete().await?;
    }
    println!("Deleted {} value(s)", values.len());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_newsflash(
    root: &Connection,
    newsflash_name: &str,
    title: String,
    message: Option<String>,
    recipient_emails: &[String],
    owner: Option<&str>,
    owner_kind: Option<OwnerKind>,
    json: bool,
) -> hoopla::Result<()> {
    let newsflash = root
        .find_newsflash_by_name(newsflash_name)
        .await?
        .ok_or_else(|| not_found("newsflash", newsflash_name))?;

    let mut event = newsflash.new_event()?;
    event.set_title(title);
    if let Some(message) = message {
        event.set_message(message);
    }
    if let Some(owner) = owner {
        event.set_owner(resolve_owner_argument(root, owner, owner_kind).await?);
    }

    let mut recipients = Vec::with_capacity(recipient_emails.len());
    for email in recipient_emails {
        let user = root
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| not_found("user", email))?;
        recipients.push(user);
    }
    if !recipients.is_empty() {
        event.set_recipients(&recipients)?;
    }

    event.save().await?;
    output_single(&event, json)
}

async fn find_metric(root: &Connection, name: &str) -> hoopla::Result<Metric> {
    root.find_metric_by_name(name)
        .await?
        .ok_or_else(|| not_found("metric", name))
}

/// Turn an owner argument into a reference.
///
/// Without an explicit kind, a user with that email wins, then a team with
/// that name; anything else is a generic owner.
async fn resolve_owner_argument(
    root: &Connection,
    owner: &str,
    kind: Option<OwnerKind>,
) -> hoopla::Result<OwnerRef> {
    match kind {
        Some(OwnerKind::User) => {
            let user = root
                .find_user_by_email(owner)
                .await?
                .ok_or_else(|| not_found("user", owner))?;
            OwnerRef::try_from(&user)
        }
        Some(OwnerKind::Team) => {
            let team = root
                .find_team_by_name(owner)
                .await?
                .ok_or_else(|| not_found("team", owner))?;
            OwnerRef::try_from(&team)
        }
        Some(OwnerKind::Generic) => Ok(OwnerRef::generic(owner)),
        None => {
            if let Some(user) = root.find_user_by_email(owner).await? {
                return OwnerRef::try_from(&user);
            }
            if let Some(team) = root.find_team_by_name(owner).await? {
                return OwnerRef::try_from(&team);
            }
            Ok(OwnerRef::generic(owner))
        }
    }
}

fn not_found(entity_type: &'static str, id: &str) -> HooplaError {
    HooplaError::NotFound {
        entity_type,
        id: id.to_string(),
    }
}

fn output_single<T: Resource + PrettyPrint>(item: &T, json: bool) -> hoopla::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&item.serialize())?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> hoopla::Result<()>
where
    T: Resource,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        let values: Vec<Value> = items.iter().map(|item| item.serialize()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} item(s)", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct UserRow {
    name: String,
    email: String,
    href: String,
}

#[derive(Tabled)]
struct NamedRow {
    name: String,
    href: String,
}

#[derive(Tabled)]
struct MetricRow {
    name: String,
    #[tabled(rename = "type")]
    metric_type: String,
    href: String,
}

#[derive(Tabled)]
struct ValueRow {
    owner: String,
    value: String,
    updated: String,
}
