//! awsome-cli — 从命令行调用会话 API
//!
//! Usage:
//!   awsome-cli <operation> [--data <json>] [--set key=<json>]... [--base-url <url>]
//!   awsome-cli list                                  Show the endpoint table

use awsome_client::endpoint::DESCRIPTORS;
use awsome_client::{ClientBuilder, Operation, RequestOverrides};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Invocation {
    data: Option<Value>,
    overrides: RequestOverrides,
    base_url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "list" => cmd_list(),
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => print_usage(),
        name => {
            let operation = match name.parse::<Operation>() {
                Ok(op) => op,
                Err(e) => {
                    eprintln!("{e}");
                    eprintln!();
                    print_usage();
                    std::process::exit(1);
                }
            };
            let parsed = parse_args(&args[2..])
                .and_then(|inv| check_payload(operation, &inv).map(|()| inv));
            let invocation = match parsed {
                Ok(inv) => inv,
                Err(msg) => {
                    eprintln!("Error: {msg}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = cmd_invoke(operation, invocation).await {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"awsome-cli — awsome 会话 API 命令行工具

USAGE:
    awsome-cli <OPERATION> [OPTIONS]

OPERATIONS:
    createConversation | deleteConversation | updateConversation | listConversations
    sendMessage | getMessageHistory | clearMessageHistory | chat
    (snake_case names are accepted too)

COMMANDS:
    list                        Show operation → method/path table
    version                     Show version information
    help                        Show this help message

OPTIONS:
    --data <json>               Primary payload (required except for listConversations)
    --set <key>=<value>         Request override; value parsed as JSON, else string
    --base-url <url>            Server base URL

ENVIRONMENT:
    AWSOME_BASE_URL             Server base URL
    AWSOME_API_TOKEN            Bearer token
    RUST_LOG                    Log filter (e.g. awsome_client=debug)"#
    );
}

fn cmd_version() {
    println!("awsome-cli {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_list() {
    for d in DESCRIPTORS.iter() {
        println!(
            "{:<22} {:<5} {:<42} {}",
            d.name,
            d.method,
            d.path,
            d.placement.config_key()
        );
    }
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut inv = Invocation::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data" => {
                let raw = iter.next().ok_or("--data requires a value")?;
                let value: Value =
                    serde_json::from_str(raw).map_err(|e| format!("--data is not valid JSON: {e}"))?;
                inv.data = Some(value);
            }
            "--set" => {
                let raw = iter.next().ok_or("--set requires key=value")?;
                let (key, value) = raw
                    .split_once('=')
                    .ok_or_else(|| format!("--set expects key=value, got {raw}"))?;
                let value = serde_json::from_str::<Value>(value)
                    .unwrap_or_else(|_| Value::String(value.to_string()));
                inv.overrides.insert(key, value);
            }
            "--base-url" => {
                let raw = iter.next().ok_or("--base-url requires a value")?;
                inv.base_url = Some(raw.clone());
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(inv)
}

/// Every operation except `listConversations` needs a payload.
fn check_payload(operation: Operation, inv: &Invocation) -> Result<(), String> {
    if inv.data.is_none() && operation != Operation::ListConversations {
        return Err(format!("{operation} requires --data <json>"));
    }
    Ok(())
}

async fn cmd_invoke(operation: Operation, inv: Invocation) -> awsome_client::Result<()> {
    let mut builder = ClientBuilder::new();
    if let Some(url) = inv.base_url {
        builder = builder.base_url(url);
    }
    let api = builder.build()?;

    let overrides = (!inv.overrides.is_empty()).then_some(&inv.overrides);
    let resp = api.dispatch(operation, inv.data.as_ref(), overrides).await?;
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}
