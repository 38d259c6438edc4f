use std::process::ExitCode;

use anyhow::{Context, Result};
use flagscan::{FlagInfo, Flags, ParseOptions, Parsed};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

const ABOUT: &str = "Resolves a server configuration from flags and prints it as JSON.";

/// Flags shared by every command, parsed first and permissively.
#[derive(Flags, Debug)]
struct SharedFlags {
    #[flag("--verbose", alias = "-v")]
    verbose: bool,
}

#[derive(Flags, Debug, Serialize)]
struct ServeFlags {
    #[flag("--port", alias = "-p", default = 8080)]
    port: u16,
    #[flag("--host", default = String::from("127.0.0.1"))]
    host: String,
    #[flag("--tag", alias = "-t")]
    tags: Vec<String>,
    #[flag("--describe")]
    #[serde(skip)]
    describe: bool,
    #[flag("--help", alias = "-h")]
    #[serde(skip)]
    help: bool,
}

fn main() -> Result<ExitCode> {
    let argv: Vec<String> = std::env::args().collect();

    let Parsed {
        flags: shared,
        mut args,
        mut errors,
    } = SharedFlags::parse_with(argv.as_slice(), ParseOptions::permissive());
    init_tracing(shared.verbose);

    let flags = ServeFlags::parse_chained(&mut args, &mut errors);
    tracing::debug!(?shared, ?flags, ?args, "arguments parsed");

    let program = args.first().map(String::as_str).unwrap_or("flagscan-demo");
    if errors.has_errors() {
        eprint!("Invalid arguments:{errors}");
        return Ok(ExitCode::from(2));
    }
    if args.len() > 1 {
        eprintln!("{program} doesn't take any argument.");
        return Ok(ExitCode::from(2));
    }

    if flags.help {
        print!("{}", help(program));
        return Ok(ExitCode::SUCCESS);
    }

    if flags.describe {
        let infos: Vec<FlagInfo> = SharedFlags::describe()
            .into_iter()
            .chain(ServeFlags::describe())
            .collect();
        let json = serde_json::to_string_pretty(&infos).context("failed to encode flag list")?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    tracing::info!(host = %flags.host, port = flags.port, "configuration resolved");
    let json = serde_json::to_string_pretty(&flags).context("failed to encode configuration")?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

fn help(program: &str) -> String {
    let mut out = format!("{program}\n{program} --port 8080\n\n{ABOUT}\n\nFlags:\n");

    let rows: Vec<(String, &str)> = SharedFlags::describe()
        .iter()
        .chain(ServeFlags::describe().iter())
        .map(|info| (format_flag(info), info.type_tag))
        .collect();
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, type_tag) in rows {
        out.push_str(&format!("  {left:width$}  {type_tag}\n"));
    }
    out
}

fn format_flag(info: &FlagInfo) -> String {
    let mut out = info.name.to_string();
    if info.alias != info.name {
        out.push_str(", ");
        out.push_str(info.alias);
    }
    if info.takes_value {
        out.push_str(" <VALUE>");
    }
    out
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
