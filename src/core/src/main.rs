use bugdash::configuration::config::{CliOverrides, Config};
use bugdash::controller::controller_handler::Controller;
use bugdash::session_pairing::{PairingSummary, SessionPair};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bugdash")]
#[command(version)]
#[command(about = "Bug Analysis Dashboard: pairs session videos with their reports")]
struct Args {
    /// TOML configuration file
    #[arg(long, short, env = "BUGDASH_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: CliOverrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the dashboard and its JSON API
    Serve,
    /// Print the paired sessions once and exit
    Pairs {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the raw object listing as JSON
    List,
}

fn print_table(pairs: &[SessionPair], summary: &PairingSummary) {
    println!("{:<34} {:<48} {:<48}", "SESSION", "VIDEO", "REPORT");
    for pair in pairs {
        println!(
            "{:<34} {:<48} {:<48}",
            pair.label(),
            pair.video.as_ref().map_or("Missing video", |v| v.name()),
            pair.report.as_ref().map_or("Missing report", |r| r.name()),
        );
    }
    println!(
        "\n{} session(s): {} complete, {} missing report, {} orphan report(s)",
        summary.sessions, summary.complete, summary.missing_report, summary.orphan_reports
    );
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        error!("Unable to serialize output: {}", e);
        std::process::exit(1);
    })
}

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let args = Args::parse();

    info!("Importing configuration");
    let config = Config::load(args.config.as_deref(), &args.overrides).unwrap_or_else(|e| {
        error!("Unable to import configuration: {}", e);
        std::process::exit(1);
    });

    let controller = Controller::new(config).unwrap_or_else(|e| {
        error!("Unable to create a controller instance: {}, exiting...", e);
        std::process::exit(1);
    });

    let result = match args.command {
        Command::Serve => controller.run().await,
        Command::Pairs { json } => controller.session_pairs().await.map(|(pairs, summary)| {
            if json {
                println!("{}", to_json(&pairs));
            } else {
                print_table(&pairs, &summary);
            }
        }),
        Command::List => controller
            .list_objects()
            .await
            .map(|objects| println!("{}", to_json(&objects))),
    };

    if let Err(e) = result {
        error!("{}, exiting...", e);
        std::process::exit(1);
    }
}
