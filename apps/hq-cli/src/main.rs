#![deny(warnings)]

//! Headless roster check: load a catalog, campaign and team, then print the
//! team's cost, campaign metrics and every rule it breaks.

use anyhow::Result;
use hq_content::{load_campaign, load_catalog, load_rules, load_team};
use hq_rules::{report, RuleConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEMO_DIR: &str = "assets/demo";

#[derive(Debug)]
struct Args {
    catalog: PathBuf,
    campaign: PathBuf,
    team: PathBuf,
    rules: Option<PathBuf>,
    version: bool,
}

fn parse_args() -> Args {
    let demo = PathBuf::from(DEMO_DIR);
    let mut args = Args {
        catalog: demo.join("catalog.yaml"),
        campaign: demo.join("campaign.json"),
        team: demo.join("team.json"),
        rules: None,
        version: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--catalog" => args.catalog = it.next().map(PathBuf::from).unwrap_or(args.catalog),
            "--campaign" => args.campaign = it.next().map(PathBuf::from).unwrap_or(args.campaign),
            "--team" => args.team = it.next().map(PathBuf::from).unwrap_or(args.team),
            "--rules" => args.rules = it.next().map(PathBuf::from),
            "--version" => args.version = true,
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    args
}

fn main() -> Result<ExitCode> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    if args.version {
        println!(
            "hq-cli {} ({} {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_SHA"),
            env!("BUILD_DATE")
        );
        return Ok(ExitCode::SUCCESS);
    }
    info!(?args, "checking roster");

    let catalog = load_catalog(&args.catalog)?;
    let campaign = load_campaign(&args.campaign)?;
    let team = load_team(&args.team)?;
    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => RuleConfig::default(),
    };
    if team.campaign_id != campaign.id {
        warn!(team = %team.campaign_id, campaign = %campaign.id, "team belongs to another campaign");
    }

    let rep = report(&team, &campaign, &catalog, &rules);
    for missing in &rep.unresolved {
        warn!(%missing, "unresolved reference skipped");
    }

    println!(
        "{} | faction: {} | bank: {} EB | street cred: {} | influence: {}",
        campaign.name, campaign.faction_id, campaign.eb_bank, rep.street_cred, rep.influence
    );
    println!("Team {} | cost: {}/{} EB", team.id, rep.cost, rep.target_eb);
    if rep.is_legal() {
        println!("Roster OK");
        return Ok(ExitCode::SUCCESS);
    }
    for message in rep.messages() {
        println!("  - {message}");
    }
    Ok(ExitCode::FAILURE)
}
