use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use jsonmap_cli::config::AppConfig;
use jsonmap_cli::inputs::open_session;
use jsonmap_cli::report::{links_table, rows_table};
use jsonmap_gateway::{HttpGateway, submit_detached};
use jsonmap_map::{MappingSession, Outcome};

use crate::cli::{SaveArgs, SessionArgs};

pub fn run_preview(args: &SessionArgs, config: AppConfig) -> Result<()> {
    let session = open(args, config)?;
    println!("{}", session.preview_json().context("serialize preview")?);
    Ok(())
}

pub fn run_rows(args: &SessionArgs, config: AppConfig) -> Result<()> {
    let session = open(args, config)?;
    println!("Source");
    println!("{}", rows_table(session.source_tree()));
    println!("Target");
    println!("{}", rows_table(session.target_tree()));
    Ok(())
}

pub fn run_links(args: &SessionArgs, config: AppConfig) -> Result<()> {
    let session = open(args, config)?;
    if session.links().is_empty() {
        println!("No links.");
    } else {
        println!("{}", links_table(session.links()));
    }
    Ok(())
}

pub fn run_save(args: &SaveArgs, config: AppConfig) -> Result<()> {
    let config = config.with_overrides(None, args.endpoint.as_deref(), args.timeout);
    let session = open(&args.session, config.clone())?;
    let gateway = HttpGateway::new(&config.gateway).context("build storage client")?;

    let span = info_span!("save", endpoint = %gateway.endpoint());
    let _guard = span.enter();
    let records = session.payload();
    info!(records = records.len(), "submitting records");
    let response = submit_detached(Arc::new(gateway), records)
        .wait()
        .context("save records")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("serialize response")?
    );
    Ok(())
}

fn open(args: &SessionArgs, config: AppConfig) -> Result<MappingSession> {
    let config = config.with_overrides(args.fan_out.map(Into::into), None, None);
    let (session, outcomes) = open_session(&args.files(), config.mapper)?;
    let ignored = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, Outcome::Ignored))
        .count();
    if ignored > 0 {
        warn!(ignored, total = outcomes.len(), "some commands had no effect");
    }
    Ok(session)
}
