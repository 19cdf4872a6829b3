mod models;
mod parser;
mod ranking;
mod report;
mod scraper;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Result, eyre};
use log::{debug, info, warn};

use crate::models::resume::{ParsedResume, RankedResume};
use crate::parser::ruler::EntityRuler;
use crate::parser::{ResumeParser, collect_inputs};
use crate::ranking::rank_resumes;
use crate::report::dashboard::DashboardAssembler;
use crate::report::export::Exporter;
use crate::report::terminal::{print_analysis, print_ranking};
use crate::scraper::job::get_job_description;
use crate::utils::cache::TextCache;
use crate::utils::cli::Args;
use crate::utils::config::{Config, config};
use crate::utils::log::Logger;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    info!(
        "starting resume-analyzer {}",
        format!("v{}", env!("CARGO_PKG_VERSION")).magenta()
    );

    let config: Config = config(args.config.clone())?;

    let job_description = get_job_description(&args, &config.fetch).await?;

    let inputs = collect_inputs(&args.resumes)?;
    if inputs.is_empty() {
        return Err(eyre!("no .pdf or .txt resumes found in the given inputs"));
    }
    info!("found {} resume files", inputs.len());

    let parser = build_parser(&config, args.no_cache)?;
    let resumes = tokio::task::spawn_blocking(move || parser.parse_all(&inputs)).await?;
    if resumes.is_empty() {
        return Err(eyre!("none of the resumes could be parsed"));
    }
    info!("analyzed {} resumes", resumes.len());

    let ranking = match &job_description {
        Some(jd) => rank(&resumes, jd),
        None => Vec::new(),
    };

    if !ranking.is_empty() {
        print_ranking(&ranking);
    }
    print_analysis(&resumes);

    if args.no_export {
        debug!("exports disabled from the command line");
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());
    write_outputs(&config, output_dir, &resumes, &ranking, job_description.is_some())?;

    Ok(())
}

fn build_parser(config: &Config, no_cache: bool) -> Result<ResumeParser> {
    let ruler = EntityRuler::new(&config.ruler.patterns, config.ruler.case_sensitive);
    debug!("entity ruler loaded with {} patterns", config.ruler.patterns.len());

    let parser = ResumeParser::new(ruler);
    if no_cache || !config.cache.enabled {
        return Ok(parser);
    }

    Ok(parser.with_cache(TextCache::init(&config.cache.dir)?))
}

fn rank(resumes: &[ParsedResume], job_description: &str) -> Vec<RankedResume> {
    info!("ranking resumes against the job description");
    match rank_resumes(resumes, job_description) {
        Ok(scored) => RankedResume::from_scored(&scored),
        Err(e) => {
            warn!("skipping ranking: {}", e);
            Vec::new()
        }
    }
}

fn write_outputs(
    config: &Config,
    output_dir: PathBuf,
    resumes: &[ParsedResume],
    ranking: &[RankedResume],
    job_description_provided: bool,
) -> Result<()> {
    let exporter = Exporter::new(output_dir, config.export.json, config.export.csv)?;
    exporter.export_all(resumes, ranking, job_description_provided)?;

    if config.export.dashboard {
        let html = DashboardAssembler::new(resumes, ranking).assemble()?;
        let path = exporter.write_dashboard(&html)?;
        info!("dashboard written to {}", path.display().to_string().green());
    }

    Ok(())
}
