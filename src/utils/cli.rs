use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "resume-analyzer")]
#[command(about = "Extract skills, education and experience from PDF resumes and rank them against a job description", long_about = None)]
pub struct Args {
    /// Resume files (.pdf or .txt) or directories containing them
    #[arg(value_name = "RESUME", required = true)]
    pub resumes: Vec<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Path to file containing the job description used for ranking
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["job_url", "job_text"])]
    pub job_file: Option<PathBuf>,

    /// URL to the job posting
    #[arg(long, value_name = "URL", conflicts_with = "job_text")]
    pub job_url: Option<String>,

    /// Job description passed inline
    #[arg(long, value_name = "TEXT")]
    pub job_text: Option<String>,

    /// Directory for JSON/CSV exports and the HTML dashboard (overrides config)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip writing exports and the dashboard
    #[arg(long)]
    pub no_export: bool,

    /// Ignore the extracted-text cache
    #[arg(long)]
    pub no_cache: bool,

    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,
}
