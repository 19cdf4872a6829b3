use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use eyre::{Result, eyre};
use log::{debug, info, warn};
use regex::Regex;

use crate::utils::cli::Args;
use crate::utils::config::FetchConfig;

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("script regex is valid")
});
static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|tr)\s*>").expect("block regex is valid")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));

pub struct JobScraper;

impl JobScraper {
    pub async fn from_url(url: &str, fetch: &FetchConfig) -> Result<String> {
        info!("fetching job description from: {}", url);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(fetch.timeout_secs))
            .user_agent(&fetch.user_agent)
            .build()?;

        let response = (|| async { client.get(url).send().await?.error_for_status() })
            .retry(ExponentialBuilder::default().with_max_times(fetch.max_retries))
            .when(is_transient)
            .notify(|err, dur| warn!("retrying job posting fetch in {:?}: {}", dur, err))
            .await
            .map_err(|e| eyre!("failed to fetch job posting {}: {}", url, e))?;

        let html = response.text().await?;
        debug!("fetched {} bytes of job posting html", html.len());

        let text = html_to_text(&html);
        info!("successfully extracted job description text");

        Ok(text)
    }

    pub async fn from_file(path: &Path) -> Result<String> {
        info!("reading job description from file: {}", path.display());

        tokio::fs::read_to_string(path).await.map_err(Into::into)
    }
}

/// Resolves the job description from the CLI. `None` means no ranking.
pub async fn get_job_description(args: &Args, fetch: &FetchConfig) -> Result<Option<String>> {
    let description = if let Some(ref url) = args.job_url {
        JobScraper::from_url(url, fetch).await?
    } else if let Some(ref file) = args.job_file {
        JobScraper::from_file(file).await?
    } else if let Some(ref text) = args.job_text {
        text.clone()
    } else {
        info!("no job description provided, resumes will not be ranked");
        return Ok(None);
    };

    if description.trim().is_empty() {
        warn!("job description is blank, resumes will not be ranked");
        return Ok(None);
    }

    Ok(Some(description))
}

/// Network failures, timeouts and 5xx answers are worth another try; 4xx
/// answers are not.
fn is_transient(err: &reqwest::Error) -> bool {
    err.status().is_none_or(|status| status.is_server_error())
}

/// Reduces a job posting page to its readable text.
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_OR_STYLE.replace_all(html, "");
    let text = BLOCK_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text).replace('\u{a0}', " ");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
