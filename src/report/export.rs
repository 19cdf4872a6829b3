use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use log::{debug, info};
use serde::Serialize;

use crate::models::resume::{ParsedResume, RankedResume};

/// Everything produced by one run, as written to `summary.json`.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary<'a> {
    pub generated_at: DateTime<Utc>,
    pub job_description_provided: bool,
    pub ranking: &'a [RankedResume],
    pub resumes: &'a [ParsedResume],
}

/// Pretty JSON of a single resume, indented by two spaces.
pub fn resume_json(resume: &ParsedResume) -> Result<String> {
    Ok(serde_json::to_string_pretty(resume)?)
}

/// One header row and one data row; list fields are joined with `", "`.
pub fn resume_csv(resume: &ParsedResume) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Skills", "Education", "Experience"])?;
    writer.write_record([
        resume.skills.join(", "),
        resume.education.join(", "),
        resume.experience.join(", "),
    ])?;

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn ranking_csv(ranking: &[RankedResume]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Rank", "Name", "Score"])?;
    for entry in ranking {
        writer.write_record([
            entry.rank.to_string(),
            entry.name.clone(),
            format!("{:.4}", entry.score),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub struct Exporter {
    output_dir: PathBuf,
    json: bool,
    csv: bool,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, json: bool, csv: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .wrap_err_with(|| format!("failed to create {}", output_dir.display()))?;

        Ok(Self {
            output_dir,
            json,
            csv,
        })
    }

    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        fs::write(&path, content).wrap_err_with(|| format!("failed to write {}", path.display()))?;
        debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn write_dashboard(&self, html: &str) -> Result<PathBuf> {
        self.write("dashboard.html", html)
    }

    /// Writes `{name}_analysis.json` / `.csv` for each resume, plus the
    /// run-wide `ranking.csv` and `summary.json`.
    pub fn export_all(
        &self,
        resumes: &[ParsedResume],
        ranking: &[RankedResume],
        job_description_provided: bool,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for resume in resumes {
            if self.json {
                written.push(self.write(&format!("{}_analysis.json", resume.name), &resume_json(resume)?)?);
            }
            if self.csv {
                written.push(self.write(&format!("{}_analysis.csv", resume.name), &resume_csv(resume)?)?);
            }
        }

        if self.csv && !ranking.is_empty() {
            written.push(self.write("ranking.csv", &ranking_csv(ranking)?)?);
        }

        if self.json {
            let summary = AnalysisSummary {
                generated_at: Utc::now(),
                job_description_provided,
                ranking,
                resumes,
            };
            written.push(self.write("summary.json", &serde_json::to_string_pretty(&summary)?)?);
        }

        info!("exported {} files to {}", written.len(), self.output_dir.display());
        Ok(written)
    }
}
