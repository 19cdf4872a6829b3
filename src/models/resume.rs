use serde::{Deserialize, Serialize};

/// Structured fields pulled out of a single resume. Field order is the
/// order written to the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub raw_text: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResume {
    pub rank: usize,
    pub name: String,
    pub score: f64,
}

impl RankedResume {
    /// Numbers scored resumes from 1 in the order given.
    pub fn from_scored(scored: &[(&ParsedResume, f64)]) -> Vec<Self> {
        scored
            .iter()
            .enumerate()
            .map(|(idx, (resume, score))| RankedResume {
                rank: idx + 1,
                name: resume.name.clone(),
                score: *score,
            })
            .collect()
    }
}
