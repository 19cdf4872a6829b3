pub mod tfidf;

use eyre::Result;
use log::debug;

use crate::models::resume::ParsedResume;
use crate::ranking::tfidf::{TfidfVectorizer, cosine_similarity};

/// Scores each resume against the job description and sorts by score,
/// highest first. Ties keep their input order.
pub fn rank_resumes<'a>(
    resumes: &'a [ParsedResume],
    job_description: &str,
) -> Result<Vec<(&'a ParsedResume, f64)>> {
    let vectorizer = TfidfVectorizer::fit(&[job_description])?;
    debug!("job description vocabulary: {} terms", vectorizer.vocabulary_len());

    let job_vec = vectorizer.transform(job_description);

    let mut scored: Vec<(&ParsedResume, f64)> = resumes
        .iter()
        .map(|resume| {
            let resume_vec = vectorizer.transform(&resume.raw_text);
            (resume, cosine_similarity(&job_vec, &resume_vec))
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(name: &str, text: &str) -> ParsedResume {
        ParsedResume {
            skills: vec![],
            education: vec![],
            experience: vec![],
            raw_text: text.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn best_match_comes_first() {
        let resumes = vec![
            resume("chef", "pastry chef with ten years in kitchens"),
            resume("data", "python sql machine learning engineer"),
            resume("web", "javascript engineer with some python"),
        ];

        let ranked = rank_resumes(&resumes, "Python engineer with SQL and machine learning").unwrap();
        let names: Vec<&str> = ranked.iter().map(|(r, _)| r.name.as_str()).collect();

        assert_eq!(names, vec!["data", "web", "chef"]);
        assert!(ranked[0].1 > ranked[1].1);
        assert!(ranked.iter().all(|(_, s)| (0.0..=1.0 + 1e-9).contains(s)));
    }

    #[test]
    fn ties_keep_input_order() {
        let resumes = vec![resume("first", "nothing relevant"), resume("second", "also unrelated")];

        let ranked = rank_resumes(&resumes, "rust developer").unwrap();
        let names: Vec<&str> = ranked.iter().map(|(r, _)| r.name.as_str()).collect();

        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(ranked[0].1, 0.0);
    }

    #[test]
    fn blank_job_description_fails() {
        let resumes = vec![resume("a", "python")];
        assert!(rank_resumes(&resumes, "  ").is_err());
    }
}
