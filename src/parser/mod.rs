pub mod experience;
pub mod extract;
pub mod ruler;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::models::resume::ParsedResume;
use crate::parser::experience::extract_experience;
use crate::parser::extract::{SourceKind, clean_text, extract_text};
use crate::parser::ruler::{EntityLabel, EntityRuler};
use crate::utils::cache::TextCache;

pub struct ResumeParser {
    ruler: EntityRuler,
    cache: Option<TextCache>,
}

impl ResumeParser {
    pub fn new(ruler: EntityRuler) -> Self {
        Self { ruler, cache: None }
    }

    pub fn with_cache(mut self, cache: TextCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Cleans `text` and pulls skills, education and experience out of it.
    pub fn parse_text(&self, name: &str, text: &str) -> ParsedResume {
        let text = clean_text(text);
        self.parse_clean(name, text)
    }

    fn parse_clean(&self, name: &str, text: String) -> ParsedResume {
        let entities = self.ruler.entities(&text);

        ParsedResume {
            skills: EntityRuler::unique_texts(&entities, EntityLabel::Skill),
            education: EntityRuler::unique_texts(&entities, EntityLabel::Degree),
            experience: extract_experience(&text),
            raw_text: text,
            name: name.to_string(),
        }
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedResume> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| eyre!("resume path has no file name: {}", path.display()))?;

        let text = match self.cache.as_ref().and_then(|c| c.get(path)) {
            Some(cached) => cached,
            None => {
                let text = clean_text(&extract_text(path)?);
                if let Some(cache) = &self.cache
                    && let Err(e) = cache.put(path, &text)
                {
                    debug!("failed to cache text for {}: {}", path.display(), e);
                }
                text
            }
        };

        let resume = self.parse_clean(&name, text);
        debug!(
            "parsed {}: {} skills, {} degrees, {} experience ranges",
            resume.name,
            resume.skills.len(),
            resume.education.len(),
            resume.experience.len()
        );
        Ok(resume)
    }

    /// Parses every path in parallel. Failures are logged and skipped; the
    /// remaining resumes keep their input order and get unique names.
    pub fn parse_all(&self, paths: &[PathBuf]) -> Vec<ParsedResume> {
        info!("parsing {} resumes (parallel)", paths.len());

        let mut resumes: Vec<ParsedResume> = paths
            .par_iter()
            .map(|path| (path, self.parse_file(path)))
            .collect::<Vec<_>>()
            .into_iter()
            .filter_map(|(path, result)| match result {
                Ok(resume) => Some(resume),
                Err(e) => {
                    warn!("skipping {}: {:#}", path.display(), e);
                    None
                }
            })
            .collect();

        disambiguate_names(&mut resumes);
        resumes
    }
}

/// Gives repeated names a `_2`, `_3`, ... suffix so per-resume exports
/// never overwrite each other. The first occurrence keeps its name.
fn disambiguate_names(resumes: &mut [ParsedResume]) {
    let originals: HashSet<String> = resumes.iter().map(|r| r.name.clone()).collect();
    let mut seen: HashSet<String> = HashSet::new();

    for resume in resumes.iter_mut() {
        if seen.insert(resume.name.clone()) {
            continue;
        }

        let mut n = 2;
        let renamed = loop {
            let candidate = format!("{}_{}", resume.name, n);
            if !originals.contains(&candidate) && !seen.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };

        warn!("duplicate resume name {}, exporting as {}", resume.name, renamed);
        seen.insert(renamed.clone());
        resume.name = renamed;
    }
}

/// Expands CLI inputs into resume files. Directories are scanned one level
/// deep for supported files, sorted by path.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)
                .wrap_err_with(|| format!("failed to read directory {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && SourceKind::from_path(p).is_some())
                .collect();
            found.sort();
            debug!("found {} resumes in {}", found.len(), input.display());
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            warn!("input not found: {}", input.display());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::default_patterns;

    fn parser() -> ResumeParser {
        ResumeParser::new(EntityRuler::new(&default_patterns(), true))
    }

    #[test]
    fn parses_all_fields() {
        let text = "Priya Doe\nPhD, Masters, PhD\nSkills: Python | SQL | Machine Learning\n\
                    Acme Jan 2020 - Present\nGlobex Mar 2016 - Dec 2019";
        let resume = parser().parse_text("priya", text);

        assert_eq!(resume.name, "priya");
        assert_eq!(resume.skills, vec!["Python", "SQL", "Machine Learning"]);
        assert_eq!(resume.education, vec!["PhD", "Masters"]);
        assert_eq!(resume.experience, vec!["Jan 2020 - Present", "Mar 2016 - Dec 2019"]);
        assert!(!resume.raw_text.contains('|'));
        assert!(!resume.raw_text.contains('\n'));
    }

    #[test]
    fn parse_all_skips_failures_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let b = dir.path().join("b.txt");
        let a = dir.path().join("a.txt");
        let broken = dir.path().join("broken.pdf");
        fs::write(&b, "SQL").unwrap();
        fs::write(&a, "Python").unwrap();
        fs::write(&broken, "nope").unwrap();

        let resumes = parser().parse_all(&[b, broken, a]);
        let names: Vec<&str> = resumes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn month_prefix_inside_a_word_starts_a_range() {
        let resume = parser().parse_text("jane", "Jane Doe Jan 2020 - Present");
        assert_eq!(resume.experience, vec!["Jane Doe Jan 2020 - Present"]);
    }

    #[test]
    fn same_stem_in_different_folders_gets_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        for (sub, body) in [("a", "Python"), ("b", "SQL"), ("c", "PhD")] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("cv.txt"), body).unwrap();
        }
        fs::write(dir.path().join("cv_2.txt"), "Masters").unwrap();

        let paths = vec![
            dir.path().join("a/cv.txt"),
            dir.path().join("b/cv.txt"),
            dir.path().join("cv_2.txt"),
            dir.path().join("c/cv.txt"),
        ];
        let resumes = parser().parse_all(&paths);
        let names: Vec<&str> = resumes.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["cv", "cv_3", "cv_2", "cv_4"]);
        assert_eq!(resumes[0].skills, vec!["Python"]);
        assert_eq!(resumes[1].skills, vec!["SQL"]);
    }

    #[test]
    fn parses_a_two_page_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("priya.pdf");
        fs::write(&path, fixtures::two_page_pdf("Python developer", "SQL analyst")).unwrap();

        let resume = parser().parse_file(&path).unwrap();
        assert_eq!(resume.name, "priya");
        assert_eq!(resume.skills, vec!["Python", "SQL"]);
        assert!(!resume.raw_text.contains('\n'));
    }

    #[test]
    fn cache_is_used_on_second_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        fs::write(&path, "Python").unwrap();

        let cache = TextCache::init(dir.path().join("cache")).unwrap();
        cache.put(&path, "SQL").unwrap();

        let resume = parser().with_cache(cache).parse_file(&path).unwrap();
        assert_eq!(resume.skills, vec!["SQL"]);
    }

    #[test]
    fn collects_supported_files_from_directories() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.txt", "notes.md"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        let single = dir.path().join("notes.md");

        let files = collect_inputs(&[dir.path().to_path_buf(), single.clone()]).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.txt"), dir.path().join("b.pdf"), single]
        );
    }

    #[test]
    fn missing_inputs_are_skipped() {
        let files = collect_inputs(&[PathBuf::from("/definitely/not/here.pdf")]).unwrap();
        assert!(files.is_empty());
    }
}
