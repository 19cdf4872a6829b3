use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use chrono::{DateTime, Utc};
use eyre::Result;

use crate::models::resume::{ParsedResume, RankedResume};
use crate::report::export::{resume_csv, resume_json};

static TEMPLATE: &str = include_str!("template.html");

/// Renders the self-contained HTML dashboard.
pub struct DashboardAssembler<'a> {
    resumes: &'a [ParsedResume],
    ranking: &'a [RankedResume],
    generated_at: DateTime<Utc>,
}

impl<'a> DashboardAssembler<'a> {
    pub fn new(resumes: &'a [ParsedResume], ranking: &'a [RankedResume]) -> Self {
        Self {
            resumes,
            ranking,
            generated_at: Utc::now(),
        }
    }

    pub fn assemble(&self) -> Result<String> {
        Ok(TEMPLATE
            .replace(
                "<<GENERATED_AT>>",
                &self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            )
            .replace("<<RESUME_COUNT>>", &self.resumes.len().to_string())
            .replace("<<RANKING>>", &self.ranking_section())
            .replace("<<RESUMES>>", &self.resume_sections()?))
    }

    fn ranking_section(&self) -> String {
        if self.ranking.is_empty() {
            return String::new();
        }

        let mut out = String::from("<h2>Ranking Results</h2>\n<ol class=\"ranking\">\n");
        for entry in self.ranking {
            out.push_str(&format!(
                "  <li><strong>{}</strong> <span class=\"score\">(Score: {:.2})</span></li>\n",
                Self::escape_html(&entry.name),
                entry.score
            ));
        }
        out.push_str("</ol>");
        out
    }

    fn resume_sections(&self) -> Result<String> {
        self.resumes
            .iter()
            .map(Self::resume_section)
            .collect::<Result<Vec<String>>>()
            .map(|sections| sections.join("\n"))
    }

    fn resume_section(resume: &ParsedResume) -> Result<String> {
        let name = Self::escape_html(&resume.name);
        let json = Self::data_uri("application/json", &resume_json(resume)?);
        let csv = Self::data_uri("text/csv", &resume_csv(resume)?);

        Ok(format!(
            "<details>\n<summary>{name}</summary>\n<div class=\"columns\">\n{}{}{}</div>\n\
             <p class=\"downloads\"><a download=\"{name}_analysis.json\" href=\"{json}\">Download JSON</a>\
             <a download=\"{name}_analysis.csv\" href=\"{csv}\">Download CSV</a></p>\n</details>",
            Self::column("Skills", &resume.skills),
            Self::column("Education", &resume.education),
            Self::column("Experience", &resume.experience),
        ))
    }

    fn column(title: &str, items: &[String]) -> String {
        let mut out = format!("<div>\n<h3>{}</h3>\n", title);
        if items.is_empty() {
            out.push_str("<p class=\"empty\">none found</p>\n");
        } else {
            out.push_str("<ul>\n");
            for item in items {
                out.push_str(&format!("  <li>{}</li>\n", Self::escape_html(item)));
            }
            out.push_str("</ul>\n");
        }
        out.push_str("</div>\n");
        out
    }

    fn data_uri(mime: &str, content: &str) -> String {
        format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(content))
    }

    fn escape_html(text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&#39;"),
                _ => result.push(c),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(name: &str) -> ParsedResume {
        ParsedResume {
            skills: vec!["Python".into()],
            education: vec![],
            experience: vec!["Jan 2020 - Present".into()],
            raw_text: "Python Jan 2020 - Present".into(),
            name: name.into(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            DashboardAssembler::escape_html(r#"<b>"R&D" 'x'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;x&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn renders_ranking_and_sections() {
        let resumes = vec![resume("jane<doe>")];
        let ranking = vec![RankedResume {
            rank: 1,
            name: "jane<doe>".into(),
            score: 0.8765,
        }];

        let html = DashboardAssembler::new(&resumes, &ranking).assemble().unwrap();

        assert!(html.contains("<h2>Ranking Results</h2>"));
        assert!(html.contains("<strong>jane&lt;doe&gt;</strong> <span class=\"score\">(Score: 0.88)</span>"));
        assert!(html.contains("<summary>jane&lt;doe&gt;</summary>"));
        assert!(html.contains("<li>Jan 2020 - Present</li>"));
        assert!(html.contains("<p class=\"empty\">none found</p>"));
        assert!(html.contains("from 1 resume(s)"));
        assert!(!html.contains("<<"));
    }

    #[test]
    fn download_links_embed_exports() {
        let resumes = vec![resume("jane")];
        let html = DashboardAssembler::new(&resumes, &[]).assemble().unwrap();

        let expected = BASE64_STANDARD.encode(resume_csv(&resumes[0]).unwrap());
        assert!(html.contains(&format!("href=\"data:text/csv;base64,{}\"", expected)));
        assert!(html.contains("download=\"jane_analysis.json\""));
        assert!(!html.contains("Ranking Results"));
    }
}
