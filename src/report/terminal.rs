use colored::Colorize;

use crate::models::resume::{ParsedResume, RankedResume};

pub fn print_ranking(ranking: &[RankedResume]) {
    println!("\n{}", "=== Ranking Results ===".cyan().bold());
    for entry in ranking {
        println!("{}", ranking_line(entry));
    }
}

fn ranking_line(entry: &RankedResume) -> String {
    format!(
        "{}. {} (Score: {})",
        entry.rank,
        entry.name.bold(),
        format!("{:.2}", entry.score).yellow()
    )
}

pub fn print_analysis(resumes: &[ParsedResume]) {
    println!("\n{}", "=== Resume Analysis ===".cyan().bold());

    for resume in resumes {
        println!("\n{} {}", "▸".cyan(), resume.name.bold());
        print_section("Skills", &resume.skills);
        print_section("Education", &resume.education);
        print_section("Experience", &resume.experience);
    }
}

fn print_section(title: &str, items: &[String]) {
    println!("  {}", title.underline());
    if items.is_empty() {
        println!("    {}", "none found".dimmed());
    }
    for item in items {
        println!("    • {}", item);
    }
}
