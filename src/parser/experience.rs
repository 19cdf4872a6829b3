use std::sync::LazyLock;

use regex::Regex;

const MONTH: &str = "(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)({MONTH}[a-z\s\-,]*\d{{4}})[\s–\-]+(present|{MONTH}[a-z\s\-,]*\d{{4}})"
    ))
    .expect("date range regex is valid")
});

/// Employment date ranges such as `Jan 2020 - Present`, in text order.
pub fn extract_experience(text: &str) -> Vec<String> {
    DATE_RANGE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
