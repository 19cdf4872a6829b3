use serde::{Deserialize, Serialize};

const EDGE_PUNCTUATION: &[char] = &[',', '.', '-'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Degree,
    Skill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPattern {
    pub label: EntityLabel,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    label: EntityLabel,
    tokens: Vec<String>,
}

/// Phrase matcher over whitespace tokens. At each position the longest
/// pattern wins and matches never overlap.
#[derive(Debug, Clone)]
pub struct EntityRuler {
    // longest first, so the first hit at a position is the one to keep
    patterns: Vec<CompiledPattern>,
    case_sensitive: bool,
}

impl EntityRuler {
    pub fn new(patterns: &[EntityPattern], case_sensitive: bool) -> Self {
        let mut compiled: Vec<CompiledPattern> = patterns
            .iter()
            .map(|p| CompiledPattern {
                label: p.label,
                tokens: tokenize(&p.pattern)
                    .into_iter()
                    .map(|t| normalize(t, case_sensitive))
                    .collect(),
            })
            .filter(|p| !p.tokens.is_empty())
            .collect();
        compiled.sort_by_key(|p| std::cmp::Reverse(p.tokens.len()));

        Self {
            patterns: compiled,
            case_sensitive,
        }
    }

    pub fn entities(&self, text: &str) -> Vec<Entity> {
        let tokens = tokenize(text);
        let normalized: Vec<String> = tokens
            .iter()
            .map(|t| normalize(t, self.case_sensitive))
            .collect();

        let mut entities = Vec::new();
        let mut pos = 0;
        while pos < tokens.len() {
            let hit = self.patterns.iter().find(|p| {
                normalized
                    .get(pos..pos + p.tokens.len())
                    .is_some_and(|window| window == p.tokens.as_slice())
            });

            match hit {
                Some(pattern) => {
                    let end = pos + pattern.tokens.len();
                    entities.push(Entity {
                        label: pattern.label,
                        text: tokens[pos..end].join(" "),
                    });
                    pos = end;
                }
                None => pos += 1,
            }
        }

        entities
    }

    /// Unique entity texts carrying `label`, in first-seen order.
    pub fn unique_texts(entities: &[Entity], label: EntityLabel) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for entity in entities.iter().filter(|e| e.label == label) {
            if !out.contains(&entity.text) {
                out.push(entity.text.clone());
            }
        }
        out
    }
}

/// Splits on whitespace and on joining punctuation (see [`split_infixes`]),
/// then peels `,` `.` `-` off token edges. Other inner punctuation such as
/// in `B.Sc` is kept.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .flat_map(split_infixes)
        .map(|t| t.trim_matches(EDGE_PUNCTUATION))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Breaks a chunk at `-` between an alphanumeric and a letter, at `,`
/// between two letters, and at `.` between a lowercase and an uppercase
/// letter. The joining character is dropped.
fn split_infixes(chunk: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut pieces = Vec::new();
    let mut start = 0;

    for window in chars.windows(3) {
        let [(_, before), (idx, mid), (_, after)] = [window[0], window[1], window[2]];
        let split = match mid {
            '-' => before.is_alphanumeric() && after.is_alphabetic(),
            ',' => before.is_alphabetic() && after.is_alphabetic(),
            '.' => before.is_lowercase() && after.is_uppercase(),
            _ => false,
        };
        if split {
            pieces.push(&chunk[start..idx]);
            start = idx + mid.len_utf8();
        }
    }

    pieces.push(&chunk[start..]);
    pieces
}

fn normalize(token: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        token.to_string()
    } else {
        token.to_lowercase()
    }
}
