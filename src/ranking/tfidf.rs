use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use eyre::{Result, eyre};
use regex::Regex;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token regex is valid"));

/// Lowercased tokens of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// TF-IDF vectorizer with smoothed idf and L2-normalized rows.
///
/// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, where `n` is the number of
/// fitted documents. Terms outside the fitted vocabulary are ignored by
/// [`TfidfVectorizer::transform`].
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        let tokenized: Vec<BTreeSet<String>> = documents
            .iter()
            .map(|d| tokenize(d.as_ref()).into_iter().collect())
            .collect();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for terms in &tokenized {
            for term in terms {
                *document_frequency.entry(term.clone()).or_default() += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(eyre!(
                "empty vocabulary; the documents contain no terms of two or more characters"
            ));
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        Ok(Self { vocabulary, idf })
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                row[idx] += 1.0;
            }
        }

        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = l2_norm(&row);
        if norm > 0.0 {
            row.iter_mut().for_each(|v| *v /= norm);
        }
        row
    }
}

fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine of the angle between `a` and `b`; 0 when either is a zero vector.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let denom = l2_norm(a) * l2_norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>() / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn tokenizer_drops_single_characters_and_lowercases() {
        assert_eq!(tokenize("C, R and Go-Lang! SQL"), vec!["and", "go", "lang", "sql"]);
    }

    #[test]
    fn single_document_fit_has_unit_idf() {
        let v = TfidfVectorizer::fit(&["python python sql"]).unwrap();
        assert_eq!(v.vocabulary_len(), 2);

        // python=2, sql=1 -> (2, 1) / sqrt(5)
        let row = v.transform("python python sql");
        assert!(approx(row[0], 2.0 / 5f64.sqrt()));
        assert!(approx(row[1], 1.0 / 5f64.sqrt()));
    }

    #[test]
    fn smoothed_idf_weights_rare_terms_higher() {
        let v = TfidfVectorizer::fit(&["rust python", "python"]).unwrap();
        // vocabulary sorted: python, rust
        assert!(approx(v.idf[0], 1.0));
        assert!(approx(v.idf[1], (3.0f64 / 2.0).ln() + 1.0));
    }

    #[test]
    fn unknown_terms_give_zero_vector() {
        let v = TfidfVectorizer::fit(&["python"]).unwrap();
        let row = v.transform("haskell ocaml");
        assert!(row.iter().all(|x| *x == 0.0));
        assert_eq!(cosine_similarity(&row, &v.transform("python")), 0.0);
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        assert!(TfidfVectorizer::fit(&["a b c !"]).is_err());
        assert!(TfidfVectorizer::fit::<&str>(&[]).is_err());
    }

    #[test]
    fn cosine_of_identical_documents_is_one() {
        let v = TfidfVectorizer::fit(&["senior python engineer"]).unwrap();
        let a = v.transform("Senior Python engineer");
        assert!(approx(cosine_similarity(&a, &a), 1.0));
    }
}
