use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

// Two or more word characters, the default scikit-learn token shape.
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

/// A fitted TF-IDF transform: text in, fixed-width feature vector out.
#[derive(Deserialize, Debug, Clone)]
pub struct TfidfVectorizer {
    /// Term (or space-joined n-gram) to column index.
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_lowercase() -> bool {
    true
}

impl TfidfVectorizer {
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.idf.is_empty() {
            return Err("vectorizer has an empty idf table".to_string());
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        if let Some((term, column)) = self.vocabulary.iter().find(|(_, column)| **column >= self.idf.len()) {
            return Err(format!("term '{}' maps to column {} outside the idf table", term, column));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err("idf weights must be finite".to_string());
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range [{}, {}]", min_n, max_n));
        }
        Ok(())
    }

    pub fn transform(&self, text: &str) -> Vec<f64> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = TOKEN_PATTERN.find_iter(&text).map(|m| m.as_str()).collect();

        let mut features = vec![0.0f64; self.idf.len()];
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&column) = self.vocabulary.get(&gram) {
                    features[column] += 1.0;
                }
            }
        }

        for (value, idf) in features.iter_mut().zip(&self.idf) {
            if *value > 0.0 {
                let tf = if self.sublinear_tf { 1.0 + value.ln() } else { *value };
                *value = tf * idf;
            }
        }

        let length = match self.norm {
            Norm::L2 => features.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Norm::L1 => features.iter().map(|v| v.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        if length > 0.0 {
            features.iter_mut().for_each(|v| *v /= length);
        }
        features
    }
}
