// src/pipeline/classifier/mod.rs

pub mod forest;
pub mod tfidf;

use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::data_model::ClassificationResult;
use crate::error::{PipelineError, Result};

pub use forest::{DecisionTree, RandomForest};
pub use tfidf::{Norm, TfidfVectorizer};

pub const CATEGORY_VECTORIZER_FILE: &str = "tfidf_vectorizer_categorization.json";
pub const CATEGORY_FOREST_FILE: &str = "rf_classifier_categorization.json";
pub const JOB_VECTORIZER_FILE: &str = "tfidf_vectorizer_job_recommendation.json";
pub const JOB_FOREST_FILE: &str = "rf_classifier_job_recommendation.json";

/// Maps normalized text to a single label.
///
/// Implementations must be pure: the same text always yields the same label,
/// and calls from several threads at once need no locking.
pub trait TextClassifier: Send + Sync {
    fn classify(&self, normalized_text: &str) -> String;
}

/// A TF-IDF vectorizer feeding a random forest.
#[derive(Debug, Clone)]
pub struct TfidfForestModel {
    vectorizer: TfidfVectorizer,
    forest: RandomForest,
}

impl TfidfForestModel {
    /// Checks both halves and that the vectorizer width matches what the
    /// forest was trained on.
    pub fn new(vectorizer: TfidfVectorizer, forest: RandomForest) -> std::result::Result<Self, String> {
        vectorizer.validate()?;
        forest.validate()?;
        if vectorizer.n_features() != forest.n_features {
            return Err(format!(
                "vectorizer produces {} features but forest expects {}",
                vectorizer.n_features(),
                forest.n_features
            ));
        }
        Ok(TfidfForestModel { vectorizer, forest })
    }

    #[instrument(name = "load_model")]
    pub fn load(vectorizer_path: &Path, forest_path: &Path) -> Result<Self> {
        let vectorizer: TfidfVectorizer = read_artifact(vectorizer_path)?;
        let forest: RandomForest = read_artifact(forest_path)?;
        let classes = forest.classes.len();
        let model = Self::new(vectorizer, forest).map_err(|reason| PipelineError::ModelLoadError {
            path: forest_path.display().to_string(),
            reason,
        })?;
        info!(classes, features = model.forest.n_features, "Model loaded");
        Ok(model)
    }

    pub fn labels(&self) -> &[String] {
        &self.forest.classes
    }
}

impl TextClassifier for TfidfForestModel {
    fn classify(&self, normalized_text: &str) -> String {
        let features = self.vectorizer.transform(normalized_text);
        self.forest.predict(&features).to_string()
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let model_error = |reason: String| PipelineError::ModelLoadError {
        path: path.display().to_string(),
        reason,
    };
    let content = fs::read_to_string(path).map_err(|e| model_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| model_error(e.to_string()))
}

/// The two classifiers the pipeline needs, built once and then shared
/// read-only by every worker.
pub struct ModelBundle {
    category: Box<dyn TextClassifier>,
    job: Box<dyn TextClassifier>,
}

impl fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBundle").finish_non_exhaustive()
    }
}

impl ModelBundle {
    pub fn new(category: Box<dyn TextClassifier>, job: Box<dyn TextClassifier>) -> Self {
        ModelBundle { category, job }
    }

    /// Loads the category and job-recommendation models from `model_dir`.
    ///
    /// Any missing, unreadable or inconsistent artifact is a `ModelLoadError`;
    /// callers are expected to stop rather than run without a classifier.
    #[instrument]
    pub fn load(model_dir: &Path) -> Result<Self> {
        let category = TfidfForestModel::load(
            &model_dir.join(CATEGORY_VECTORIZER_FILE),
            &model_dir.join(CATEGORY_FOREST_FILE),
        )?;
        let job = TfidfForestModel::load(
            &model_dir.join(JOB_VECTORIZER_FILE),
            &model_dir.join(JOB_FOREST_FILE),
        )?;
        Ok(ModelBundle::new(Box::new(category), Box::new(job)))
    }

    pub fn classify(&self, normalized_text: &str) -> ClassificationResult {
        ClassificationResult {
            category: self.category.classify(normalized_text),
            recommended_job: self.job.classify(normalized_text),
        }
    }
}
