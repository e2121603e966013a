//! Admission prediction over historical counselling cutoffs.
//!
//! Given a candidate's exam, rank, category and home state, the engine finds
//! the college/course/branch seats they would have cleared in past rounds and
//! ranks them by rank proximity and curated desirability.

pub mod eligibility;
pub mod error;
pub mod history;
pub mod loader;
pub mod models;
pub mod predictor;
pub mod ranker;
pub mod report;
pub mod rounds;
pub mod scoring;

pub use error::PredictionError;
pub use loader::{DataSource, DatasetLoader, DatasetSource, FileSource, HttpSource, LoadStatus};
pub use models::{Config, CutoffRecord, PredictionQuery, PredictionResult, Quota, RecordDefaults};
pub use predictor::{predict_from, AdmissionPredictor};
