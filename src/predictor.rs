use crate::eligibility;
use crate::error::PredictionError;
use crate::history;
use crate::loader::{DataSource, DatasetLoader};
use crate::models::{CutoffRecord, PredictionQuery, PredictionResult, RecordDefaults};
use crate::ranker;
use crate::rounds::{self, PredictionGroup};
use crate::scoring;
use tracing::{debug, info};

pub struct AdmissionPredictor<S: DataSource> {
    loader: DatasetLoader<S>,
}

impl<S: DataSource> AdmissionPredictor<S> {
    pub fn new(source: S, defaults: RecordDefaults) -> Self {
        Self {
            loader: DatasetLoader::new(source, defaults),
        }
    }

    pub fn loader(&self) -> &DatasetLoader<S> {
        &self.loader
    }

    /// Loads the dataset on first use and predicts for one candidate.
    ///
    /// Fails only when the dataset cannot be obtained; no eligible seats is
    /// an empty result.
    pub async fn predict(
        &self,
        query: &PredictionQuery,
    ) -> Result<Vec<PredictionResult>, PredictionError> {
        let records = self.loader.load().await?;
        let results = predict_from(&records, query);
        info!(
            exam = %query.exam_type,
            rank = query.rank,
            results = results.len(),
            "prediction complete"
        );
        Ok(results)
    }
}

/// Runs the filtering, round selection, scoring and ranking stages over
/// already loaded records.
pub fn predict_from(records: &[CutoffRecord], query: &PredictionQuery) -> Vec<PredictionResult> {
    let filtered = eligibility::filter(records, query);
    debug!(
        considered = records.len(),
        matched = filtered.len(),
        "eligibility filter applied"
    );

    let groups = rounds::select_rounds(&filtered, query.rank);
    debug!(groups = groups.len(), "seats with a reachable round");

    let results = groups
        .iter()
        .map(|group| build_result(group, query.rank))
        .collect();

    ranker::rank(results)
}

fn build_result(group: &PredictionGroup<'_>, candidate_rank: u32) -> PredictionResult {
    let representative = group.representative;
    let score = scoring::score(representative, candidate_rank);

    PredictionResult {
        college_slug: representative.college_slug.clone(),
        college_name: representative.college_name.clone(),
        state: representative.state.clone(),
        nirf_rank: representative.nirf_rank.clone(),
        fees: representative.fees.clone(),
        avg_salary: representative.avg_salary.clone(),
        course: representative.course.clone(),
        branch: representative.branch.clone(),
        quota: representative.quota.clone(),
        seat_type: representative.seat_type.clone(),
        sub_category: representative.sub_category.clone(),
        branch_weight: representative.branch_weight,
        college_weight: representative.college_weight,
        rank_score: score.rank_score,
        final_score: score.final_score,
        all_rounds_cutoff: history::summarize(&group.records),
        round: representative.round.clone(),
        year: representative.year,
        closing_rank: representative.closing_rank,
    }
}
