use crate::models::{same_text, CutoffRecord, PredictionQuery, Quota};

/// Home-state seats are only open to residents of the college's state.
pub fn quota_allows(record: &CutoffRecord, home_state: &str) -> bool {
    match record.quota {
        Quota::HomeState => same_text(&record.state, home_state),
        _ => true,
    }
}

/// Narrows the dataset to the rows that describe seats this candidate could hold.
pub fn filter<'a>(records: &'a [CutoffRecord], query: &PredictionQuery) -> Vec<&'a CutoffRecord> {
    records
        .iter()
        .filter(|record| same_text(&record.exam_type, &query.exam_type))
        .filter(|record| same_text(&record.seat_type, &query.seat_type))
        .filter(|record| same_text(&record.sub_category, &query.sub_category))
        .filter(|record| quota_allows(record, &query.home_state))
        .collect()
}
