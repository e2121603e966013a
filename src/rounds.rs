use crate::models::CutoffRecord;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn round_label_regex() -> &'static Regex {
    static ROUND_LABEL: OnceLock<Regex> = OnceLock::new();
    ROUND_LABEL.get_or_init(|| Regex::new(r"^(?i)round[-_ ]?(\d+)$").unwrap())
}

/// Extracts the counselling round number from labels like `Round-3`.
///
/// Returns `None` for anything else so malformed labels can be rejected
/// instead of sorting ahead of real rounds.
pub fn round_ordinal(label: &str) -> Option<u32> {
    round_label_regex()
        .captures(label.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|ordinal| *ordinal > 0)
}

/// Identity of a seat across years and rounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub college_slug: String,
    pub course: String,
    pub branch: String,
}

impl GroupKey {
    pub fn of(record: &CutoffRecord) -> Self {
        Self {
            college_slug: record.college_slug.clone(),
            course: record.course.clone(),
            branch: record.branch.clone(),
        }
    }
}

/// Every filtered record for one seat, plus the one the prediction is based on.
#[derive(Debug, Clone)]
pub struct PredictionGroup<'a> {
    pub key: GroupKey,
    pub records: Vec<&'a CutoffRecord>,
    pub representative: &'a CutoffRecord,
}

/// Groups records by seat, keeping groups in order of first appearance.
pub fn group_records<'a>(records: &[&'a CutoffRecord]) -> Vec<(GroupKey, Vec<&'a CutoffRecord>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<&'a CutoffRecord>)> = Vec::new();

    for &record in records {
        let key = GroupKey::of(record);
        match index.get(&key) {
            Some(&position) => groups[position].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    groups
}

/// A candidate is eligible for a seat when their rank is at or better than
/// the seat's closing rank.
pub fn is_eligible(record: &CutoffRecord, candidate_rank: u32) -> bool {
    record.closing_rank >= candidate_rank as f64
}

/// Picks the earliest round the candidate would have cleared.
///
/// Equal ordinals prefer the most recent year, then input order.
pub fn first_eligible_round<'a>(
    records: &[&'a CutoffRecord],
    candidate_rank: u32,
) -> Option<&'a CutoffRecord> {
    records
        .iter()
        .copied()
        .filter(|record| is_eligible(record, candidate_rank))
        .min_by_key(|record| (record.round_ordinal, std::cmp::Reverse(record.year)))
}

/// Groups the filtered records and keeps only seats with at least one
/// round the candidate clears.
pub fn select_rounds<'a>(
    records: &[&'a CutoffRecord],
    candidate_rank: u32,
) -> Vec<PredictionGroup<'a>> {
    group_records(records)
        .into_iter()
        .filter_map(|(key, records)| {
            let representative = first_eligible_round(&records, candidate_rank)?;
            Some(PredictionGroup {
                key,
                records,
                representative,
            })
        })
        .collect()
}
