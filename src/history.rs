use crate::models::CutoffRecord;
use std::collections::BTreeMap;

/// Renders every year and round of a seat's history, most recent year first:
/// `Round-1: 120, Round-2: 180 | Round-1: 140`.
pub fn summarize(records: &[&CutoffRecord]) -> String {
    let mut by_year: BTreeMap<i32, Vec<&CutoffRecord>> = BTreeMap::new();
    for &record in records {
        by_year.entry(record.year).or_default().push(record);
    }

    by_year
        .into_iter()
        .rev()
        .map(|(_, mut rounds)| {
            rounds.sort_by_key(|record| record.round_ordinal);
            rounds
                .iter()
                .map(|record| format!("{}: {}", record.round, record.closing_rank.round() as i64))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quota;

    fn record(year: i32, round: &str, ordinal: u32, closing_rank: f64) -> CutoffRecord {
        CutoffRecord {
            college_slug: "nit-x".to_string(),
            college_name: "NIT X".to_string(),
            state: "Delhi".to_string(),
            nirf_rank: String::new(),
            fees: String::new(),
            avg_salary: String::new(),
            course: "B.Tech".to_string(),
            branch: "CSE".to_string(),
            quota: Quota::AllIndia,
            seat_type: "OPEN".to_string(),
            sub_category: "Gender-Neutral".to_string(),
            exam_type: "JEE-Main".to_string(),
            year,
            round: round.to_string(),
            round_ordinal: ordinal,
            closing_rank,
            branch_weight: 70.0,
            college_weight: 70.0,
        }
    }

    #[test]
    fn years_descend_and_rounds_ascend() {
        let a = record(2023, "Round-2", 2, 1500.0);
        let b = record(2024, "Round-3", 3, 1700.4);
        let c = record(2023, "Round-1", 1, 1200.0);
        let d = record(2024, "Round-1", 1, 1300.6);

        let summary = summarize(&[&a, &b, &c, &d]);
        assert_eq!(
            summary,
            "Round-1: 1301, Round-3: 1700 | Round-1: 1200, Round-2: 1500"
        );
    }

    #[test]
    fn single_record_has_no_separators() {
        let a = record(2024, "Round-1", 1, 500.0);
        assert_eq!(summarize(&[&a]), "Round-1: 500");
    }

    #[test]
    fn empty_group_renders_empty_string() {
        assert_eq!(summarize(&[]), "");
    }
}
