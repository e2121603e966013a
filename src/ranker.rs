use crate::models::PredictionResult;

/// Orders results best-first. The sort is stable, so equal scores keep the
/// order the grouping stage produced.
pub fn rank(mut results: Vec<PredictionResult>) -> Vec<PredictionResult> {
    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quota;

    fn result(slug: &str, final_score: f64) -> PredictionResult {
        PredictionResult {
            college_slug: slug.to_string(),
            college_name: slug.to_string(),
            state: String::new(),
            nirf_rank: String::new(),
            fees: String::new(),
            avg_salary: String::new(),
            course: "B.Tech".to_string(),
            branch: "CSE".to_string(),
            quota: Quota::AllIndia,
            seat_type: "OPEN".to_string(),
            sub_category: "Gender-Neutral".to_string(),
            branch_weight: 70.0,
            college_weight: 70.0,
            rank_score: 0.0,
            final_score,
            all_rounds_cutoff: String::new(),
            round: "Round-1".to_string(),
            year: 2024,
            closing_rank: 100.0,
        }
    }

    #[test]
    fn sorts_descending_by_final_score() {
        let ranked = rank(vec![result("a", 0.2), result("b", 0.9), result("c", 0.5)]);
        let slugs: Vec<&str> = ranked.iter().map(|r| r.college_slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank(vec![
            result("first", 0.5),
            result("top", 0.7),
            result("second", 0.5),
            result("third", 0.5),
        ]);
        let slugs: Vec<&str> = ranked.iter().map(|r| r.college_slug.as_str()).collect();
        assert_eq!(slugs, vec!["top", "first", "second", "third"]);
    }
}
