use crate::models::CutoffRecord;

/// Share of the final score taken by closeness to the historical cutoff.
pub const RANK_PROXIMITY_WEIGHT: f64 = 0.4;
pub const BRANCH_WEIGHT: f64 = 0.3;
pub const COLLEGE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub rank_score: f64,
    pub final_score: f64,
}

/// How close the candidate sits to the closing rank, in [0, 1].
pub fn rank_score(candidate_rank: u32, closing_rank: f64) -> f64 {
    if !closing_rank.is_finite() || closing_rank <= 0.0 {
        return 0.0;
    }
    let distance = (candidate_rank as f64 - closing_rank).abs();
    (1.0 - distance / closing_rank).max(0.0)
}

pub fn score(representative: &CutoffRecord, candidate_rank: u32) -> Score {
    let rank_score = rank_score(candidate_rank, representative.closing_rank);
    let final_score = rank_score * RANK_PROXIMITY_WEIGHT
        + (representative.branch_weight / 100.0) * BRANCH_WEIGHT
        + (representative.college_weight / 100.0) * COLLEGE_WEIGHT;

    debug_assert!(
        (0.0..=1.0 + 1e-9).contains(&final_score),
        "final score {final_score} out of range [0.0, 1.0]"
    );

    Score {
        rank_score,
        final_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quota;

    fn record(closing_rank: f64, branch_weight: f64, college_weight: f64) -> CutoffRecord {
        CutoffRecord {
            college_slug: "iit-x".to_string(),
            college_name: "IIT X".to_string(),
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
            year: 2024,
            round: "Round-1".to_string(),
            round_ordinal: 1,
            closing_rank,
            branch_weight,
            college_weight,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        assert!((RANK_PROXIMITY_WEIGHT + BRANCH_WEIGHT + COLLEGE_WEIGHT - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rank_score_matches_reference_case() {
        assert!((rank_score(400, 500.0) - 0.8).abs() < 1e-12);
        assert_eq!(rank_score(500, 500.0), 1.0);
    }

    #[test]
    fn rank_score_floors_at_zero() {
        assert!((rank_score(1, 10_000.0) - 0.0001).abs() < 1e-12);
        assert_eq!(rank_score(2000, 1000.0), 0.0);
        assert_eq!(rank_score(3000, 1000.0), 0.0);
    }

    #[test]
    fn invalid_closing_rank_scores_zero() {
        assert_eq!(rank_score(10, 0.0), 0.0);
        assert_eq!(rank_score(10, -5.0), 0.0);
        assert_eq!(rank_score(10, f64::NAN), 0.0);
    }

    #[test]
    fn final_score_combines_rank_branch_and_college() {
        let score = score(&record(500.0, 90.0, 50.0), 400);
        let expected = 0.8 * 0.4 + 0.9 * 0.3 + 0.5 * 0.3;
        assert!((score.final_score - expected).abs() < 1e-12);
        assert!((score.rank_score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn perfect_inputs_reach_one() {
        let score = score(&record(500.0, 100.0, 100.0), 500);
        assert!((score.final_score - 1.0).abs() < 1e-12);
    }
}
