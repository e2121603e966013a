use crate::models::{PredictionQuery, PredictionResult};
use anyhow::Result;
use csv::Writer;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const RESULTS_FILE: &str = "predictions.csv";

const HEADERS: [&str; 20] = [
    "Rank",
    "College_Slug",
    "College",
    "State",
    "NIRF",
    "Fees",
    "Avg_Salary",
    "Course",
    "Branch",
    "Quota",
    "Seat_Type",
    "Sub_Category",
    "Round",
    "Year",
    "Closing_Rank",
    "Branch_Weight",
    "College_Weight",
    "Rank_Score",
    "Final_Score",
    "All_Rounds_Cutoff",
];

/// Writes the ranked predictions as CSV.
pub fn write_results_csv<W: Write>(results: &[PredictionResult], sink: W) -> Result<()> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(HEADERS)?;

    for (position, result) in results.iter().enumerate() {
        writer.write_record(&[
            (position + 1).to_string(),
            result.college_slug.clone(),
            result.college_name.clone(),
            result.state.clone(),
            result.nirf_rank.clone(),
            result.fees.clone(),
            result.avg_salary.clone(),
            result.course.clone(),
            result.branch.clone(),
            result.quota.to_string(),
            result.seat_type.clone(),
            result.sub_category.clone(),
            result.round.clone(),
            result.year.to_string(),
            format!("{:.0}", result.closing_rank),
            format!("{:.0}", result.branch_weight),
            format!("{:.0}", result.college_weight),
            format!("{:.4}", result.rank_score),
            format!("{:.4}", result.final_score),
            result.all_rounds_cutoff.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates the output directory if needed and writes `predictions.csv` into it.
pub fn save_results_csv(results: &[PredictionResult], output_dir: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let csv_path = Path::new(output_dir).join(RESULTS_FILE);
    let file = fs::File::create(&csv_path)?;
    write_results_csv(results, file)?;
    Ok(csv_path)
}

pub fn to_json(results: &[PredictionResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Plain-text ranking for the terminal.
pub fn render_table(
    query: &PredictionQuery,
    results: &[PredictionResult],
    limit: Option<usize>,
) -> String {
    let mut content = String::new();
    content.push_str(&format!(
        "Admission predictions for {} rank {} ({}, {}, home state {})\n",
        query.exam_type, query.rank, query.seat_type, query.sub_category, query.home_state
    ));
    content.push_str("==========================================\n\n");

    if results.is_empty() {
        content.push_str("No eligible colleges found for this rank and category.\n");
        return content;
    }

    let shown = limit.unwrap_or(results.len()).min(results.len());
    for (i, result) in results.iter().take(shown).enumerate() {
        content.push_str(&format!(
            "{}. {} - {} {} [{}]\n\
            Score: {:.3} (rank fit {:.2}, branch {:.0}, college {:.0})\n\
            Based on: {} {} closing rank {:.0}\n\
            History: {}\n\n",
            i + 1,
            result.college_name,
            result.course,
            result.branch,
            result.quota,
            result.final_score,
            result.rank_score,
            result.branch_weight,
            result.college_weight,
            result.year,
            result.round,
            result.closing_rank,
            result.all_rounds_cutoff,
        ));
    }

    if shown < results.len() {
        content.push_str(&format!("... and {} more\n", results.len() - shown));
    }

    content
}
