use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use cutoff_predictor::models::DataSourceMode;
use cutoff_predictor::{
    report, AdmissionPredictor, Config, DatasetSource, FileSource, HttpSource, PredictionQuery,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn build_source(config: &Config) -> Result<DatasetSource> {
    match config.data_source_mode {
        DataSourceMode::Local => {
            let path = config
                .dataset_path
                .as_deref()
                .context("dataset_path must be set when data_source_mode is \"local\"")?;
            Ok(DatasetSource::File(FileSource::new(path)))
        }
        DataSourceMode::Internet => {
            let url = config
                .dataset_url
                .as_deref()
                .context("dataset_url must be set when data_source_mode is \"internet\"")?;
            Ok(DatasetSource::Http(HttpSource::new(
                url,
                Duration::from_secs(config.request_timeout_secs),
            )))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("cutoff-predictor")
        .version("1.0")
        .about("Predicts likely college admissions from historical cutoff ranks")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("exam")
                .long("exam")
                .value_name("EXAM")
                .help("Exam the rank was obtained in, e.g. JEE-Main")
                .required(true),
        )
        .arg(
            Arg::new("rank")
                .long("rank")
                .value_name("RANK")
                .help("Candidate's category rank")
                .value_parser(value_parser!(u32))
                .required(true),
        )
        .arg(
            Arg::new("seat-type")
                .long("seat-type")
                .value_name("SEAT_TYPE")
                .help("Reservation category, e.g. OPEN, OBC-NCL, SC")
                .default_value("OPEN"),
        )
        .arg(
            Arg::new("sub-category")
                .long("sub-category")
                .value_name("SUB_CATEGORY")
                .help("Gender sub-allocation of the seat")
                .default_value("Gender-Neutral"),
        )
        .arg(
            Arg::new("home-state")
                .long("home-state")
                .value_name("STATE")
                .help("Candidate's home state, used for home-state quota seats")
                .required(true),
        )
        .arg(
            Arg::new("limit")
                .short('n')
                .long("limit")
                .value_name("N")
                .help("Show at most N results")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["table", "csv", "json"])
                .default_value("table"),
        )
        .get_matches();

    let config_file = matches
        .get_one::<String>("config")
        .context("config path has a default")?;

    // Load or create configuration
    let config = if Path::new(config_file).exists() {
        info!(path = %config_file, "loading configuration");
        Config::load_from_file(config_file)
            .with_context(|| format!("Failed to load configuration from {}", config_file))?
    } else {
        println!("📝 Creating default configuration file: {}", config_file);
        Config::default().save_to_file(config_file)?;
        println!(
            "⚠️  Please edit {} and point it at your cutoff dataset, then run the program again.",
            config_file
        );
        return Ok(());
    };

    let query = PredictionQuery::new(
        required(&matches, "exam")?,
        *matches.get_one::<u32>("rank").context("rank is required")?,
        required(&matches, "seat-type")?,
        required(&matches, "sub-category")?,
        required(&matches, "home-state")?,
    );
    let limit = matches.get_one::<usize>("limit").copied().or(config.result_limit);

    let source = build_source(&config)?;
    let predictor = AdmissionPredictor::new(source, config.record_defaults());

    let results = predictor
        .predict(&query)
        .await
        .context("Failed to compute admission predictions")?;
    let shown = &results[..limit.unwrap_or(results.len()).min(results.len())];

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", report::to_json(shown)?),
        Some("csv") => report::write_results_csv(shown, std::io::stdout().lock())?,
        _ => print!("{}", report::render_table(&query, &results, limit)),
    }

    if let Some(output_dir) = config.output_directory.as_deref() {
        let csv_path = report::save_results_csv(&results, output_dir)?;
        info!(path = %csv_path.display(), results = results.len(), "full ranking written");
    }

    Ok(())
}

fn required(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing argument: {}", id))
}
