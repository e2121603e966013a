use crate::error::PredictionError;
use crate::models::{CutoffRecord, Quota, RawCutoffRow, RecordDefaults};
use crate::rounds::round_ordinal;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Columns without which no row can be interpreted.
pub const REQUIRED_COLUMNS: [&str; 5] = ["slug", "examType", "year", "closingRank", "round"];

/// Somewhere the raw cutoff table can be fetched from.
pub trait DataSource: Send + Sync + 'static {
    /// Human-readable location used in logs and errors.
    fn name(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<String, PredictionError>> + Send;
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

impl DataSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, PredictionError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PredictionError::data_unavailable(&self.url, e))?;

        if !response.status().is_success() {
            return Err(PredictionError::data_unavailable(
                &self.url,
                format!("HTTP request failed with status: {}", response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| PredictionError::data_unavailable(&self.url, e))
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, PredictionError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PredictionError::data_unavailable(self.name(), e))
    }
}

/// Either configured source, chosen at runtime.
pub enum DatasetSource {
    Http(HttpSource),
    File(FileSource),
}

impl DataSource for DatasetSource {
    fn name(&self) -> String {
        match self {
            DatasetSource::Http(source) => source.name(),
            DatasetSource::File(source) => source.name(),
        }
    }

    async fn fetch(&self) -> Result<String, PredictionError> {
        match self {
            DatasetSource::Http(source) => source.fetch().await,
            DatasetSource::File(source) => source.fetch().await,
        }
    }
}

type LoadOutcome = Result<Arc<[CutoffRecord]>, PredictionError>;

enum LoadState {
    Unloaded,
    Loading(watch::Receiver<Option<LoadOutcome>>),
    Loaded(Arc<[CutoffRecord]>),
    Failed(PredictionError),
}

/// Snapshot of the loader's state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Loaded { records: usize },
    Failed { reason: String },
}

/// Process-wide owner of the parsed cutoff dataset.
///
/// The first `load` spawns a single fetch; callers arriving while it is in
/// flight wait for the same outcome. A successful load is cached for the
/// lifetime of the loader, a failed one leaves the next caller free to retry.
pub struct DatasetLoader<S: DataSource> {
    source: Arc<S>,
    defaults: RecordDefaults,
    state: Arc<Mutex<LoadState>>,
}

impl<S: DataSource> DatasetLoader<S> {
    pub fn new(source: S, defaults: RecordDefaults) -> Self {
        Self {
            source: Arc::new(source),
            defaults,
            state: Arc::new(Mutex::new(LoadState::Unloaded)),
        }
    }

    pub async fn load(&self) -> Result<Arc<[CutoffRecord]>, PredictionError> {
        let mut receiver = {
            let mut state = self.state.lock().await;
            let in_flight = match &*state {
                LoadState::Loaded(records) => return Ok(Arc::clone(records)),
                // A closed channel here means the load task died without reporting
                LoadState::Loading(receiver) if receiver.has_changed().is_ok() => {
                    Some(receiver.clone())
                }
                _ => None,
            };

            match in_flight {
                Some(receiver) => {
                    debug!(source = %self.source.name(), "joining in-flight dataset load");
                    receiver
                }
                None => {
                    let receiver = self.spawn_load();
                    *state = LoadState::Loading(receiver.clone());
                    receiver
                }
            }
        };

        let outcome = match receiver.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone(),
            Err(_) => None,
        };
        outcome.unwrap_or_else(|| {
            Err(PredictionError::data_unavailable(
                self.source.name(),
                "dataset load ended without a result",
            ))
        })
    }

    pub async fn status(&self) -> LoadStatus {
        match &*self.state.lock().await {
            LoadState::Unloaded => LoadStatus::Unloaded,
            LoadState::Loading(_) => LoadStatus::Loading,
            LoadState::Loaded(records) => LoadStatus::Loaded {
                records: records.len(),
            },
            LoadState::Failed(err) => LoadStatus::Failed {
                reason: err.to_string(),
            },
        }
    }

    fn spawn_load(&self) -> watch::Receiver<Option<LoadOutcome>> {
        let (sender, receiver) = watch::channel(None);
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let defaults = self.defaults;

        tokio::spawn(async move {
            let outcome = fetch_and_parse(source.as_ref(), defaults).await;
            {
                let mut state = state.lock().await;
                *state = match &outcome {
                    Ok(records) => LoadState::Loaded(Arc::clone(records)),
                    Err(err) => LoadState::Failed(err.clone()),
                };
            }
            // Nobody may be waiting if the triggering caller was dropped
            let _ = sender.send(Some(outcome));
        });

        receiver
    }
}

async fn fetch_and_parse<S: DataSource>(source: &S, defaults: RecordDefaults) -> LoadOutcome {
    let name = source.name();
    info!(source = %name, "fetching cutoff dataset");

    let text = match source.fetch().await {
        Ok(text) => text,
        Err(err) => {
            warn!(source = %name, error = %err, "cutoff dataset fetch failed");
            return Err(err);
        }
    };

    let records = parse_dataset(&text, &name, defaults)?;
    info!(source = %name, records = records.len(), "cutoff dataset loaded");
    Ok(Arc::from(records))
}

/// Parses CSV text into validated records, dropping rows that cannot be trusted.
pub fn parse_dataset(
    text: &str,
    source_name: &str,
    defaults: RecordDefaults,
) -> Result<Vec<CutoffRecord>, PredictionError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| PredictionError::data_unavailable(source_name, e))?
        .clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(PredictionError::data_unavailable(
            source_name,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in reader.deserialize::<RawCutoffRow>() {
        let row = row.map_err(|e| PredictionError::data_unavailable(source_name, e))?;
        match normalize_row(row, defaults) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(
            source = %source_name,
            dropped,
            kept = records.len(),
            "discarded malformed cutoff rows"
        );
    }

    Ok(records)
}

/// Converts one raw row into a record, or `None` when the rank, year or round
/// label cannot be interpreted.
pub fn normalize_row(row: RawCutoffRow, defaults: RecordDefaults) -> Option<CutoffRecord> {
    let closing_rank = parse_number(row.closing_rank.as_deref())
        .filter(|rank| rank.is_finite() && *rank > 0.0)?;
    let year = parse_year(row.year.as_deref())?;
    let round = text(row.round);
    let round_ordinal = round_ordinal(&round)?;

    Some(CutoffRecord {
        college_slug: text(row.slug),
        college_name: text(row.name),
        state: text(row.state),
        nirf_rank: text(row.nirf_number),
        fees: text(row.fees),
        avg_salary: text(row.avg_salary),
        course: text(row.course),
        branch: text(row.branch),
        quota: Quota::parse(row.quota.as_deref().unwrap_or_default()),
        seat_type: text(row.seat_type),
        sub_category: text(row.sub_category),
        exam_type: text(row.exam_type),
        year,
        round,
        round_ordinal,
        closing_rank,
        branch_weight: parse_weight(row.branch_weight.as_deref(), defaults.branch_weight),
        college_weight: parse_weight(row.weight.as_deref(), defaults.college_weight),
    })
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(|r| r.trim().replace(',', ""))
        .filter(|r| !r.is_empty())
        .and_then(|r| r.parse::<f64>().ok())
}

fn parse_year(raw: Option<&str>) -> Option<i32> {
    let raw = raw?.trim();
    raw.parse::<i32>().ok().or_else(|| {
        // Spreadsheet exports sometimes write years as "2024.0"
        raw.parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0 && y.abs() < i32::MAX as f64)
            .map(|y| y as i32)
    })
}

fn parse_weight(raw: Option<&str>, default: f64) -> f64 {
    parse_number(raw)
        .filter(|w| w.is_finite())
        .map(|w| w.clamp(0.0, 100.0))
        .unwrap_or(default)
}
