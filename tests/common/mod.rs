#![allow(dead_code)]

use cutoff_predictor::{DataSource, PredictionError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const HEADER: &str = "slug,name,state,nirf_number,fees,avgSalary,course,branch,quota,seatType,subCategory,examType,year,closingRank,round,branch_weight,weight";

/// In-memory dataset that counts how often it is fetched.
pub struct CountingSource {
    text: String,
    delay: Duration,
    failures_left: AtomicUsize,
    panics_left: AtomicUsize,
    fetches: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: Duration::ZERO,
            failures_left: AtomicUsize::new(0),
            panics_left: AtomicUsize::new(0),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_first(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    /// The first `panics` fetches panic instead of returning.
    pub fn panicking_first(self, panics: usize) -> Self {
        self.panics_left.store(panics, Ordering::SeqCst);
        self
    }

    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }
}

impl DataSource for CountingSource {
    fn name(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self) -> Result<String, PredictionError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let should_panic = self
            .panics_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if should_panic {
            panic!("dataset source crashed mid-fetch");
        }
        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(PredictionError::data_unavailable(
                "memory",
                "HTTP request failed with status: 503 Service Unavailable",
            ));
        }
        Ok(self.text.clone())
    }
}

/// Builds a CSV document from data rows.
pub fn dataset<S: AsRef<str>>(rows: &[S]) -> String {
    let mut text = HEADER.to_string();
    for row in rows {
        text.push('\n');
        text.push_str(row.as_ref());
    }
    text
}

pub fn row(
    slug: &str,
    branch: &str,
    quota: &str,
    state: &str,
    year: i32,
    round: &str,
    closing_rank: &str,
) -> String {
    format!(
        "{slug},{name},{state},12,1.4L,11L,B.Tech,{branch},{quota},OPEN,Gender-Neutral,JEE-Main,{year},{closing_rank},{round},80,75",
        name = slug.to_uppercase(),
    )
}
