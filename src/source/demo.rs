//! Demo data generator.
//!
//! Wraps a real source and reshuffles feature statuses so a dashboard can be
//! shown before real progress data exists. Never used unless demo mode is
//! switched on in configuration or on the command line.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::DataSource;
use crate::errors::SourceError;
use crate::model::FeatureDocument;

pub struct DemoSource {
    inner: Arc<dyn DataSource>,
    seed: Option<u64>,
    /// Render date the generated dates are relative to; today when unset.
    now: Option<NaiveDate>,
}

impl DemoSource {
    pub fn new(inner: Arc<dyn DataSource>, seed: Option<u64>, now: Option<NaiveDate>) -> Self {
        Self { inner, seed, now }
    }

    fn today(&self) -> NaiveDate {
        self.now.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[async_trait]
impl DataSource for DemoSource {
    fn describe(&self) -> String {
        format!("demo({})", self.inner.describe())
    }

    async fn load(&self) -> Result<FeatureDocument, SourceError> {
        let mut document = self.inner.load().await?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        randomize_features(&mut document, &mut rng, self.today());
        Ok(document)
    }
}

/// Reassign statuses and dates around `today`.
///
/// Each feature draws from `[0, 3)`: below 1 it becomes Completed, above 2
/// InProgress, otherwise it is left as loaded. The lower half of each band
/// starts a month earlier than the upper half.
pub fn randomize_features<R: Rng>(document: &mut FeatureDocument, rng: &mut R, today: NaiveDate) {
    let months_ago = |n: u32| today.checked_sub_months(Months::new(n)).unwrap_or(today);

    for feature in document.features.values_mut() {
        let roll: f64 = rng.random_range(0.0..3.0);
        if roll < 1.0 {
            feature.status = "Completed".to_string();
            feature.start_date = Some(if roll < 0.5 { months_ago(4) } else { months_ago(3) });
            feature.completed_date = Some(months_ago(2));
        } else if roll > 2.0 {
            feature.status = "InProgress".to_string();
            feature.start_date = Some(if roll < 2.5 { months_ago(3) } else { months_ago(2) });
            feature.completed_date = None;
        }
    }
}
