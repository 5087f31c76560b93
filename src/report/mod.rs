//! Chart report aggregation
//!
//! Buckets synced performance records by day or calendar month and reduces
//! them per team or per operator. The whole report window is fetched once
//! and grouped in memory.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{ser::SerializeMap, Serialize, Serializer};
use tracing::{debug, warn};

use crate::{
    error::Error,
    helpers::{Period, Vertical, View},
    model::{Record_Filter, Sync_Data},
};

pub use self::{
    metrics::{MetricSet, Totals},
    period::{period_starts, PeriodWindow},
    store::{RateProvider, RecordStore},
};

mod metrics;
mod period;
mod store;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub vertical: Vertical,
    pub view: View,
    pub period: Period,
}

/// One chart point. Serialized as `{ "period", "date", <key>: MetricSet, .. }`
/// with keys in grouping order. A key named like one of the
/// `RESERVED_KEYS` is left out so it cannot overwrite the bucket fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBucket {
    pub label: String,
    pub date: NaiveDate,
    pub metrics: Vec<(String, MetricSet)>,
}

const RESERVED_KEYS: [&str; 2] = ["period", "date"];

impl PeriodBucket {
    fn chart_metrics(&self) -> impl Iterator<Item = &(String, MetricSet)> {
        self.metrics
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
    }
}

impl Serialize for PeriodBucket {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.chart_metrics().count() + RESERVED_KEYS.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("period", &self.label)?;
        map.serialize_entry("date", &self.date.format("%Y-%m-%d").to_string())?;
        for (key, metrics) in self.chart_metrics() {
            map.serialize_entry(key, metrics)?;
        }
        map.end()
    }
}

/// Latest stored rate, or `default_rate` when none is stored or the lookup
/// fails. Never returns an error.
pub async fn exchange_rate_or_default<R>(rates: &R, default_rate: f64) -> f64
where
    R: RateProvider,
{
    match rates.most_recent_rate().await {
        Ok(Some(data)) => data.rate,
        Ok(None) => {
            warn!("No exchange rate stored, using default {}", default_rate);
            default_rate
        },
        Err(e) => {
            warn!(
                "Failed to fetch exchange rate, using default {}: {}",
                default_rate, e
            );
            default_rate
        },
    }
}

pub struct Aggregator<'a, S, R> {
    store: &'a S,
    rates: &'a R,
    default_rate: f64,
    offset: FixedOffset,
}

impl<'a, S, R> Aggregator<'a, S, R>
where
    S: RecordStore,
    R: RateProvider,
{
    pub fn new(
        store: &'a S,
        rates: &'a R,
        default_rate: f64,
        offset: FixedOffset,
    ) -> Self {
        Self {
            store,
            rates,
            default_rate,
            offset,
        }
    }

    pub async fn generate_report(
        &self,
        request: &ReportRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<PeriodBucket>, Error> {
        let exchange_rate =
            exchange_rate_or_default(self.rates, self.default_rate).await;
        let windows = self.windows(request, now)?;

        let (Some(first), Some(last)) = (windows.first(), windows.last())
        else {
            return Ok(vec![]);
        };

        let teams: Vec<String> = request
            .vertical
            .teams()
            .iter()
            .map(|team| team.to_string())
            .collect();

        let records = self
            .fetch_records(request.view, &teams, first.from, last.to)
            .await?;

        debug!(
            "Report {} / {} / {}: {} periods, {} records",
            request.vertical,
            request.view,
            request.period,
            windows.len(),
            records.len()
        );

        let buckets = windows
            .iter()
            .map(|window| {
                let metrics = match request.view {
                    View::Team => {
                        by_team(&teams, &records, window, exchange_rate)
                    },
                    View::Adser => {
                        by_adser(&teams, &records, window, exchange_rate)
                    },
                };

                PeriodBucket {
                    label: window.label(request.period),
                    date: window.date,
                    metrics,
                }
            })
            .collect();

        Ok(buckets)
    }

    /// Bucket windows of the request whose start is not after `now`.
    fn windows(
        &self,
        request: &ReportRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<PeriodWindow>, Error> {
        let mut windows = vec![];

        for date in period_starts(request.start, request.end, request.period) {
            let window = PeriodWindow::new(date, request.period, &self.offset)?;
            if window.from <= now {
                windows.push(window);
            }
        }

        Ok(windows)
    }

    async fn fetch_records(
        &self,
        view: View,
        teams: &[String],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Sync_Data>, Error> {
        if teams.is_empty() {
            return Ok(vec![]);
        }

        match view {
            View::Team => {
                let filter = Record_Filter::by_teams(teams.to_vec(), from, to);
                self.store.find_matching(&filter).await
            },
            View::Adser => {
                // operator totals span every team the operator posted under
                let adsers = self.store.distinct_adsers(teams, from, to).await?;
                if adsers.is_empty() {
                    return Ok(vec![]);
                }
                let filter = Record_Filter::by_adsers(adsers, from, to);
                self.store.find_matching(&filter).await
            },
        }
    }
}

fn by_team(
    teams: &[String],
    records: &[Sync_Data],
    window: &PeriodWindow,
    exchange_rate: f64,
) -> Vec<(String, MetricSet)> {
    teams
        .iter()
        .map(|team| {
            let totals: Totals = records
                .iter()
                .filter(|r| &r.team == team && window.contains(&r.date))
                .collect();
            (team.to_owned(), MetricSet::new(&totals, exchange_rate))
        })
        .collect()
}

fn by_adser(
    teams: &[String],
    records: &[Sync_Data],
    window: &PeriodWindow,
    exchange_rate: f64,
) -> Vec<(String, MetricSet)> {
    let adsers: BTreeSet<&str> = records
        .iter()
        .filter(|r| window.contains(&r.date) && teams.contains(&r.team))
        .filter_map(|r| r.adser_label())
        .collect();

    adsers
        .into_iter()
        .map(|adser| {
            let totals: Totals = records
                .iter()
                .filter(|r| {
                    r.adser_label() == Some(adser) && window.contains(&r.date)
                })
                .collect();
            (adser.to_owned(), MetricSet::new(&totals, exchange_rate))
        })
        .collect()
}
