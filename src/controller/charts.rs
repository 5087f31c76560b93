use std::str::FromStr;

use actix_web::{get, web, HttpResponse, Result};
use chrono::{FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    csv_response::to_csv_response,
    error::Error,
    helpers::{parse_date, Period, Vertical, View},
    report::{Aggregator, PeriodBucket, ReportRequest},
};

#[get("/dashboard/charts")]
pub async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<HttpResponse, Error> {
    let data = data.into_inner();
    let request = data.to_request(&state.config.utc_offset)?;
    let format = match non_empty(&data.format) {
        None | Some("json") => Format::Json,
        Some("csv") => Format::Csv,
        Some(f) => {
            return Err(Error::InvalidOption {
                option: format!("format '{}'. Valid options: json, csv", f),
            })
        },
    };

    let aggregator = Aggregator::new(
        &state.database,
        &state.database,
        state.config.default_exchange_rate,
        state.config.utc_offset,
    );
    let buckets = aggregator.generate_report(&request, Utc::now()).await?;

    match format {
        Format::Json => Ok(HttpResponse::Ok().json(Response {
            success: true,
            data: buckets,
            period: request.period,
            view: request.view,
        })),
        Format::Csv => {
            let rows = to_rows(&buckets);
            let filename = format!(
                "charts_{}_{}_{}_{}.csv",
                request.vertical, request.view, request.start, request.end
            );
            to_csv_response(&rows, &filename)
        },
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Query {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(alias = "vertical")]
    pub tab: Option<String>,
    pub view: Option<String>,
    #[serde(alias = "granularity")]
    pub period: Option<String>,
    pub format: Option<String>,
}

impl Query {
    /// Rejects missing `startDate`, `endDate` or `tab` before anything else
    /// is parsed. An empty value counts as missing.
    pub fn to_request(
        &self,
        offset: &FixedOffset,
    ) -> Result<ReportRequest, Error> {
        let (Some(start), Some(end), Some(tab)) = (
            non_empty(&self.start_date),
            non_empty(&self.end_date),
            non_empty(&self.tab),
        ) else {
            return Err(Error::MissingParams(String::from(
                "startDate, endDate, tab",
            )));
        };

        let view = match non_empty(&self.view) {
            Some(view) => View::from_str(view)?,
            None => View::default(),
        };

        let period = match non_empty(&self.period) {
            Some(period) => Period::from_str(period)?,
            None => Period::default(),
        };

        Ok(ReportRequest {
            start: parse_date(start, offset)?,
            end: parse_date(end, offset)?,
            vertical: Vertical::from_str(tab)?,
            view,
            period,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

enum Format {
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub success: bool,
    pub data: Vec<PeriodBucket>,
    pub period: Period,
    pub view: View,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow<'a> {
    pub period: &'a str,
    pub date: String,
    pub key: &'a str,
    pub cpm: f64,
    pub cost_per_deposit: f64,
    pub deposit_amount: f64,
    pub dollar_per_cover: f64,
    pub spend: f64,
    pub deposit: f64,
    pub turnover_adser: f64,
}

fn to_rows(buckets: &[PeriodBucket]) -> Vec<ChartRow<'_>> {
    buckets
        .iter()
        .flat_map(|bucket| {
            bucket.metrics.iter().map(move |(key, m)| ChartRow {
                period: &bucket.label,
                date: bucket.date.format("%Y-%m-%d").to_string(),
                key,
                cpm: m.cpm,
                cost_per_deposit: m.cost_per_deposit,
                deposit_amount: m.deposit_amount,
                dollar_per_cover: m.dollar_per_cover,
                spend: m.spend,
                deposit: m.deposit,
                turnover_adser: m.turnover_adser,
            })
        })
        .collect()
}
