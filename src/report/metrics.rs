use serde::Serialize;

use crate::{helpers::round_to, model::Sync_Data};

/// Raw sums of one bucket/key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub spend: f64,
    pub deposit: f64,
    pub message: i64,
    pub turnover_adser: f64,
}

impl Totals {
    pub fn add(&mut self, record: &Sync_Data) {
        self.spend += record.spend.unwrap_or(0.0);
        self.deposit += record.deposit.unwrap_or(0.0);
        self.message += record.message.unwrap_or(0);
        self.turnover_adser += record.turnover_adser.unwrap_or(0.0);
    }
}

impl<'a> FromIterator<&'a Sync_Data> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a Sync_Data>>(iter: I) -> Self {
        let mut totals = Totals::default();
        for record in iter {
            totals.add(record);
        }
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    pub cpm: f64,
    pub cost_per_deposit: f64,
    pub deposit_amount: f64,
    pub dollar_per_cover: f64,
    pub spend: f64,
    pub deposit: f64,
    pub turnover_adser: f64,
}

impl MetricSet {
    /// Every ratio is 0 when its denominator is 0.
    pub fn new(totals: &Totals, exchange_rate: f64) -> MetricSet {
        let Totals {
            spend,
            deposit,
            message,
            turnover_adser,
        } = *totals;

        let cpm = if message > 0 {
            round_to(spend / message as f64, 2)
        } else {
            0.0
        };

        let cost_per_deposit = if deposit > 0.0 {
            round_to(spend / deposit, 2)
        } else {
            0.0
        };

        let dollar_per_cover = if spend > 0.0 && exchange_rate > 0.0 {
            round_to((turnover_adser / exchange_rate) / spend, 4)
        } else {
            0.0
        };

        MetricSet {
            cpm,
            cost_per_deposit,
            deposit_amount: deposit,
            dollar_per_cover,
            spend,
            deposit,
            turnover_adser,
        }
    }
}
