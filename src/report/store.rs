use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
    error::Error,
    model::{Exchange_Rate, Record_Filter, Sync_Data},
};

/// Read access to synced performance records.
pub trait RecordStore {
    fn find_matching(
        &self,
        filter: &Record_Filter,
    ) -> impl Future<Output = Result<Vec<Sync_Data>, Error>> + Send;

    /// Distinct non-empty operator labels among `teams` inside `[from, to]`.
    fn distinct_adsers(
        &self,
        teams: &[String],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<String>, Error>> + Send;
}

pub trait RateProvider {
    fn most_recent_rate(
        &self,
    ) -> impl Future<Output = Result<Option<Exchange_Rate>, Error>> + Send;
}
