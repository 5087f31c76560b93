use chrono::{DateTime, Utc};
use sqlx::Executor;

use crate::{
    configuration::Config,
    dao::{PoolOption, PoolType},
    error::Error,
    model::{Exchange_Rate, Record_Filter, Sync_Data, Table},
    report::{RateProvider, RecordStore},
};

#[derive(Debug)]
pub struct DatabasePool {
    pub sync_data: Table<Sync_Data>,
    pub exchange_rate: Table<Exchange_Rate>,
    pub pool: PoolType,
}

// timestamp columns without a zone are read as UTC
const SESSION_SETUP_SQL: &str = "SET TIME ZONE 'UTC'";

impl DatabasePool {
    pub async fn new(config: &Config) -> Result<DatabasePool, Error> {
        let pool = PoolOption::new()
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute(SESSION_SETUP_SQL).await?;
                    Ok(())
                })
            })
            .max_connections(config.max_connections)
            .connect(config.database_url.as_str())
            .await?;

        Ok(DatabasePool::with_pool(pool))
    }

    pub fn with_pool(pool: PoolType) -> DatabasePool {
        DatabasePool {
            sync_data: Table::new(pool.clone()),
            exchange_rate: Table::new(pool.clone()),
            pool,
        }
    }

    pub fn get_pool(&self) -> &PoolType {
        &self.pool
    }
}

impl RecordStore for DatabasePool {
    async fn find_matching(
        &self,
        filter: &Record_Filter,
    ) -> Result<Vec<Sync_Data>, Error> {
        let data = self.sync_data.find_matching(filter).await?;
        Ok(data)
    }

    async fn distinct_adsers(
        &self,
        teams: &[String],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<String>, Error> {
        let data = self.sync_data.get_distinct_adsers(teams, from, to).await?;
        Ok(data)
    }
}

impl RateProvider for DatabasePool {
    async fn most_recent_rate(&self) -> Result<Option<Exchange_Rate>, Error> {
        let data = self.exchange_rate.get_most_recent().await?;
        Ok(data)
    }
}
