use sqlx::Error;

use crate::model::{Exchange_Rate, Table};

const MOST_RECENT_SQL: &str = r#"
    SELECT
        "rate"::DOUBLE PRECISION AS "rate",
        "timestamp"::TIMESTAMPTZ AS "timestamp"
    FROM "ExchangeRate"
    ORDER BY "timestamp" DESC
    LIMIT 1
"#;

impl Table<Exchange_Rate> {
    pub async fn get_most_recent(
        &self,
    ) -> Result<Option<Exchange_Rate>, Error> {
        sqlx::query_as(MOST_RECENT_SQL)
            .fetch_optional(&self.pool)
            .await
    }
}
