use chrono::{DateTime, Utc};
use sqlx::{Error, QueryBuilder};

use crate::model::{Record_Filter, Sync_Data, Table};

use super::DataBase;

// Casts keep the decoded types stable when the table was created elsewhere
// with timestamp(3), numeric or integer columns.
const FIND_MATCHING_SQL: &str = r#"
    SELECT
        "date"::TIMESTAMPTZ AS "date",
        "team"::TEXT AS "team",
        "adser"::TEXT AS "adser",
        "spend"::DOUBLE PRECISION AS "spend",
        "deposit"::DOUBLE PRECISION AS "deposit",
        "message"::BIGINT AS "message",
        "turnoverAdser"::DOUBLE PRECISION AS "turnoverAdser"
    FROM "SyncData"
    WHERE
"#;

const DISTINCT_ADSERS_SQL: &str = r#"
    SELECT DISTINCT "adser"::TEXT AS "adser"
    FROM "SyncData"
    WHERE
        "team" = ANY($1) AND
        "date" >= $2 AND
        "date" <= $3 AND
        "adser" IS NOT NULL AND
        "adser" <> ''
    ORDER BY "adser" ASC
"#;

impl Table<Sync_Data> {
    pub async fn find_matching(
        &self,
        filter: &Record_Filter,
    ) -> Result<Vec<Sync_Data>, Error> {
        let mut builder: QueryBuilder<DataBase> =
            QueryBuilder::new(FIND_MATCHING_SQL);

        builder
            .push(r#" "date" >= "#)
            .push_bind(filter.from)
            .push(r#" AND "date" <= "#)
            .push_bind(filter.to);

        if let Some(teams) = &filter.teams {
            builder
                .push(r#" AND "team" = ANY("#)
                .push_bind(teams.to_owned())
                .push(")");
        }

        if let Some(adsers) = &filter.adsers {
            builder
                .push(r#" AND "adser" = ANY("#)
                .push_bind(adsers.to_owned())
                .push(")");
        }

        builder.push(r#" ORDER BY "date" ASC"#);

        builder
            .build_query_as::<Sync_Data>()
            .persistent(false)
            .fetch_all(&self.pool)
            .await
    }

    /// Non-empty operator labels seen among `teams` inside the window.
    pub async fn get_distinct_adsers(
        &self,
        teams: &[String],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<String>, Error> {
        let data: Vec<(String,)> = sqlx::query_as(DISTINCT_ADSERS_SQL)
            .bind(teams)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(data.into_iter().map(|(adser,)| adser).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_columns_are_cast_to_decoded_types() {
        let columns = [
            ("date", "TIMESTAMPTZ"),
            ("team", "TEXT"),
            ("adser", "TEXT"),
            ("spend", "DOUBLE PRECISION"),
            ("deposit", "DOUBLE PRECISION"),
            ("message", "BIGINT"),
            ("turnoverAdser", "DOUBLE PRECISION"),
        ];

        for (column, sql_type) in columns {
            let expected =
                format!(r#""{}"::{} AS "{}""#, column, sql_type, column);
            assert!(
                FIND_MATCHING_SQL.contains(&expected),
                "missing {}",
                expected
            );
        }

        assert!(DISTINCT_ADSERS_SQL.contains(r#""adser"::TEXT AS "adser""#));
    }
}
