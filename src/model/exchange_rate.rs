use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Exchange_Rate {
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}
