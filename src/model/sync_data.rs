use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One synced performance row. Numeric columns are nullable upstream and
/// count as zero when summed.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct Sync_Data {
    pub date: DateTime<Utc>,
    pub team: String,
    pub adser: Option<String>,
    pub spend: Option<f64>,
    pub deposit: Option<f64>,
    pub message: Option<i64>,
    #[sqlx(rename = "turnoverAdser")]
    pub turnover_adser: Option<f64>,
}

impl Sync_Data {
    /// Operator label, `None` when missing or blank.
    pub fn adser_label(&self) -> Option<&str> {
        self.adser.as_deref().filter(|adser| !adser.is_empty())
    }
}

/// Store-side filter over `"SyncData"`. Both bounds are inclusive; `None`
/// lists impose no constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Record_Filter {
    pub teams: Option<Vec<String>>,
    pub adsers: Option<Vec<String>>,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Record_Filter {
    pub fn by_teams(
        teams: Vec<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        Self {
            teams: Some(teams),
            adsers: None,
            from,
            to,
        }
    }

    pub fn by_adsers(
        adsers: Vec<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        Self {
            teams: None,
            adsers: Some(adsers),
            from,
            to,
        }
    }

    pub fn matches(&self, record: &Sync_Data) -> bool {
        if record.date < self.from || record.date > self.to {
            return false;
        }

        if let Some(teams) = &self.teams {
            if !teams.contains(&record.team) {
                return false;
            }
        }

        match (&self.adsers, &record.adser) {
            (Some(adsers), Some(adser)) => adsers.contains(adser),
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}
