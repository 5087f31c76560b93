use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::{error::Error, helpers::Vertical};

/// Dashboard tabs and the teams charted under each.
#[get("/dashboard/verticals")]
pub async fn index() -> Result<impl Responder, Error> {
    let data: Vec<VerticalTeams> = Vertical::ALL
        .iter()
        .map(|vertical| VerticalTeams {
            tab: vertical.as_str(),
            teams: vertical.teams(),
        })
        .collect();

    Ok(web::Json(data))
}

#[derive(Debug, Serialize)]
pub struct VerticalTeams {
    pub tab: &'static str,
    pub teams: &'static [&'static str],
}
