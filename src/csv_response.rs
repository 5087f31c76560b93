use actix_web::HttpResponse;

use crate::error::Error;

/// CSV attachment built from serializable rows.
pub fn to_csv_response<T: serde::Serialize>(
    data: &[T],
    filename: &str,
) -> Result<HttpResponse, Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record).map_err(|e| {
            Error::ServerError(format!("CSV serialization error: {}", e))
        })?;
    }
    let csv_data = wtr
        .into_inner()
        .map_err(|e| Error::ServerError(format!("CSV writer error: {}", e)))?;
    let csv_string = String::from_utf8(csv_data)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(csv_string))
}
