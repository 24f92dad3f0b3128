use std::str::FromStr;

use meld_database::util::reference::Reference;
use meld_database::{Database, PartialReport};
use meld_models::v0;
use meld_result::{create_error, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Set Report Status
///
/// Move a report to another triage status.
///
/// The status arrives as text and anything outside the closed set is
/// rejected before the report is even looked up.
#[openapi(tag = "Reports")]
#[patch("/<target>/status", data = "<data>")]
pub async fn edit_report_status(
    db: &State<Database>,
    target: Reference<'_>,
    data: Json<v0::DataEditReportStatus>,
) -> Result<Json<v0::Report>> {
    let status =
        v0::ReportStatus::from_str(&data.status).map_err(|_| create_error!(InvalidStatus))?;

    let mut report = target.as_report(db).await?;
    report
        .update(
            db,
            PartialReport {
                status: Some(status),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(report.into()))
}
