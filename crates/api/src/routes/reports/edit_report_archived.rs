use meld_database::util::reference::Reference;
use meld_database::{Database, PartialReport};
use meld_models::v0;
use meld_result::Result;
use rocket::serde::json::Json;
use rocket::State;

/// # Set Archived
///
/// Archive or restore a report. Setting the flag to its current value is
/// a no-op, the report is returned unchanged.
#[openapi(tag = "Reports")]
#[patch("/<target>/archive", data = "<data>")]
pub async fn edit_report_archived(
    db: &State<Database>,
    target: Reference<'_>,
    data: Json<v0::DataEditReportArchived>,
) -> Result<Json<v0::Report>> {
    let mut report = target.as_report(db).await?;
    report
        .update(
            db,
            PartialReport {
                archived: Some(data.archived),
                ..Default::default()
            },
        )
        .await?;

    Ok(Json(report.into()))
}
