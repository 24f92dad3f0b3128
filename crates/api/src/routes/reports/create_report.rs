use meld_database::{Database, Report};
use meld_models::v0;
use meld_result::Result;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;

/// # Submit Report
///
/// Submit a new damage report. The report starts out open, unarchived and
/// timestamped with the time of submission.
#[openapi(tag = "Reports")]
#[post("/", data = "<data>")]
pub async fn create_report(
    db: &State<Database>,
    data: Json<v0::DataCreateReport>,
) -> Result<Created<Json<v0::Report>>> {
    let report = Report::create(db, data.into_inner()).await?;
    let location = format!("/reports/{}", report.id);
    Ok(Created::new(location).body(Json(report.into())))
}

#[cfg(test)]
mod test {
    use crate::util::test::TestHarness;
    use meld_models::v0;
    use rocket::http::{ContentType, Status};

    #[rocket::async_test]
    async fn success() {
        let harness = TestHarness::new().await;

        let response = harness
            .post("/reports")
            .header(ContentType::JSON)
            .body(
                json!({
                    "location": "Room B42",
                    "description": "Coffee machine exploded",
                    "email": "janitor@example.com",
                    "image": "data:image/png;base64,iVBORw0KGgo="
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Created);

        let report: v0::Report =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert!(!report.id.is_empty());
        assert_eq!(report.location, "Room B42");
        assert_eq!(report.status, v0::ReportStatus::Open);
        assert!(!report.archived);

        // It is immediately visible in the store
        assert!(harness.db.fetch_report(&report.id).await.is_ok());
    }

    #[rocket::async_test]
    async fn fail_missing_fields() {
        let harness = TestHarness::new().await;

        let response = harness
            .post("/reports")
            .header(ContentType::JSON)
            .body(
                json!({
                    "location": "Room B42",
                    "description": "",
                    "email": ""
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);

        let error: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(error["type"], "MissingFields");
        assert_eq!(error["message"], "Location, description and email are required.");
    }

    #[rocket::async_test]
    async fn fail_absent_fields() {
        let harness = TestHarness::new().await;

        // Keys left out entirely, not posted as empty strings
        let response = harness
            .post("/reports")
            .header(ContentType::JSON)
            .body(json!({ "location": "Room C13" }).to_string())
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);

        let error: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(error["type"], "MissingFields");
    }

    #[rocket::async_test]
    async fn fail_invalid_email() {
        let harness = TestHarness::new().await;

        let response = harness
            .post("/reports")
            .header(ContentType::JSON)
            .body(
                json!({
                    "location": "Room B42",
                    "description": "Leaky tap",
                    "email": "not-an-email"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);

        let error: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(error["type"], "InvalidEmail");
    }

    #[rocket::async_test]
    async fn fail_invalid_image() {
        let harness = TestHarness::new().await;

        let response = harness
            .post("/reports")
            .header(ContentType::JSON)
            .body(
                json!({
                    "location": "Room B42",
                    "description": "Leaky tap",
                    "email": "janitor@example.com",
                    "image": "data:text/plain;base64,SGVsbG8="
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);

        let error: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(error["type"], "InvalidImage");
    }

    #[rocket::async_test]
    async fn fail_malformed_body() {
        let harness = TestHarness::new().await;

        let response = harness
            .post("/reports")
            .header(ContentType::JSON)
            .body("{not json")
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
    }
}
