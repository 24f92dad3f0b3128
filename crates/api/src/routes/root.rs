use meld_result::Result;
use rocket::serde::json::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// # Node information
#[derive(Serialize, Debug, JsonSchema)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Running version
    pub version: String,
}

/// # Query Node
///
/// Fetch information about which instance is in use.
#[openapi(tag = "Core")]
#[get("/")]
pub async fn root() -> Result<Json<ServiceInfo>> {
    Ok(Json(ServiceInfo {
        name: "Meld".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[cfg(test)]
mod test {
    use crate::util::test::TestHarness;
    use rocket::http::Status;

    #[rocket::async_test]
    async fn fetch_service_info() {
        let harness = TestHarness::new().await;

        let response = harness.get("/").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let info: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(info["name"], "Meld");
    }
}
