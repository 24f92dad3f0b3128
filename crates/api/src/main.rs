#[macro_use]
extern crate rocket;
#[macro_use]
extern crate revolt_rocket_okapi;
#[macro_use]
extern crate serde_json;

pub mod routes;
pub mod util;

use std::str::FromStr;

use log::info;
use meld_database::DatabaseInfo;
use rocket::data::{Limits, ToByteUnit};
use rocket::{Build, Rocket};
use rocket_cors::AllowedOrigins;

/// Build the Rocket instance serving the reports API
pub async fn web() -> Rocket<Build> {
    let config = meld_config::config().await;

    // Setup database
    let db = DatabaseInfo::Auto
        .connect()
        .await
        .expect("Failed to connect to the database.");

    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: ["Get", "Post", "Patch", "Options", "Head"]
            .iter()
            .map(|s| FromStr::from_str(s).unwrap())
            .collect(),
        ..Default::default()
    }
    .to_cors()
    .expect("Failed to create CORS.");

    let figment = rocket::Config::figment().merge((
        "limits",
        Limits::default().limit("json", config.api.limits.json_payload_mb.mebibytes()),
    ));

    routes::mount(rocket::custom(figment))
        .mount("/", rocket_cors::catch_all_options_routes())
        .mount(
            "/swagger/",
            revolt_rocket_okapi::swagger_ui::make_swagger_ui(
                &revolt_rocket_okapi::swagger_ui::SwaggerUIConfig {
                    url: "../openapi.json".to_owned(),
                    ..Default::default()
                },
            ),
        )
        .register("/", util::catchers::catchers())
        .manage(db)
        .manage(cors.clone())
        .attach(cors)
}

#[launch]
async fn rocket() -> _ {
    // Configure logging and environment
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    info!(
        "Starting Meld server [version {}].",
        env!("CARGO_PKG_VERSION")
    );

    web().await
}
