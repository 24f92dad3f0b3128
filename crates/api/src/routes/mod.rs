use revolt_rocket_okapi::{revolt_okapi::openapi3::OpenApi, settings::OpenApiSettings};
use rocket::{Build, Rocket};

mod reports;
mod root;

pub fn mount(mut rocket: Rocket<Build>) -> Rocket<Build> {
    let settings = OpenApiSettings::default();

    mount_endpoints_and_merged_docs! {
        rocket, "/".to_owned(), settings,
        "/" => (vec![], custom_openapi_spec()),
        "" => openapi_get_routes_spec![root::root],
        "/reports" => reports::routes()
    };

    rocket
}

fn custom_openapi_spec() -> OpenApi {
    use revolt_rocket_okapi::revolt_okapi::openapi3::*;

    OpenApi {
        openapi: OpenApi::default_version(),
        info: Info {
            title: "Meld API".to_owned(),
            description: Some("Damage reporting backend for facility management.".to_owned()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        },
        tags: vec![
            Tag {
                name: "Core".to_owned(),
                description: Some("Information about this Meld node".to_owned()),
                ..Default::default()
            },
            Tag {
                name: "Reports".to_owned(),
                description: Some("Submit and manage damage reports".to_owned()),
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}
