use revolt_rocket_okapi::revolt_okapi::openapi3::OpenApi;
use rocket::Route;

mod create_report;
mod edit_report_archived;
mod edit_report_status;
mod fetch_reports;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        create_report::create_report,
        fetch_reports::fetch_reports,
        edit_report_status::edit_report_status,
        edit_report_archived::edit_report_archived,
    ]
}
