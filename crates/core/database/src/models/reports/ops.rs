use meld_result::Result;

use super::{PartialReport, Report, ReportQuery};

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Fetch the page of reports selected by the given query
    async fn fetch_reports(&self, query: &ReportQuery) -> Result<Vec<Report>>;

    /// Count all reports matched by the given query, ignoring its page window
    async fn count_reports(&self, query: &ReportQuery) -> Result<u64>;

    /// Update a report, returning it as stored after the update
    async fn update_report(&self, id: &str, partial: &PartialReport) -> Result<Report>;
}
