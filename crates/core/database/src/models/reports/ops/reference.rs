use meld_result::Result;

use super::{AbstractReports, PartialReport, Report, ReportQuery};
use crate::ReferenceDb;

#[async_trait]
impl AbstractReports for ReferenceDb {
    async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.contains_key(&report.id) {
            Err(create_database_error!("insert_one", "reports"))
        } else {
            reports.insert(report.id.to_string(), report.clone());
            Ok(())
        }
    }

    async fn fetch_report(&self, id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_reports(&self, query: &ReportQuery) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;

        let mut matched: Vec<Report> = reports
            .values()
            .filter(|report| query.matches(report))
            .cloned()
            .collect();

        matched.sort_by(|a, b| query.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn count_reports(&self, query: &ReportQuery) -> Result<u64> {
        let reports = self.reports.lock().await;
        Ok(reports
            .values()
            .filter(|report| query.matches(report))
            .count() as u64)
    }

    async fn update_report(&self, id: &str, partial: &PartialReport) -> Result<Report> {
        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.get_mut(id) {
            report.apply_options(partial.clone());
            Ok(report.clone())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
