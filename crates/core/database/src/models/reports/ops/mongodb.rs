use bson::Document;
use iso8601_timestamp::Timestamp;
use meld_models::v0;
use meld_result::Result;
use mongodb::options::FindOptions;

use super::{AbstractReports, PartialReport, Report, ReportQuery};
use crate::util::regex::escape_regex;
use crate::MongoDb;

static COL: &str = "reports";

/// Epoch milliseconds, the driver's stored representation of a timestamp
fn timestamp_millis(timestamp: Timestamp) -> i64 {
    timestamp
        .duration_since(Timestamp::UNIX_EPOCH)
        .whole_milliseconds() as i64
}

/// Translate a query's filters into a MongoDB filter document
///
/// User supplied text is escaped so metacharacters match literally, and
/// date bounds are compared as the epoch-millisecond integers documents
/// store `created_at` as.
fn filter_doc(query: &ReportQuery) -> Document {
    let mut filter = if query.archived {
        doc! { "archived": true }
    } else {
        // Documents written before the flag existed count as active
        doc! { "archived": { "$ne": true } }
    };

    if let Some(id) = &query.id {
        filter.insert("_id", id);
    }

    if let Some(status) = &query.status {
        filter.insert("status", status.as_str());
    }

    if let Some(location) = &query.location {
        filter.insert(
            "location",
            doc! {
                "$regex": escape_regex(location),
                "$options": "i"
            },
        );
    }

    if let Some(text) = &query.query {
        let pattern = escape_regex(text);
        filter.insert(
            "$or",
            vec![
                doc! { "description": { "$regex": &pattern, "$options": "i" } },
                doc! { "email": { "$regex": &pattern, "$options": "i" } },
                doc! { "location": { "$regex": &pattern, "$options": "i" } },
            ],
        );
    }

    let mut range = Document::new();
    if let Some(from) = query.from {
        range.insert("$gte", timestamp_millis(from));
    }
    if let Some(to) = query.to {
        range.insert("$lte", timestamp_millis(to));
    }
    if !range.is_empty() {
        filter.insert("created_at", range);
    }

    filter
}

/// Translate a sort order into a MongoDB sort document with an id tie-break
fn sort_doc(sort: &v0::ReportSort) -> Document {
    let direction = match sort.direction {
        v0::SortDirection::Asc => 1,
        v0::SortDirection::Desc => -1,
    };

    let field = match sort.field {
        v0::ReportSortField::CreatedAt => "created_at",
        v0::ReportSortField::Location => "location",
        v0::ReportSortField::Status => "status",
    };

    doc! {
        field: direction,
        "_id": direction
    }
}

#[async_trait]
impl AbstractReports for MongoDb {
    async fn insert_report(&self, report: &Report) -> Result<()> {
        query!(self, insert_one, COL, report).map(|_| ())
    }

    async fn fetch_report(&self, id: &str) -> Result<Report> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    async fn fetch_reports(&self, query: &ReportQuery) -> Result<Vec<Report>> {
        query!(
            self,
            find_with_options,
            COL,
            filter_doc(query),
            FindOptions::builder()
                .sort(sort_doc(&query.sort))
                .skip(query.skip)
                .limit(query.limit)
                .build()
        )
    }

    async fn count_reports(&self, query: &ReportQuery) -> Result<u64> {
        query!(self, count_documents, COL, filter_doc(query))
    }

    async fn update_report(&self, id: &str, partial: &PartialReport) -> Result<Report> {
        let update = doc! {
            "$set": bson::to_document(partial)
                .map_err(|_| create_database_error!("to_document", COL))?
        };

        query!(self, find_one_and_update_by_id, COL, id, update)?
            .ok_or_else(|| create_error!(NotFound))
    }
}

#[cfg(test)]
mod tests {
    use bson::{Bson, RawBsonRef};
    use iso8601_timestamp::Timestamp;
    use meld_models::v0;

    use super::{filter_doc, Report, ReportQuery};

    #[test]
    fn date_bounds_match_the_stored_representation() {
        let created_at = Timestamp::parse("2024-03-01T12:00:00.000Z").unwrap();
        let report = Report {
            id: "01A".to_string(),
            location: "Room B42".to_string(),
            description: "Broken window".to_string(),
            email: "janitor@example.com".to_string(),
            image: None,
            status: v0::ReportStatus::Open,
            archived: false,
            created_at,
        };

        // The driver serializes documents through the raw BSON path
        let stored = bson::to_raw_document_buf(&report).unwrap();
        let stored = stored.get("created_at").unwrap().unwrap();
        let RawBsonRef::Int64(stored_millis) = stored else {
            panic!("created_at should be stored as epoch milliseconds, got {stored:?}");
        };

        let filter = filter_doc(&ReportQuery {
            from: Some(created_at),
            to: Some(created_at),
            ..Default::default()
        });

        let range = filter.get_document("created_at").unwrap();
        assert_eq!(range.get("$gte"), Some(&Bson::Int64(stored_millis)));
        assert_eq!(range.get("$lte"), Some(&Bson::Int64(stored_millis)));
    }
}
