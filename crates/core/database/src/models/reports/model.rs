use iso8601_timestamp::Timestamp;
use meld_models::v0;
use meld_result::Result;

use crate::Database;

auto_derived_partial!(
    /// Damage report
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Where the damage is located
        pub location: String,
        /// What is broken
        pub description: String,
        /// Contact address of the reporter
        pub email: String,
        /// Optional photo, encoded as a `data:image/` URI
        #[serde(skip_serializing_if = "Option::is_none")]
        pub image: Option<String>,
        /// Triage status
        #[serde(default)]
        pub status: v0::ReportStatus,
        /// Whether this report is in the archived partition
        ///
        /// Documents written before the flag existed count as active.
        #[serde(default)]
        pub archived: bool,
        /// When this report was submitted
        pub created_at: Timestamp,
    },
    "PartialReport"
);

auto_derived!(
    /// Filter predicate, sort order and page window for fetching reports
    pub struct ReportQuery {
        /// Restrict to the report with this exact id
        pub id: Option<String>,
        /// Case-insensitive substring match on `location`
        pub location: Option<String>,
        /// Case-insensitive substring match on any of description, email
        /// or location
        pub query: Option<String>,
        /// Exact status match
        pub status: Option<v0::ReportStatus>,
        /// Which partition to select
        pub archived: bool,
        /// Inclusive lower bound on `created_at`
        pub from: Option<Timestamp>,
        /// Inclusive upper bound on `created_at`
        pub to: Option<Timestamp>,
        /// Sort key and direction
        pub sort: v0::ReportSort,
        /// Documents to skip before the page starts
        pub skip: u64,
        /// Page size
        pub limit: i64,
    }
);

impl Default for ReportQuery {
    fn default() -> Self {
        ReportQuery {
            id: None,
            location: None,
            query: None,
            status: None,
            archived: false,
            from: None,
            to: None,
            sort: v0::ReportSort::default(),
            skip: 0,
            limit: v0::DEFAULT_PAGE_SIZE as i64,
        }
    }
}

impl ReportQuery {
    /// Whether a report satisfies this query's filter predicate
    ///
    /// All supplied filters combine with logical AND; the free-text `query`
    /// filter matches any of description, email or location and that
    /// OR-group ANDs with the rest.
    pub fn matches(&self, report: &Report) -> bool {
        if report.archived != self.archived {
            return false;
        }

        if let Some(id) = &self.id {
            if &report.id != id {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if &report.status != status {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !report
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            if !report.description.to_lowercase().contains(&query)
                && !report.email.to_lowercase().contains(&query)
                && !report.location.to_lowercase().contains(&query)
            {
                return false;
            }
        }

        if let Some(from) = &self.from {
            if report.created_at < *from {
                return false;
            }
        }

        if let Some(to) = &self.to {
            if report.created_at > *to {
                return false;
            }
        }

        true
    }

    /// Total order used for listing
    ///
    /// Ties on the sort key are broken by id so that walking pages of an
    /// unchanged store never skips or repeats a report.
    pub fn compare(&self, a: &Report, b: &Report) -> std::cmp::Ordering {
        let ordering = match self.sort.field {
            v0::ReportSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            v0::ReportSortField::Location => a.location.cmp(&b.location),
            v0::ReportSortField::Status => a.status.as_str().cmp(b.status.as_str()),
        }
        .then_with(|| a.id.cmp(&b.id));

        match self.sort.direction {
            v0::SortDirection::Asc => ordering,
            v0::SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl Report {
    /// Validate a submission and persist it with freshly assigned defaults
    pub async fn create(db: &Database, data: v0::DataCreateReport) -> Result<Report> {
        if data.location.is_empty() || data.description.is_empty() || data.email.is_empty() {
            return Err(create_error!(MissingFields));
        }

        if !v0::is_valid_email(&data.email) {
            return Err(create_error!(InvalidEmail));
        }

        if !v0::is_valid_image_payload(data.image.as_deref()) {
            return Err(create_error!(InvalidImage));
        }

        let report = Report {
            id: ulid::Ulid::new().to_string(),
            location: data.location,
            description: data.description,
            email: data.email,
            image: data.image,
            status: v0::ReportStatus::Open,
            archived: false,
            created_at: Timestamp::now_utc(),
        };

        db.insert_report(&report).await?;
        info!("Saved new damage report {}.", report.id);
        Ok(report)
    }

    /// Update this report, reloading it as stored after the update
    pub async fn update(&mut self, db: &Database, partial: PartialReport) -> Result<()> {
        *self = db.update_report(&self.id, &partial).await?;
        Ok(())
    }
}

impl From<Report> for v0::Report {
    fn from(value: Report) -> Self {
        v0::Report {
            id: value.id,
            location: value.location,
            description: value.description,
            email: value.email,
            image: value.image,
            status: value.status,
            archived: value.archived,
            created_at: value.created_at,
        }
    }
}
