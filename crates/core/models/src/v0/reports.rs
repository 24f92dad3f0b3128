use iso8601_timestamp::Timestamp;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default page size for report listings
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum page size for report listings
pub const MAX_PAGE_SIZE: u64 = 100;

/// Syntactic email pattern, `local@domain.tld`-shaped
///
/// No DNS or mailbox validation is performed.
pub static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

auto_derived!(
    /// Damage report
    #[serde(rename_all = "camelCase")]
    pub struct Report {
        /// Unique Id
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
        pub status: ReportStatus,
        /// Whether this report has been archived
        pub archived: bool,
        /// When this report was submitted
        pub created_at: Timestamp,
    }

    /// Triage status of a report
    #[serde(rename_all = "snake_case")]
    #[cfg_attr(feature = "rocket", derive(rocket::FromFormField))]
    pub enum ReportStatus {
        /// Nobody has looked at this yet
        #[cfg_attr(feature = "rocket", field(value = "open"))]
        Open,
        /// Someone is working on it
        #[cfg_attr(feature = "rocket", field(value = "in_progress"))]
        InProgress,
        /// Fixed
        #[cfg_attr(feature = "rocket", field(value = "done"))]
        Done,
    }

    /// New report submission
    ///
    /// Absent fields deserialize as empty so they are rejected by the
    /// missing-field check rather than during parsing.
    pub struct DataCreateReport {
        /// Where the damage is located
        #[serde(default)]
        pub location: String,
        /// What is broken
        #[serde(default)]
        pub description: String,
        /// Contact address of the reporter
        #[serde(default)]
        pub email: String,
        /// Optional photo, encoded as a `data:image/` URI
        #[serde(skip_serializing_if = "Option::is_none")]
        pub image: Option<String>,
    }

    /// Status change for an existing report
    ///
    /// The status arrives as text and is parsed at the boundary so that
    /// anything outside the closed set is rejected before reaching the store.
    pub struct DataEditReportStatus {
        /// New status
        pub status: String,
    }

    /// Archive flag change for an existing report
    pub struct DataEditReportArchived {
        /// Whether the report should be archived
        pub archived: bool,
    }

    /// Field a report listing can be sorted by
    pub enum ReportSortField {
        CreatedAt,
        Location,
        Status,
    }

    /// Sort direction
    pub enum SortDirection {
        Asc,
        Desc,
    }

    /// Sort key and direction for a report listing
    pub struct ReportSort {
        pub field: ReportSortField,
        pub direction: SortDirection,
    }

    /// Filter, sort and pagination parameters for listing reports
    ///
    /// The same struct builds requests on the client and interprets them on
    /// the server, so both sides agree on defaults and clamping.
    #[cfg_attr(feature = "rocket", derive(rocket::FromForm))]
    pub struct OptionsFetchReports {
        /// Restrict to the report with this exact id
        #[serde(skip_serializing_if = "Option::is_none")]
        pub id: Option<String>,
        /// Case-insensitive substring match on `location`
        #[serde(skip_serializing_if = "Option::is_none")]
        pub location: Option<String>,
        /// Case-insensitive substring match on any of description, email
        /// or location
        #[serde(skip_serializing_if = "Option::is_none")]
        pub query: Option<String>,
        /// Exact status match
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<ReportStatus>,
        /// Select the archived partition instead of the active one
        #[serde(skip_serializing_if = "Option::is_none")]
        pub archived: Option<bool>,
        /// Inclusive lower bound on submission date
        #[serde(skip_serializing_if = "Option::is_none")]
        pub from: Option<String>,
        /// Inclusive upper bound on submission date
        #[serde(skip_serializing_if = "Option::is_none")]
        pub to: Option<String>,
        /// 1-indexed page number
        #[serde(skip_serializing_if = "Option::is_none")]
        pub page: Option<i64>,
        /// Page size
        #[serde(skip_serializing_if = "Option::is_none")]
        pub limit: Option<i64>,
        /// Sort key, `field:direction`
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sort: Option<String>,
    }

    /// Pagination metadata echoed back with every listing
    #[serde(rename_all = "camelCase")]
    pub struct ListingMeta {
        /// Count of all reports matching the filter, ignoring pagination
        pub total: u64,
        /// Effective page number after clamping
        pub page: u64,
        /// Effective page size after clamping
        pub per_page: u64,
    }

    /// One page of reports plus pagination metadata
    pub struct ReportListing {
        pub data: Vec<Report>,
        pub meta: ListingMeta,
    }
);

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Open
    }
}

impl ReportStatus {
    /// Wire and storage representation of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::InProgress => "in_progress",
            ReportStatus::Done => "done",
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ReportStatus::Open),
            "in_progress" => Ok(ReportStatus::InProgress),
            "done" => Ok(ReportStatus::Done),
            _ => Err(()),
        }
    }
}

impl Default for ReportSort {
    fn default() -> Self {
        ReportSort {
            field: ReportSortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl Default for OptionsFetchReports {
    fn default() -> Self {
        OptionsFetchReports {
            id: None,
            location: None,
            query: None,
            status: None,
            archived: None,
            from: None,
            to: None,
            page: None,
            limit: None,
            sort: None,
        }
    }
}

impl OptionsFetchReports {
    /// Effective 1-indexed page number, clamped to at least 1
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1) as u64
    }

    /// Effective page size, clamped to `1..=MAX_PAGE_SIZE`
    pub fn per_page(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u64
    }

    /// Which partition of reports to list
    pub fn archived(&self) -> bool {
        self.archived.unwrap_or(false)
    }

    /// Effective sort key and direction
    pub fn sort(&self) -> ReportSort {
        parse_sort(self.sort.as_deref())
    }

    /// Inclusive lower bound on submission date, if one parses
    pub fn created_after(&self) -> Option<Timestamp> {
        self.from
            .as_deref()
            .and_then(|raw| parse_date_bound(raw, false))
    }

    /// Inclusive upper bound on submission date, if one parses
    pub fn created_before(&self) -> Option<Timestamp> {
        self.to
            .as_deref()
            .and_then(|raw| parse_date_bound(raw, true))
    }
}

/// Parse a `field:direction` sort key
///
/// Unknown fields fall back to `createdAt`, any direction other than `asc`
/// is treated as `desc`.
pub fn parse_sort(raw: Option<&str>) -> ReportSort {
    let Some(raw) = raw else {
        return ReportSort::default();
    };

    let (field, direction) = raw.split_once(':').unwrap_or((raw, "desc"));

    ReportSort {
        field: match field {
            "location" => ReportSortField::Location,
            "status" => ReportSortField::Status,
            _ => ReportSortField::CreatedAt,
        },
        direction: if direction == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    }
}

/// Leniently parse a date filter bound
///
/// Accepts full ISO 8601 timestamps as well as bare `YYYY-MM-DD` dates; a
/// bare date used as an upper bound extends to the end of that day.
/// Unparseable input yields `None` and the filter is ignored.
pub fn parse_date_bound(raw: &str, end_of_day: bool) -> Option<Timestamp> {
    if raw.is_empty() {
        return None;
    }

    if raw.contains('T') {
        return Timestamp::parse(raw);
    }

    let suffix = if end_of_day {
        "T23:59:59.999Z"
    } else {
        "T00:00:00.000Z"
    };

    Timestamp::parse(&format!("{raw}{suffix}"))
}

/// Check whether a string is a syntactically valid email address
pub fn is_valid_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

/// Check whether an optional image payload is a self-describing image
/// data URI
///
/// An absent image is valid; a present one must carry an image media type.
pub fn is_valid_image_payload(image: Option<&str>) -> bool {
    match image {
        None => true,
        Some(image) => image.starts_with("data:image/"),
    }
}
