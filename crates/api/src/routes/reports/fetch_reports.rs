use meld_database::{Database, ReportQuery};
use meld_models::v0;
use meld_result::Result;
use rocket::serde::json::Json;
use rocket::State;

/// # Fetch Reports
///
/// Fetch one page of reports with filters, sorting and pagination.
///
/// Out of range pagination values are clamped and unparseable date or sort
/// filters fall back to their defaults; the effective values are echoed
/// back in the listing metadata.
#[openapi(tag = "Reports")]
#[get("/?<options..>")]
pub async fn fetch_reports(
    db: &State<Database>,
    options: v0::OptionsFetchReports,
) -> Result<Json<v0::ReportListing>> {
    let page = options.page();
    let per_page = options.per_page();
    let archived = options.archived();
    let from = options.created_after();
    let to = options.created_before();
    let sort = options.sort();

    let query = ReportQuery {
        id: options.id,
        location: options.location,
        query: options.query,
        status: options.status,
        archived,
        from,
        to,
        sort,
        // Saturate rather than overflow, capped to what the store accepts
        skip: (page - 1)
            .saturating_mul(per_page)
            .min(i64::MAX as u64),
        limit: per_page as i64,
    };

    let data = db.fetch_reports(&query).await?;
    let total = db.count_reports(&query).await?;

    Ok(Json(v0::ReportListing {
        data: data.into_iter().map(Into::into).collect(),
        meta: v0::ListingMeta {
            total,
            page,
            per_page,
        },
    }))
}

#[cfg(test)]
mod test {
    use crate::util::test::TestHarness;
    use iso8601_timestamp::Timestamp;
    use meld_database::Report;
    use meld_models::v0;
    use rocket::http::Status;

    async fn seed(harness: &TestHarness) {
        let entries = [
            ("01A", "Room B42", "Broken window", "alice@example.com", "2024-03-01", v0::ReportStatus::Open, false),
            ("01B", "Room C13", "Leaky tap", "bob@example.com", "2024-03-02", v0::ReportStatus::InProgress, false),
            ("01C", "Gym", "Flickering light", "carol@example.com", "2024-03-03", v0::ReportStatus::Done, false),
            ("01D", "Room (3.10)", "Door jammed", "dave@example.com", "2024-03-04", v0::ReportStatus::Open, false),
            ("01E", "Cafeteria", "Broken chair", "erin@example.com", "2024-03-05", v0::ReportStatus::Open, true),
        ];

        for (id, location, description, email, day, status, archived) in entries {
            harness
                .db
                .insert_report(&Report {
                    id: id.to_string(),
                    location: location.to_string(),
                    description: description.to_string(),
                    email: email.to_string(),
                    image: None,
                    status,
                    archived,
                    created_at: Timestamp::parse(&format!("{day}T12:00:00.000Z")).unwrap(),
                })
                .await
                .unwrap();
        }
    }

    async fn listing(harness: &TestHarness, uri: &str) -> v0::ReportListing {
        let response = harness.get(uri).dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    fn ids(listing: &v0::ReportListing) -> Vec<&str> {
        listing.data.iter().map(|report| report.id.as_str()).collect()
    }

    #[rocket::async_test]
    async fn default_listing_is_newest_first_and_active_only() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let listing = listing(&harness, "/reports").await;
        assert_eq!(ids(&listing), vec!["01D", "01C", "01B", "01A"]);
        assert_eq!(listing.meta.total, 4);
        assert_eq!(listing.meta.page, 1);
        assert_eq!(listing.meta.per_page, v0::DEFAULT_PAGE_SIZE);
    }

    #[rocket::async_test]
    async fn pages_walk_the_result_without_gaps_or_repeats() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let first = listing(&harness, "/reports?limit=3&page=1").await;
        let second = listing(&harness, "/reports?limit=3&page=2").await;
        let third = listing(&harness, "/reports?limit=3&page=3").await;

        assert_eq!(ids(&first), vec!["01D", "01C", "01B"]);
        assert_eq!(ids(&second), vec!["01A"]);
        assert!(third.data.is_empty());

        // Every page reports the same total
        assert_eq!(first.meta.total, 4);
        assert_eq!(second.meta.total, 4);
        assert_eq!(third.meta.total, 4);
    }

    #[rocket::async_test]
    async fn pagination_values_are_clamped_and_echoed() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let listing = listing(&harness, "/reports?page=0&limit=1000").await;
        assert_eq!(listing.meta.page, 1);
        assert_eq!(listing.meta.per_page, v0::MAX_PAGE_SIZE);
        assert_eq!(listing.data.len(), 4);
    }

    #[rocket::async_test]
    async fn far_out_of_range_pages_are_empty_not_errors() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let listing = listing(
            &harness,
            "/reports?page=9223372036854775807&limit=100",
        )
        .await;
        assert!(listing.data.is_empty());
        assert_eq!(listing.meta.total, 4);
    }

    #[rocket::async_test]
    async fn filters_narrow_the_listing() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let by_status = listing(&harness, "/reports?status=in_progress").await;
        assert_eq!(ids(&by_status), vec!["01B"]);

        let by_location = listing(&harness, "/reports?location=room").await;
        assert_eq!(ids(&by_location), vec!["01D", "01B", "01A"]);

        let by_text = listing(&harness, "/reports?query=broken").await;
        assert_eq!(ids(&by_text), vec!["01A"]);

        let by_id = listing(&harness, "/reports?id=01C").await;
        assert_eq!(ids(&by_id), vec!["01C"]);

        let by_range = listing(&harness, "/reports?from=2024-03-02&to=2024-03-03").await;
        assert_eq!(ids(&by_range), vec!["01C", "01B"]);
    }

    #[rocket::async_test]
    async fn archived_partition_is_listed_separately() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let archived = listing(&harness, "/reports?archived=true").await;
        assert_eq!(ids(&archived), vec!["01E"]);
        assert_eq!(archived.meta.total, 1);
    }

    #[rocket::async_test]
    async fn sort_keys_are_applied() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let by_oldest = listing(&harness, "/reports?sort=createdAt:asc").await;
        assert_eq!(ids(&by_oldest), vec!["01A", "01B", "01C", "01D"]);

        let by_location = listing(&harness, "/reports?sort=location:asc").await;
        assert_eq!(ids(&by_location), vec!["01C", "01D", "01A", "01B"]);

        // Unknown sort fields fall back to the submission date
        let fallback = listing(&harness, "/reports?sort=bogus:asc").await;
        assert_eq!(ids(&fallback), vec!["01A", "01B", "01C", "01D"]);
    }

    #[rocket::async_test]
    async fn filter_metacharacters_match_literally() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let exact = listing(&harness, "/reports?location=Room%20(3.10)").await;
        assert_eq!(ids(&exact), vec!["01D"]);

        // `.` never acts as a wildcard
        let wildcard = listing(&harness, "/reports?location=Room%20(3x10)").await;
        assert!(wildcard.data.is_empty());
    }

    #[rocket::async_test]
    async fn unparseable_date_filters_are_ignored() {
        let harness = TestHarness::new().await;
        seed(&harness).await;

        let listing = listing(&harness, "/reports?from=yesterday&to=").await;
        assert_eq!(listing.meta.total, 4);
    }
}
