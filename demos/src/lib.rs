//! Shared setup for the chronalign demos.

pub mod common {
    use std::sync::Arc;

    use chrono::TimeDelta;
    use chronalign_core::{DataSource, DateRange, GroupOfDates, ProviderKey, Timestamp};
    use chronalign_mock::MockSource;

    /// Parse an RFC 3339 instant used in a demo.
    ///
    /// # Panics
    /// Panics on malformed literals; demos only pass constants.
    #[must_use]
    pub fn at(s: &str) -> Timestamp {
        chrono::DateTime::parse_from_rfc3339(s)
            .expect("valid demo timestamp")
            .with_timezone(&chrono::Utc)
    }

    /// Six-hourly January 2021 archive with a two-day outage and a bad
    /// (all-NaN) analysis, standing in for a real archive reader.
    #[must_use]
    pub fn archive() -> Arc<dyn DataSource> {
        let outage = [
            "2021-01-10T00:00:00Z",
            "2021-01-10T06:00:00Z",
            "2021-01-10T12:00:00Z",
            "2021-01-10T18:00:00Z",
            "2021-01-11T00:00:00Z",
            "2021-01-11T06:00:00Z",
        ]
        .map(at);
        Arc::new(
            MockSource::new()
                .with_name("era5-mock")
                .with_params(["2t", "2d"])
                .without(outage)
                .with_all_nans([at("2021-01-11T12:00:00Z")]),
        )
    }

    /// Hourly training dates across the outage, in batches of six.
    ///
    /// # Panics
    /// Panics if the constant range is rejected.
    #[must_use]
    pub fn training_groups() -> Vec<GroupOfDates> {
        DateRange::new(
            at("2021-01-09T18:00:00Z"),
            at("2021-01-11T23:00:00Z"),
            TimeDelta::hours(3),
        )
        .expect("valid demo range")
        .with_provider(ProviderKey::new("training"))
        .groups(6)
        .expect("non-zero group size")
    }
}
