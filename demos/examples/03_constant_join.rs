use std::sync::Arc;

use chronalign::{DataSource, Join, RepeatedDates};
use chronalign_demos::common::{archive, training_groups};
use chronalign_mock::MockSource;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Time-invariant forcings, fetched once from a fixed date.
    let forcings = RepeatedDates::builder()
        .source(Arc::new(
            MockSource::new()
                .with_name("forcings")
                .with_params(["z", "lsm"]),
        ))
        .mode("constant", json!({"date": "2021-01-01T00:00:00Z"}))
        .build()?;

    // Dynamic fields aligned to the closest analysis.
    let dynamic = RepeatedDates::builder()
        .source(archive())
        .mode("closest", json!({"frequency": "1h", "maximum": "3d"}))
        .build()?;

    let join = Join::new(vec![Arc::new(dynamic), Arc::new(forcings)])?;

    for group in training_groups() {
        let res = join.select(&group).await?;
        println!("{group}: {} fields from {}", res.len(), join.name());
    }

    Ok(())
}
