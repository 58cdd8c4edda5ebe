use chronalign::RepeatedDates;
use chronalign_demos::common::{archive, training_groups};
use serde_json::json;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,chronalign=trace,chronalign_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let action = RepeatedDates::builder()
        .source(archive())
        .mode(
            "closest",
            json!({"frequency": "1h", "maximum": "3d", "skip_all_nans": true}),
        )
        .build()?;

    for group in training_groups() {
        let fields = action.select(&group).await?.datasource()?;
        tracing::info!(group = %group, fields = fields.len(), "aligned");
    }

    Ok(())
}
