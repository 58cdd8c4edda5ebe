use chronalign::RepeatedDates;
use chronalign_demos::common::{archive, training_groups};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Wrap the archive with a closest-date alignment.
    let action = RepeatedDates::builder()
        .source(archive())
        .mode(
            "closest",
            json!({"frequency": "1h", "maximum": "3d", "skip_all_nans": true}),
        )
        .build()?;

    // 2. Align each training batch and show which archive date serves which request.
    for group in training_groups() {
        let joined = action.select(&group).await?;
        for result in joined.results() {
            let served: Vec<String> = result
                .replicate()
                .iter()
                .map(|d| d.format("%d %Hh").to_string())
                .collect();
            println!("{} <- {}", result.fetch_group(), served.join(", "));
        }
    }

    Ok(())
}
