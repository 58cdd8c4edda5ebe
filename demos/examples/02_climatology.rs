use chronalign::{AlignmentConfig, RepeatedDates};
use chronalign_core::{ClimatologyOptions, GroupOfDates, ProviderKey};
use chronalign_demos::common::{archive, at};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Serve any year's mid-January dates from the 2021 archive, hour by hour.
    let action = RepeatedDates::builder()
        .source(archive())
        .alignment(AlignmentConfig::Climatology(ClimatologyOptions {
            year: 2021,
            day: 15,
            hour: None,
        }))
        .build()?;

    let group = GroupOfDates::new(
        vec![
            at("1995-01-03T06:00:00Z"),
            at("2008-01-27T06:00:00Z"),
            at("2030-01-15T18:00:00Z"),
        ],
        ProviderKey::new("scenarios"),
    )?;

    for field in action.select(&group).await?.datasource()? {
        println!(
            "{} at {:?}: {:?}",
            field.metadata("param").map(|v| v.to_string()).unwrap_or_default(),
            field.valid_datetime(),
            field.values()
        );
    }

    Ok(())
}
