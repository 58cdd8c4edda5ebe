use chrono::TimeDelta;
use chronalign_core::Timestamp;

fn at(y: i32, m: u32, d: u32, h: u32) -> Option<Timestamp> {
    chrono::NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(h, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Every six hours through January 2021, the default archive coverage.
pub fn january_2021_six_hourly() -> Vec<Timestamp> {
    let (Some(start), Some(end)) = (at(2021, 1, 1, 0), at(2021, 1, 31, 18)) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    let mut cur = start;
    while cur <= end {
        out.push(cur);
        cur += TimeDelta::hours(6);
    }
    out
}
