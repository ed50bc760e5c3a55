use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn millis_to_utc(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|err| anyhow!(err))
}

/// Parses a backend timestamp into epoch milliseconds. The API mixes
/// RFC 3339 strings and bare `YYYY-MM-DDTHH:MM:SS` datetimes.
pub fn parse_timestamp_millis(text: &str) -> Result<i64> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.timestamp_millis());
    }
    let naive = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|err| anyhow!("unparsable timestamp '{}': {}", text, err))?;
    Ok(naive.and_utc().timestamp_millis())
}
