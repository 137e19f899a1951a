//! `H:M:S.f` clip timestamps.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid timestamp '{0}'")]
pub struct InvalidTimestamp(pub String);

/// Convert `0:00:16.300`, `01:05.5` or `12.25` to seconds.
pub fn parse_timestamp(raw: &str) -> Result<f64, InvalidTimestamp> {
    let invalid = || InvalidTimestamp(raw.to_string());
    let parts: Vec<&str> = raw.trim().split(':').collect();

    let whole = |s: &str| s.trim().parse::<u32>().map(f64::from).map_err(|_| invalid());
    let frac = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(invalid)
    };

    match *parts.as_slice() {
        [h, m, s] => Ok(whole(h)? * 3600.0 + whole(m)? * 60.0 + frac(s)?),
        [m, s] => Ok(whole(m)? * 60.0 + frac(s)?),
        [s] => frac(s),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_hours_minutes_seconds() {
        assert!(close(parse_timestamp("0:00:16.300").unwrap(), 16.3));
        assert!(close(parse_timestamp("1:02:03.5").unwrap(), 3723.5));
    }

    #[test]
    fn test_minutes_seconds() {
        assert!(close(parse_timestamp("01:05.5").unwrap(), 65.5));
    }

    #[test]
    fn test_seconds_only() {
        assert!(close(parse_timestamp("12.25").unwrap(), 12.25));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("abc").is_err());
        assert!(parse_timestamp("1:2:3:4").is_err());
        assert!(parse_timestamp("1.5:00").is_err());
        assert!(parse_timestamp("").is_err());
    }
}
