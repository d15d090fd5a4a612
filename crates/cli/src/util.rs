use crate::error::ParseDurationError;
use nu_ansi_term::{AnsiString, Style};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` (defaults to `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn bold<'a>(msg: impl AsRef<str> + 'a) -> AnsiString<'a> {
    Style::new().bold().paint(msg.as_ref().to_owned())
}

/// Parses a whole number of seconds, minutes or hours, e.g. `90`, `30s`, `2 min`.
/// A bare number is read as seconds.
pub fn parse_duration(value: &str) -> Result<Duration, ParseDurationError> {
    let value = value.trim();
    if value.contains('.') {
        return Err(ParseDurationError::NoFloats(value.to_owned()));
    }

    let split_at = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, units) = value.split_at(split_at);
    if units.chars().any(|c| c.is_ascii_digit()) {
        return Err(ParseDurationError::UnexpectedDigit(value.to_owned()));
    }

    let n: u64 = digits
        .parse()
        .map_err(|_| ParseDurationError::InvalidNumber(value.to_owned()))?;
    let multiplier = match units.trim() {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3600,
        other => return Err(ParseDurationError::InvalidUnits(other.to_owned())),
    };

    n.checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| ParseDurationError::InvalidNumber(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_units() {
        assert_eq!(parse_duration("90").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2 min").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(matches!(
            parse_duration("1.5s"),
            Err(ParseDurationError::NoFloats(_))
        ));
        assert!(matches!(
            parse_duration("5s5"),
            Err(ParseDurationError::UnexpectedDigit(_))
        ));
        assert!(matches!(
            parse_duration("s"),
            Err(ParseDurationError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_duration("3 fortnights"),
            Err(ParseDurationError::InvalidUnits(_))
        ));
        assert!(matches!(
            parse_duration("18446744073709551615h"),
            Err(ParseDurationError::InvalidNumber(_))
        ));
    }
}
