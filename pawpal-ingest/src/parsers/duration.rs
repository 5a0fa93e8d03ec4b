//! Human duration strings -> minutes.
//!
//! Accepted: "45", "45m", "45 min", "1h", "1h30m", "1h 30m", "2 hours".

use anyhow::{bail, Result};
use regex::Regex;

/// Compiled duration matcher; build once per import.
#[derive(Debug, Clone)]
pub struct DurationParser {
    re: Regex,
}

impl DurationParser {
    pub fn new() -> Result<Self> {
        let re = Regex::new(concat!(
            r"^(?:(?P<h>\d+)\s*h(?:ours?|rs?)?)?\s*",
            r"(?:(?P<m>\d+)\s*(?:minutes?|mins?|m)?)?$"
        ))?;
        Ok(Self { re })
    }

    pub fn parse(&self, s: &str) -> Result<i32> {
        let s = s.trim().to_ascii_lowercase();
        let Some(caps) = self.re.captures(&s) else {
            bail!("unrecognized duration '{s}'");
        };
        if caps.name("h").is_none() && caps.name("m").is_none() {
            bail!("empty duration");
        }

        let hours: i64 = match caps.name("h") {
            Some(h) => h.as_str().parse()?,
            None => 0,
        };
        let minutes: i64 = match caps.name("m") {
            Some(m) => m.as_str().parse()?,
            None => 0,
        };

        let Some(total) = hours.checked_mul(60).and_then(|h| h.checked_add(minutes)) else {
            bail!("duration too large: '{s}'");
        };
        if total <= 0 {
            bail!("duration must be positive (got '{s}')");
        }
        i32::try_from(total).map_err(|_| anyhow::anyhow!("duration too large: '{s}'"))
    }
}

/// One-off parse; prefer a shared `DurationParser` in loops.
pub fn parse_duration_minutes(s: &str) -> Result<i32> {
    DurationParser::new()?.parse(s)
}
