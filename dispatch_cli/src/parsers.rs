use jiff::{SignedDuration, Span, SpanRelativeTo};

/// Durations written as `30s`, `1m 30s`, `PT1M` or a whole number of seconds.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    let input = input.trim();

    input
        .parse::<SignedDuration>()
        .ok()
        .or_else(|| {
            input
                .parse::<Span>()
                .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
                .ok()
        })
        .or_else(|| input.parse::<u32>().ok().map(|secs| SignedDuration::from_secs(secs.into())))
        .ok_or_else(|| format!("Invalid duration: {input}"))
}

/// Provider timeouts, zero would fail every call.
pub fn parse_positive_duration(input: &str) -> Result<SignedDuration, String> {
    let duration = parse_duration(input)?;

    if !duration.is_positive() {
        return Err(format!("Duration must be positive: {input}"));
    }

    Ok(duration)
}

/// Dwell times, a negative one would move arrivals back in time.
pub fn parse_non_negative_duration(input: &str) -> Result<SignedDuration, String> {
    let duration = parse_duration(input)?;

    if duration.is_negative() {
        return Err(format!("Duration cannot be negative: {input}"));
    }

    Ok(duration)
}
