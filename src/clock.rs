use chrono::{DateTime, Duration, Utc};

/// Time source for session timing. Tests use a fixed clock they can advance.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Seconds between two instants, clamped at zero and rounded to 2 decimals.
pub fn elapsed_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds().max(0) as f64;
    (millis / 10.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let mut clock = Clock::fixed(start);
        clock.advance(Duration::milliseconds(1_234));
        assert_eq!(elapsed_seconds(start, clock.now()), 1.23);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let earlier = start - Duration::seconds(5);
        assert_eq!(elapsed_seconds(start, earlier), 0.0);
    }

    #[test]
    fn test_elapsed_rounds_half_up() {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(
            elapsed_seconds(start, start + Duration::milliseconds(2_345)),
            2.35
        );
    }
}
