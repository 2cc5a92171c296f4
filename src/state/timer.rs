//! Auto-off timer requests, deadline resolution and countdown breakdown.
//!
//! A `TimerRequest` is transient: it is resolved to an absolute deadline once
//! (at commit time) and then dropped. Resolution is generic over the time zone
//! so that day rollover can be checked against fixed offsets as well as the
//! local zone.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Duration as ChronoDuration, LocalResult, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt;

use crate::i18n::Labels;

/// Fixed durations offered by the timer dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPreset {
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
}

impl TimerPreset {
    pub const ALL: [TimerPreset; 4] = [
        TimerPreset::ThirtyMinutes,
        TimerPreset::OneHour,
        TimerPreset::TwoHours,
        TimerPreset::FourHours,
    ];

    pub fn duration(self) -> ChronoDuration {
        match self {
            TimerPreset::ThirtyMinutes => ChronoDuration::minutes(30),
            TimerPreset::OneHour => ChronoDuration::hours(1),
            TimerPreset::TwoHours => ChronoDuration::hours(2),
            TimerPreset::FourHours => ChronoDuration::hours(4),
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// What the user asked the timer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerRequest {
    /// Switch off after this much time.
    Duration(ChronoDuration),
    /// Switch off at the next occurrence of this wall-clock time.
    ClockTime(NaiveTime),
}

impl TimerRequest {
    pub fn from_preset(preset: TimerPreset) -> Self {
        TimerRequest::Duration(preset.duration())
    }

    /// Clock-time request for `hour:minute`; out-of-range values are rejected.
    pub fn at(hour: u32, minute: u32) -> Result<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .with_context(|| format!("Invalid clock time {hour:02}:{minute:02}"))?;
        Ok(TimerRequest::ClockTime(time))
    }

    /// Parse a command-line timer spec.
    ///
    /// Accepts `HH:MM` for a clock time, or a duration made of hour and minute
    /// parts such as `30m`, `1h`, `1h30m` or `90m`. A bare number is minutes.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();

        if let Some((hour, minute)) = spec.split_once(':') {
            let hour: u32 = hour
                .parse()
                .with_context(|| format!("Invalid hour in timer '{spec}'"))?;
            let minute: u32 = minute
                .parse()
                .with_context(|| format!("Invalid minute in timer '{spec}'"))?;
            return Self::at(hour, minute);
        }

        if spec.is_empty() {
            bail!("Timer value is empty");
        }

        let mut total_minutes: i64 = 0;
        let mut digits = String::new();
        for ch in spec.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                'h' | 'H' | 'm' | 'M' => {
                    let value: i64 = digits
                        .parse()
                        .with_context(|| format!("Missing number before '{ch}' in '{spec}'"))?;
                    digits.clear();
                    let minutes = if ch.eq_ignore_ascii_case(&'h') {
                        value.checked_mul(60)
                    } else {
                        Some(value)
                    };
                    total_minutes = minutes
                        .and_then(|m| total_minutes.checked_add(m))
                        .with_context(|| format!("Timer '{spec}' is too long"))?;
                }
                _ => bail!("Unexpected character '{ch}' in timer '{spec}'"),
            }
        }
        if !digits.is_empty() {
            let minutes = digits
                .parse::<i64>()
                .with_context(|| format!("Invalid timer '{spec}'"))?;
            total_minutes = total_minutes
                .checked_add(minutes)
                .with_context(|| format!("Timer '{spec}' is too long"))?;
        }

        if total_minutes <= 0 {
            bail!("Timer duration must be at least one minute (got '{spec}')");
        }

        let duration = ChronoDuration::try_minutes(total_minutes)
            .with_context(|| format!("Timer '{spec}' is too long"))?;
        Ok(TimerRequest::Duration(duration))
    }

    /// Resolve to an absolute deadline relative to `now`.
    ///
    /// Durations that are not positive, or that would overflow the calendar,
    /// resolve to `None`. Clock times that are
    /// not strictly after `now` today roll to the same time tomorrow.
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match *self {
            TimerRequest::Duration(duration) => {
                if duration <= ChronoDuration::zero() {
                    return None;
                }
                now.clone().checked_add_signed(duration)
            }
            TimerRequest::ClockTime(time) => {
                let tz = now.timezone();
                let today = now.date_naive().and_time(time);
                if let Some(candidate) = localize(&tz, today)
                    && candidate > *now
                {
                    return Some(candidate);
                }
                let tomorrow = now.date_naive().succ_opt()?.and_time(time);
                localize(&tz, tomorrow).filter(|deadline| deadline > now)
            }
        }
    }
}

impl fmt::Display for TimerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerRequest::Duration(d) => write!(f, "in {} min", d.num_minutes()),
            TimerRequest::ClockTime(t) => write!(f, "at {}", t.format("%H:%M")),
        }
    }
}

/// Map a local wall-clock time onto the zone.
///
/// Ambiguous times (clocks going back) take the earlier instant; times inside
/// a forward gap are pushed past the gap.
fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(naive + ChronoDuration::hours(1)))
            .earliest(),
    }
}

/// Remaining time until a deadline, broken down for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// At least one hour left.
    HoursMinutes { hours: i64, minutes: i64 },
    /// Less than an hour left.
    Minutes(i64),
    /// At or past the deadline.
    Expired,
}

impl Countdown {
    pub fn until<Tz: TimeZone>(deadline: &DateTime<Tz>, now: &DateTime<Tz>) -> Self {
        let remaining = deadline.clone().signed_duration_since(now.clone());
        let seconds = remaining.num_seconds();
        if remaining <= ChronoDuration::zero() || seconds <= 0 {
            return Countdown::Expired;
        }

        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        if hours > 0 {
            Countdown::HoursMinutes { hours, minutes }
        } else {
            Countdown::Minutes(minutes)
        }
    }

    pub fn render(self, labels: &Labels) -> String {
        match self {
            Countdown::HoursMinutes { hours, minutes } => format!("{hours}:{minutes:02}"),
            Countdown::Minutes(minutes) => labels.minutes(minutes),
            Countdown::Expired => labels.times_up.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 4, h, m, s).unwrap()
    }

    #[test]
    fn test_duration_resolves_relative_to_now() {
        let now = utc(21, 0, 0);
        let request = TimerRequest::from_preset(TimerPreset::ThirtyMinutes);
        assert_eq!(request.resolve(&now), Some(utc(21, 30, 0)));
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let now = utc(21, 0, 0);
        assert_eq!(TimerRequest::Duration(ChronoDuration::zero()).resolve(&now), None);
        assert_eq!(
            TimerRequest::Duration(ChronoDuration::seconds(-5)).resolve(&now),
            None
        );
    }

    #[test]
    fn test_clock_time_later_today() {
        let now = utc(21, 0, 0);
        let request = TimerRequest::at(23, 15).unwrap();
        assert_eq!(request.resolve(&now), Some(utc(23, 15, 0)));
    }

    #[test]
    fn test_clock_time_already_passed_rolls_to_tomorrow() {
        let now = utc(21, 0, 0);
        let request = TimerRequest::at(6, 30).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 10, 5, 6, 30, 0).unwrap();
        assert_eq!(request.resolve(&now), Some(expected));
    }

    #[test]
    fn test_clock_time_equal_to_now_rolls_to_tomorrow() {
        let now = utc(21, 0, 0);
        let request = TimerRequest::at(21, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 10, 5, 21, 0, 0).unwrap();
        assert_eq!(request.resolve(&now), Some(expected));
    }

    #[test]
    fn test_clock_time_rolls_over_month_end_in_offset_zone() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 10, 31, 23, 50, 0).unwrap();
        let request = TimerRequest::at(0, 10).unwrap();
        let expected = tz.with_ymd_and_hms(2024, 11, 1, 0, 10, 0).unwrap();
        assert_eq!(request.resolve(&now), Some(expected));
    }

    #[test]
    fn test_parse_durations() {
        let minutes = |m| TimerRequest::Duration(ChronoDuration::minutes(m));
        assert_eq!(TimerRequest::parse("30m").unwrap(), minutes(30));
        assert_eq!(TimerRequest::parse("1h").unwrap(), minutes(60));
        assert_eq!(TimerRequest::parse("1h30m").unwrap(), minutes(90));
        assert_eq!(TimerRequest::parse("45").unwrap(), minutes(45));
        assert_eq!(TimerRequest::parse(" 2H ").unwrap(), minutes(120));
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(
            TimerRequest::parse("22:45").unwrap(),
            TimerRequest::ClockTime(NaiveTime::from_hms_opt(22, 45, 0).unwrap())
        );
        assert!(TimerRequest::parse("24:00").is_err());
        assert!(TimerRequest::parse("7:61").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TimerRequest::parse("").is_err());
        assert!(TimerRequest::parse("0m").is_err());
        assert!(TimerRequest::parse("h").is_err());
        assert!(TimerRequest::parse("10s").is_err());
    }

    #[test]
    fn test_parse_rejects_overlong_durations() {
        assert!(TimerRequest::parse("9999999999999999h").is_err());
        assert!(TimerRequest::parse("99999999999999999999m").is_err());
        assert!(TimerRequest::parse("9223372036854775807m1m").is_err());
        assert!(TimerRequest::parse("153722867280912930m").is_err());
    }

    #[test]
    fn test_duration_past_calendar_end_resolves_to_none() {
        let now = utc(21, 0, 0);
        let request = TimerRequest::parse("1000000000000m").unwrap();
        assert_eq!(request.resolve(&now), None);
        assert_eq!(TimerRequest::Duration(ChronoDuration::MAX).resolve(&now), None);
    }

    #[test]
    fn test_countdown_breakdown() {
        let now = utc(21, 0, 0);
        assert_eq!(
            Countdown::until(&utc(23, 5, 30), &now),
            Countdown::HoursMinutes { hours: 2, minutes: 5 }
        );
        assert_eq!(Countdown::until(&utc(21, 59, 59), &now), Countdown::Minutes(59));
        assert_eq!(Countdown::until(&utc(21, 0, 30), &now), Countdown::Minutes(0));
        assert_eq!(Countdown::until(&utc(21, 0, 0), &now), Countdown::Expired);
        assert_eq!(Countdown::until(&utc(20, 0, 0), &now), Countdown::Expired);
    }

    #[test]
    fn test_countdown_render() {
        let en = Labels::english();
        assert_eq!(Countdown::HoursMinutes { hours: 1, minutes: 5 }.render(en), "1:05");
        assert_eq!(Countdown::Minutes(25).render(en), "25 minutes");
        assert_eq!(Countdown::Expired.render(en), "Time's up");

        let zh = Labels::chinese();
        assert_eq!(Countdown::Minutes(25).render(zh), "25分钟");
        assert_eq!(Countdown::Expired.render(zh), "时间到");
    }

    #[test]
    fn test_preset_index_round_trip() {
        for preset in TimerPreset::ALL {
            assert_eq!(TimerPreset::from_index(preset.index()), preset);
        }
    }
}
