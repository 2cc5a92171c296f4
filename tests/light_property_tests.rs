use chrono::{Duration as ChronoDuration, FixedOffset, NaiveTime, TimeZone};
use proptest::prelude::*;

use nightlight::common::constants::{
    MAXIMUM_BRIGHTNESS, MAXIMUM_SCREEN_BRIGHTNESS, MINIMUM_BRIGHTNESS, MINIMUM_SCREEN_BRIGHTNESS,
};
use nightlight::state::{LightState, LightStyle, Palette, TimerRequest};
use nightlight::time::{ManualTimeSource, TimeSource};

/// Any float the sliders or keyboard could plausibly produce, plus extremes.
fn brightness_input_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        -10.0f32..10.0,
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
    ]
}

fn clock_time_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn session_clock() -> ManualTimeSource {
    ManualTimeSource::new(chrono::Local::now())
}

/// Property tests for the total light mutations
#[cfg(test)]
mod state_mutation_tests {
    use super::*;

    proptest! {
        /// Brightness always lands inside its range, whatever was asked for
        #[test]
        fn test_brightness_is_always_in_range(value in brightness_input_strategy()) {
            let mut state = LightState::new();
            state.set_brightness(value);
            prop_assert!((MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&state.brightness()));
        }

        /// Screen brightness is clamped and the stored value is what is returned
        #[test]
        fn test_screen_brightness_is_always_in_range(value in brightness_input_strategy()) {
            let mut state = LightState::new();
            let stored = state.set_screen_brightness(value);
            prop_assert_eq!(stored, state.screen_brightness());
            prop_assert!(
                (MINIMUM_SCREEN_BRIGHTNESS..=MAXIMUM_SCREEN_BRIGHTNESS).contains(&stored)
            );
        }

        /// Color and style selection wrap instead of failing
        #[test]
        fn test_selection_indices_wrap(index in 0usize..10_000) {
            let mut state = LightState::new();
            state.select_color(index);
            state.select_style(index);
            prop_assert_eq!(state.color_index(), index % Palette::default().len());
            prop_assert_eq!(state.style_index(), index % LightStyle::ALL.len());
        }

        /// Cycling through the whole palette returns to the start
        #[test]
        fn test_cycle_color_is_periodic(start in 0usize..8) {
            let mut state = LightState::new();
            state.select_color(start);
            for _ in 0..Palette::default().len() {
                state.cycle_color();
            }
            prop_assert_eq!(state.color_index(), start);
        }

        /// Toggling twice restores on/off but never revives a timer
        #[test]
        fn test_double_toggle_drops_timer(minutes in 1i64..600) {
            let clock = session_clock();
            let mut state = LightState::new();
            state.request_timer(
                TimerRequest::Duration(ChronoDuration::minutes(minutes)),
                clock.now(),
            );
            prop_assert!(state.timer_deadline().is_some());

            state.toggle();
            state.toggle();
            prop_assert!(state.is_on());
            prop_assert_eq!(state.timer_deadline(), None);
        }
    }
}

/// Property tests for timer resolution and expiry
#[cfg(test)]
mod timer_tests {
    use super::*;

    proptest! {
        /// A clock-time deadline is always strictly in the future and less than a day away
        #[test]
        fn test_clock_time_lies_within_next_day(
            now_hour in 0i64..24,
            now_minute in 0i64..60,
            seconds in 0i64..60,
            target in clock_time_strategy(),
        ) {
            let zone = FixedOffset::east_opt(8 * 3600).unwrap();
            let now = zone
                .with_ymd_and_hms(2026, 12, 31, 0, 0, 0)
                .unwrap()
                + ChronoDuration::hours(now_hour)
                + ChronoDuration::minutes(now_minute)
                + ChronoDuration::seconds(seconds);

            let deadline = TimerRequest::ClockTime(target).resolve(&now).unwrap();
            prop_assert!(deadline > now);
            prop_assert!(deadline - now <= ChronoDuration::hours(24));
            prop_assert_eq!(deadline.time(), target);
        }

        /// Expiry happens exactly once, on the first tick at or after the deadline
        #[test]
        fn test_tick_switches_off_once(minutes in 1i64..240, overshoot in 0i64..120) {
            let clock = session_clock();
            let mut state = LightState::new();
            state.request_timer(
                TimerRequest::Duration(ChronoDuration::minutes(minutes)),
                clock.now(),
            );

            clock.advance(ChronoDuration::minutes(minutes) - ChronoDuration::seconds(1));
            prop_assert!(!state.tick(clock.now()));
            prop_assert!(state.is_on());

            clock.advance(ChronoDuration::seconds(1 + overshoot));
            prop_assert!(state.tick(clock.now()));
            prop_assert!(!state.is_on());
            prop_assert!(!state.tick(clock.now()));
        }

        /// Parsed minute counts turn into the same duration
        #[test]
        fn test_parse_minutes(minutes in 1i64..10_000) {
            let spec = format!("{minutes}m");
            prop_assert_eq!(
                TimerRequest::parse(&spec).unwrap(),
                TimerRequest::Duration(ChronoDuration::minutes(minutes))
            );
        }
    }
}

#[test]
fn test_three_style_cycles_return_to_start() {
    let mut state = LightState::new();
    let original = state.style();
    for _ in 0..LightStyle::COUNT {
        state.cycle_style();
    }
    assert_eq!(state.style(), original);
}

#[test]
fn test_custom_color_becomes_the_glow() {
    let custom = nightlight::state::Rgb::new(0x40, 0x90, 0xE0);
    let mut state = LightState::new();
    state.set_custom_color(custom);
    state.select_color(0);
    state.select_color(state.palette().custom_index());
    assert_eq!(state.glow().color, custom);
}
