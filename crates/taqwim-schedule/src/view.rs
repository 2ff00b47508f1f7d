//! Next/current prayer and countdown over one day's schedule.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;
use taqwim_types::{DailyPrayerTimes, Prayer, ScheduleSource};

use crate::tz::anchor;

/// One of the five prayers placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerInstant {
    pub prayer: Prayer,
    pub at: DateTime<Tz>,
    pub is_current: bool,
    pub is_next: bool,
    /// Seconds from the view's `now` until `at`, never negative.
    pub seconds_until: i64,
}

/// A day's schedule as seen from one moment.
///
/// `instants` is in Fajr..Isha order. The next entry is always in the future
/// and the current one never is: after Isha the Fajr entry holds tomorrow's
/// Fajr, and before Fajr the Isha entry holds yesterday's Isha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleView {
    /// The anchor day: `now`'s calendar date in the request timezone.
    pub date: NaiveDate,
    pub timezone: Tz,
    pub source: ScheduleSource,
    pub instants: [PrayerInstant; 5],
    pub sunrise: Option<DateTime<Tz>>,
    pub current: Prayer,
    /// When the current prayer began; the previous day's Isha before Fajr.
    pub current_at: DateTime<Tz>,
    pub next: Prayer,
    pub next_at: DateTime<Tz>,
    pub seconds_until_next: i64,
}

impl ScheduleView {
    pub fn instant(&self, prayer: Prayer) -> &PrayerInstant {
        &self.instants[prayer.index()]
    }

    pub fn next_instant(&self) -> &PrayerInstant {
        self.instant(self.next)
    }

    pub fn current_instant(&self) -> &PrayerInstant {
        self.instant(self.current)
    }

    /// Countdown to the next prayer as of `now`, floored at zero.
    pub fn seconds_until_next_at(&self, now: DateTime<Tz>) -> i64 {
        (self.next_at - now).num_seconds().max(0)
    }

    /// True once the next prayer has arrived or the anchor day is over; the
    /// caller should resolve again.
    pub fn needs_refresh(&self, now: DateTime<Tz>) -> bool {
        now >= self.next_at || now.with_timezone(&self.timezone).date_naive() != self.date
    }

    /// The countdown at resolution time as `HH:MM:SS`.
    pub fn countdown(&self) -> String {
        format_countdown(self.seconds_until_next)
    }
}

/// Formats seconds as `HH:MM:SS`. Negative values show as zero.
pub fn format_countdown(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Wall-clock times of `times` on `date`, in chronological order.
///
/// A time not after its predecessor (Isha past midnight) belongs to the
/// following day.
fn timeline(times: &DailyPrayerTimes, tz: Tz, date: NaiveDate) -> [DateTime<Tz>; 5] {
    let next_day = date.succ_opt().unwrap_or(date);
    let mut out = Prayer::ALL.map(|p| anchor(tz, date, times.time_of(p)));
    for i in 1..out.len() {
        if out[i] <= out[i - 1] {
            out[i] = anchor(tz, next_day, times.time_of(Prayer::ALL[i]));
        }
    }
    out
}

/// Places `times` on `now`'s calendar day and determines next and current.
///
/// The next prayer is the first instant strictly after `now`; an instant equal
/// to `now` has already begun. Past Isha, the next prayer is tomorrow's Fajr.
pub fn build_schedule(times: &DailyPrayerTimes, now: DateTime<Tz>) -> ScheduleView {
    let tz = now.timezone();
    let date = now.date_naive();
    let today = timeline(times, tz, date);

    // Yesterday's prayers, today's, then tomorrow's Fajr: the first entry is
    // always in the past and the last always in the future.
    let yesterday = timeline(times, tz, date.pred_opt().unwrap_or(date));
    let tomorrow_fajr = anchor(tz, date.succ_opt().unwrap_or(date), times.fajr);
    let sequence: Vec<(Prayer, DateTime<Tz>)> = Prayer::ALL
        .into_iter()
        .zip(yesterday)
        .chain(Prayer::ALL.into_iter().zip(today))
        .chain(std::iter::once((Prayer::Fajr, tomorrow_fajr)))
        .collect();

    let k = sequence.iter().position(|(_, t)| *t > now).unwrap_or(sequence.len() - 1).max(1);
    let (next, next_at) = sequence[k];
    let (current, current_at) = sequence[k - 1];

    let instants = Prayer::ALL.map(|prayer| {
        let t = if prayer == next {
            next_at
        } else if prayer == current {
            current_at
        } else {
            today[prayer.index()]
        };
        PrayerInstant {
            prayer,
            at: t,
            is_current: prayer == current,
            is_next: prayer == next,
            seconds_until: (t - now).num_seconds().max(0),
        }
    });

    ScheduleView {
        date,
        timezone: tz,
        source: times.source,
        instants,
        sunrise: times.sunrise.map(|s| anchor(tz, date, s)),
        current,
        current_at,
        next,
        next_at,
        seconds_until_next: (next_at - now).num_seconds().max(0),
    }
}
