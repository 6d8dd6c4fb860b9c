//! Reconciliation of clock-in/clock-out punches against a work schedule.
//!
//! Punches are matched greedily to the nearest expected time of the day. A
//! punch that loses its slot to a closer one goes back in the queue and looks
//! for another slot.

use std::collections::{BTreeMap, VecDeque};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};

/// Expected start and end of a work shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Interval {
    /// Build from `(hour, minute)` pairs. Panics on out-of-range values, so
    /// only use it with literals.
    fn hm(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).expect("valid start time"),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).expect("valid end time"),
        }
    }
}

/// Matched punches for one expected interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalInfo {
    pub input: Option<NaiveTime>,
    pub output: Option<NaiveTime>,
    /// Delay of `input` over the expected start; never negative. `None` when
    /// no input punch was matched.
    pub late: Option<TimeDelta>,
}

/// Reconciled attendance of one scheduled day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub day: NaiveDate,
    pub intervals: Vec<IntervalInfo>,
}

/// Expected intervals for each weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSchedule {
    days: [Vec<Interval>; 7],
}

impl Default for WorkSchedule {
    /// Monday to Friday split shift, Saturday morning, Sunday off.
    fn default() -> Self {
        let weekday = vec![Interval::hm((8, 30), (12, 30)), Interval::hm((16, 0), (20, 0))];
        let saturday = vec![Interval::hm((9, 0), (13, 0))];
        Self {
            days: [
                weekday.clone(),
                weekday.clone(),
                weekday.clone(),
                weekday.clone(),
                weekday,
                saturday,
                Vec::new(),
            ],
        }
    }
}

impl WorkSchedule {
    pub fn intervals(&self, weekday: Weekday) -> &[Interval] {
        &self.days[weekday.num_days_from_monday() as usize]
    }
}

/// Every scheduled day of the month with its expected intervals.
///
/// An invalid year/month pair yields an empty grid.
pub fn perfect_grid(year: i32, month: u32, schedule: &WorkSchedule) -> Vec<(NaiveDate, Vec<Interval>)> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter_map(|day| {
            let intervals = schedule.intervals(day.weekday());
            if intervals.is_empty() {
                None
            } else {
                Some((day, intervals.to_vec()))
            }
        })
        .collect()
}

/// Signed difference `a - b`.
pub fn time_diff(a: NaiveTime, b: NaiveTime) -> TimeDelta {
    a.signed_duration_since(b)
}

/// Index of the slot whose expected time is nearest to `t`; the first one
/// wins ties.
fn nearest_slot(slots: &[(NaiveTime, Option<NaiveTime>)], t: NaiveTime) -> usize {
    let mut best = 0;
    let mut best_diff: Option<TimeDelta> = None;
    for (i, (expected, _)) in slots.iter().enumerate() {
        let diff = time_diff(*expected, t).abs();
        if best_diff.map_or(true, |d| diff < d) {
            best = i;
            best_diff = Some(diff);
        }
    }
    best
}

/// Reconcile the punches of a month against the schedule.
///
/// Punches outside the month or on unscheduled days are ignored. The
/// assignment loop of each day stops after ten passes per slot.
pub fn fixed_records(
    punches: &[NaiveDateTime],
    year: i32,
    month: u32,
    schedule: &WorkSchedule,
) -> Vec<Record> {
    let mut sorted = punches.to_vec();
    sorted.sort();

    let mut by_day: BTreeMap<NaiveDate, VecDeque<NaiveTime>> = BTreeMap::new();
    for punch in sorted {
        by_day.entry(punch.date()).or_default().push_back(punch.time());
    }

    perfect_grid(year, month, schedule)
        .into_iter()
        .map(|(day, intervals)| {
            let mut queue = by_day.remove(&day).unwrap_or_default();
            let mut slots: Vec<(NaiveTime, Option<NaiveTime>)> = intervals
                .iter()
                .flat_map(|i| [(i.start, None), (i.end, None)])
                .collect();

            let limit = slots.len() * 10;
            let mut processed = 0;
            while processed < limit {
                let Some(punch) = queue.pop_front() else {
                    break;
                };
                processed += 1;
                let idx = nearest_slot(&slots, punch);
                if let Some(displaced) = slots[idx].1.replace(punch) {
                    queue.push_back(displaced);
                }
            }

            let intervals = slots
                .chunks(2)
                .map(|pair| {
                    let (expected_in, input) = pair[0];
                    let output = pair.get(1).and_then(|(_, actual)| *actual);
                    let late = input.map(|t| time_diff(t, expected_in).max(TimeDelta::zero()));
                    IntervalInfo {
                        input,
                        output,
                        late,
                    }
                })
                .collect();

            Record { day, intervals }
        })
        .collect()
}
