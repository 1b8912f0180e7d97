//! Report identifier and date sources injected into the generator.

use chrono::{Local, NaiveDate};
use rand::Rng;
use std::collections::VecDeque;

pub const REPORT_ID_PREFIX: &str = "CS-";
const REPORT_ID_RANGE: u32 = 10_000;

pub trait ReportIdSource {
    fn next_id(&mut self) -> String;
}

/// Unseeded `CS-<0..9999>` identifiers; two reports may share one.
#[derive(Debug, Default)]
pub struct RandomReportIds;

impl ReportIdSource for RandomReportIds {
    fn next_id(&mut self) -> String {
        let n = rand::thread_rng().gen_range(0..REPORT_ID_RANGE);
        format!("{REPORT_ID_PREFIX}{n}")
    }
}

/// Replays the given identifiers in order, repeating the last one once the
/// sequence is exhausted.
#[derive(Debug, Clone)]
pub struct FixedReportIds {
    queue: VecDeque<String>,
    last: String,
}

impl FixedReportIds {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue: VecDeque<String> = ids.into_iter().map(Into::into).collect();
        let last = queue
            .back()
            .cloned()
            .unwrap_or_else(|| format!("{REPORT_ID_PREFIX}0"));
        Self { queue, last }
    }
}

impl ReportIdSource for FixedReportIds {
    fn next_id(&mut self) -> String {
        self.queue.pop_front().unwrap_or_else(|| self.last.clone())
    }
}

impl<T: ReportIdSource + ?Sized> ReportIdSource for Box<T> {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_stay_in_range() {
        let mut ids = RandomReportIds;
        for _ in 0..200 {
            let id = ids.next_id();
            let n: u32 = id.strip_prefix(REPORT_ID_PREFIX).unwrap().parse().unwrap();
            assert!(n < REPORT_ID_RANGE);
        }
    }

    #[test]
    fn fixed_ids_replay_then_repeat_last() {
        let mut ids = FixedReportIds::new(["CS-1", "CS-2"]);
        assert_eq!(ids.next_id(), "CS-1");
        assert_eq!(ids.next_id(), "CS-2");
        assert_eq!(ids.next_id(), "CS-2");
    }

    #[test]
    fn fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }
}
