use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Schedule health of an incomplete task relative to its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleHealth {
    OnTime,
    Late,
    AtRisk,
    Ahead,
}

impl ScheduleHealth {
    pub fn label(self) -> &'static str {
        match self {
            ScheduleHealth::OnTime => "on time",
            ScheduleHealth::Late => "late",
            ScheduleHealth::AtRisk => "at risk",
            ScheduleHealth::Ahead => "ahead",
        }
    }
}

/// Tally of classified tasks for one scope (a category or the whole project).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleHealthCounts {
    pub on_time: usize,
    pub late: usize,
    pub ahead: usize,
    pub at_risk: usize,
}

impl ScheduleHealthCounts {
    pub fn record(&mut self, health: ScheduleHealth) {
        match health {
            ScheduleHealth::OnTime => self.on_time += 1,
            ScheduleHealth::Late => self.late += 1,
            ScheduleHealth::AtRisk => self.at_risk += 1,
            ScheduleHealth::Ahead => self.ahead += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.on_time + self.late + self.ahead + self.at_risk
    }

    /// The status that best describes the whole scope.
    ///
    /// Late or ahead only win when they strictly outnumber the other two
    /// non-risk buckets; any at-risk task otherwise marks the scope at risk.
    pub fn predominant(&self) -> ScheduleHealth {
        if self.late > self.on_time && self.late > self.ahead {
            ScheduleHealth::Late
        } else if self.ahead > self.on_time && self.ahead > self.late {
            ScheduleHealth::Ahead
        } else if self.at_risk > 0 {
            ScheduleHealth::AtRisk
        } else {
            ScheduleHealth::OnTime
        }
    }
}

impl Add for ScheduleHealthCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            on_time: self.on_time + rhs.on_time,
            late: self.late + rhs.late,
            ahead: self.ahead + rhs.ahead,
            at_risk: self.at_risk + rhs.at_risk,
        }
    }
}

impl AddAssign for ScheduleHealthCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for ScheduleHealthCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predominant_prefers_late_over_risk() {
        let counts = ScheduleHealthCounts {
            on_time: 1,
            late: 3,
            ahead: 0,
            at_risk: 2,
        };
        assert_eq!(counts.predominant(), ScheduleHealth::Late);
    }

    #[test]
    fn predominant_falls_back_to_on_time() {
        let counts = ScheduleHealthCounts {
            on_time: 2,
            late: 2,
            ahead: 1,
            at_risk: 0,
        };
        assert_eq!(counts.predominant(), ScheduleHealth::OnTime);
        assert_eq!(ScheduleHealthCounts::default().predominant(), ScheduleHealth::OnTime);
    }

    #[test]
    fn sum_adds_every_bucket() {
        let mut a = ScheduleHealthCounts::default();
        a.record(ScheduleHealth::Late);
        a.record(ScheduleHealth::AtRisk);
        let mut b = ScheduleHealthCounts::default();
        b.record(ScheduleHealth::Ahead);
        b.record(ScheduleHealth::OnTime);

        let total: ScheduleHealthCounts = [a, b].into_iter().sum();
        assert_eq!(total.total(), 4);
        assert_eq!(total.late, 1);
        assert_eq!(total.ahead, 1);
    }
}
