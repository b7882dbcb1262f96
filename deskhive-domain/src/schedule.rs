use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A space's recurring weekly opening days. One flag per day of week;
/// absence of a schedule row means the space is closed every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl WeeklySchedule {
    pub fn is_open_on(&self, day: Weekday) -> bool {
        match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    pub fn closed_all_week() -> Self {
        Self {
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            saturday: false,
            sunday: false,
        }
    }
}

impl Default for WeeklySchedule {
    /// Weekdays open, weekend closed
    fn default() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_is_weekdays_only() {
        let schedule = WeeklySchedule::default();

        assert!(schedule.is_open_on(Weekday::Mon));
        assert!(schedule.is_open_on(Weekday::Tue));
        assert!(schedule.is_open_on(Weekday::Wed));
        assert!(schedule.is_open_on(Weekday::Thu));
        assert!(schedule.is_open_on(Weekday::Fri));
        assert!(!schedule.is_open_on(Weekday::Sat));
        assert!(!schedule.is_open_on(Weekday::Sun));
    }

    #[test]
    fn test_each_flag_gates_its_own_day() {
        let mut schedule = WeeklySchedule::closed_all_week();
        schedule.sunday = true;

        assert!(schedule.is_open_on(Weekday::Sun));
        assert!(!schedule.is_open_on(Weekday::Mon));
        assert!(!schedule.is_open_on(Weekday::Sat));
    }
}
