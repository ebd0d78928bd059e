use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }

    /// Days since Monday, 0 through 6.
    pub fn days_from_monday(self) -> u32 {
        self.to_chrono().num_days_from_monday()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTimeBlock {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub weekday: Weekday,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
    pub valid_from: NaiveDateTime,
    pub valid_until: NaiveDateTime,
}

impl WeeklyTimeBlock {
    /// Whether this recurring block is offered on the given calendar date:
    /// the weekday must match and the date must fall inside the validity
    /// window, inclusive on both ends. Only the date component of the
    /// window counts.
    pub fn covers(&self, date: NaiveDate) -> bool {
        Weekday::from_chrono(date.weekday()) == self.weekday
            && self.valid_from.date() <= date
            && date <= self.valid_until.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTimeBlockRequest {
    pub weekday: Weekday,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
    pub valid_from: NaiveDateTime,
    pub valid_until: NaiveDateTime,
}
