use std::fmt;

/// Ridership day classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Saturday,
    SundayHoliday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::SundayHoliday];

    pub fn code(&self) -> &'static str {
        match self {
            DayType::Weekday => "W",
            DayType::Saturday => "A",
            DayType::SundayHoliday => "U",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Saturday => "Saturday",
            DayType::SundayHoliday => "Sunday/holiday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
