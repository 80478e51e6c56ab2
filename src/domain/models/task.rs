use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    pub recurrence_start: Option<NaiveDate>,
    pub recurrence_end: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

pub struct NewTaskParams {
    pub name: String,
    pub project_id: String,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
}

impl Task {
    pub fn new(params: NewTaskParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            project_id: params.project_id,
            description: params.description,
            is_recurring: params.is_recurring,
            recurrence_pattern: params.recurrence_pattern.map(|p| p.to_string()),
            recurrence_start: params.is_recurring.then(|| now.date_naive()),
            recurrence_end: None,
            created_at: now,
        }
    }
}

/// Patch applied by `TaskRepository::update`. `None` keeps the stored name,
/// description and recurring flag; the recurrence fields are always overwritten.
pub struct TaskUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub recurrence_start: Option<NaiveDate>,
    pub recurrence_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekOrdinal {
    First,
    Last,
}

/// Persisted as `daily`, `weekly`, `monthly` or `monthly:<first|last>:<0-6>`
/// where the weekday counts from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    MonthlyOn { ordinal: WeekOrdinal, weekday: u8 },
}

impl FromStr for RecurrencePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => return Ok(RecurrencePattern::Daily),
            "weekly" => return Ok(RecurrencePattern::Weekly),
            "monthly" => return Ok(RecurrencePattern::Monthly),
            _ => {}
        }

        let mut parts = s.split(':');
        let (Some("monthly"), Some(ordinal), Some(weekday), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("Unknown recurrence pattern: {}", s));
        };

        let ordinal = match ordinal {
            "first" => WeekOrdinal::First,
            "last" => WeekOrdinal::Last,
            other => return Err(format!("Unknown week ordinal: {}", other)),
        };

        let weekday: u8 = weekday.parse().map_err(|_| format!("Invalid weekday: {}", weekday))?;
        if weekday > 6 {
            return Err(format!("Weekday out of range: {}", weekday));
        }

        Ok(RecurrencePattern::MonthlyOn { ordinal, weekday })
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrencePattern::Daily => f.write_str("daily"),
            RecurrencePattern::Weekly => f.write_str("weekly"),
            RecurrencePattern::Monthly => f.write_str("monthly"),
            RecurrencePattern::MonthlyOn { ordinal, weekday } => {
                let ordinal = match ordinal {
                    WeekOrdinal::First => "first",
                    WeekOrdinal::Last => "last",
                };
                write!(f, "monthly:{}:{}", ordinal, weekday)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_custom_monthly_patterns() {
        assert_eq!(
            "monthly:first:1".parse::<RecurrencePattern>(),
            Ok(RecurrencePattern::MonthlyOn { ordinal: WeekOrdinal::First, weekday: 1 })
        );
        assert_eq!(
            "monthly:last:0".parse::<RecurrencePattern>(),
            Ok(RecurrencePattern::MonthlyOn { ordinal: WeekOrdinal::Last, weekday: 0 })
        );
        assert_eq!("weekly".parse::<RecurrencePattern>(), Ok(RecurrencePattern::Weekly));
    }

    #[test]
    fn rejects_malformed_patterns() {
        for raw in ["monthly:second:1", "monthly:first:7", "monthly:first", "monthly:last:1:2", "yearly", ""] {
            assert!(raw.parse::<RecurrencePattern>().is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn display_matches_persisted_format() {
        let pattern = RecurrencePattern::MonthlyOn { ordinal: WeekOrdinal::Last, weekday: 5 };
        assert_eq!(pattern.to_string(), "monthly:last:5");
    }
}
