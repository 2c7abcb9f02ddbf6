use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    Work,
    Study,
    Sleep,
    Other,
}

impl ActivityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Work => "Work",
            ActivityCategory::Study => "Study",
            ActivityCategory::Sleep => "Sleep",
            ActivityCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Work" => Ok(ActivityCategory::Work),
            "Study" => Ok(ActivityCategory::Study),
            "Sleep" => Ok(ActivityCategory::Sleep),
            "Other" => Ok(ActivityCategory::Other),
            other => Err(format!("unknown activity category '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Activity {
    pub activity_id: i64,
    pub user_id: i64,
    #[serde(rename = "activity_title")]
    pub title: String,
    #[serde(rename = "activity_type")]
    pub category: ActivityCategory,
    pub duration_min: i32,
    pub date: NaiveDate,
}

/// Writable fields of an activity, shared by insert and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityFields {
    pub title: String,
    pub category: ActivityCategory,
    pub duration_min: i32,
    pub date: NaiveDate,
}

impl ActivityFields {
    pub fn into_activity(self, activity_id: i64, user_id: i64) -> Activity {
        Activity {
            activity_id,
            user_id,
            title: self.title,
            category: self.category,
            duration_min: self.duration_min,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_wire_field_names() {
        let activity = ActivityFields {
            title: "Standup".to_string(),
            category: ActivityCategory::Work,
            duration_min: 15,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }
        .into_activity(3, 9);

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["activity_title"], "Standup");
        assert_eq!(json["activity_type"], "Work");
        assert_eq!(json["date"], "2024-01-02");
    }

    #[test]
    fn category_round_trips_through_text() {
        for category in [ActivityCategory::Work, ActivityCategory::Study, ActivityCategory::Sleep, ActivityCategory::Other] {
            assert_eq!(category.to_string().parse::<ActivityCategory>(), Ok(category));
        }
        assert!("work".parse::<ActivityCategory>().is_err());
    }
}
