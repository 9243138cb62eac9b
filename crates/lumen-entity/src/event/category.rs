//! Event category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a catalog event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Live in-person or streamed session.
    LiveSession,
    /// Online webinar.
    Webinar,
    /// Hands-on workshop.
    Workshop,
    /// Multi-session short course.
    ShortCourse,
}

impl EventCategory {
    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LiveSession => "live_session",
            Self::Webinar => "webinar",
            Self::Workshop => "workshop",
            Self::ShortCourse => "short_course",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = lumen_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live_session" => Ok(Self::LiveSession),
            "webinar" => Ok(Self::Webinar),
            "workshop" => Ok(Self::Workshop),
            "short_course" => Ok(Self::ShortCourse),
            _ => Err(lumen_core::AppError::validation(format!(
                "Invalid event category: '{s}'. Expected one of: \
                 live_session, webinar, workshop, short_course"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_known_categories() {
        for (input, expected) in [
            ("live_session", EventCategory::LiveSession),
            ("webinar", EventCategory::Webinar),
            ("workshop", EventCategory::Workshop),
            ("short_course", EventCategory::ShortCourse),
        ] {
            assert_eq!(input.parse::<EventCategory>().unwrap(), expected);
            assert_eq!(expected.as_str(), input);
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!("masterclass".parse::<EventCategory>().is_err());
    }
}
