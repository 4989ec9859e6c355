use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The five lifecycle states. `completed` and `cancelled` are terminal in the
/// product sense, but any enumerated value may replace any other: the status
/// endpoint only checks membership, never a transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Assigned,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Assigned,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Assigned => "assigned",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == s)
    }
}

pub const LOCATIONS: [&str; 2] = ["online", "home"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: i64,
    pub parent_id: String,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub student_name: String,
    pub subject: String,
    pub level: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub duration: f64,
    pub location: String,
    pub notes: String,
    pub price_per_hour: f64,
    pub total_amount: f64,
    pub is_trial_course: bool,
    pub assigned_teacher_id: Option<String>,
    pub assigned_teacher: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for the booking path. Identifier and timestamps are
/// assigned by the store.
pub struct NewAppointment {
    pub parent_id: String,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub student_name: String,
    pub subject: String,
    pub level: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    pub duration: f64,
    pub location: String,
    pub notes: String,
    pub price_per_hour: f64,
    pub total_amount: f64,
    pub is_trial_course: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert_eq!(AppointmentStatus::parse("archived"), None);
        assert_eq!(AppointmentStatus::parse("PENDING"), None);
        assert_eq!(AppointmentStatus::parse(""), None);
    }
}
