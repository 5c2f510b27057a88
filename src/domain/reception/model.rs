//! Reception domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reception status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatusKind {
    /// Products may be added and removed
    InProgress,
    /// Terminal; a reception never reopens
    Closed,
}

impl ReceptionStatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(Self::InProgress),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReceptionStatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored status reference row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceptionStatus {
    pub id: i32,
    pub kind: ReceptionStatusKind,
}

/// Intake session at a pickup point.
///
/// `status` is `None` until the status reference has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reception {
    pub id: Uuid,
    pub pickup_point_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub status_id: i32,
    pub status: Option<ReceptionStatusKind>,
}

impl Reception {
    /// A fresh in-progress reception
    pub fn open(pickup_point_id: Uuid, date_time: DateTime<Utc>, status: ReceptionStatus) -> Self {
        Self {
            id: Uuid::now_v7(),
            pickup_point_id,
            date_time,
            status_id: status.id,
            status: Some(status.kind),
        }
    }

    pub fn with_status(mut self, status: ReceptionStatus) -> Self {
        self.status_id = status.id;
        self.status = Some(status.kind);
        self
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == Some(ReceptionStatusKind::InProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IN_PROGRESS: ReceptionStatus = ReceptionStatus {
        id: 1,
        kind: ReceptionStatusKind::InProgress,
    };
    const CLOSED: ReceptionStatus = ReceptionStatus {
        id: 2,
        kind: ReceptionStatusKind::Closed,
    };

    #[test]
    fn open_reception_is_in_progress() {
        let r = Reception::open(Uuid::new_v4(), Utc::now(), IN_PROGRESS);
        assert!(r.is_in_progress());
        assert_eq!(r.status_id, 1);
    }

    #[test]
    fn with_status_replaces_reference() {
        let r = Reception::open(Uuid::new_v4(), Utc::now(), IN_PROGRESS).with_status(CLOSED);
        assert!(!r.is_in_progress());
        assert_eq!(r.status, Some(ReceptionStatusKind::Closed));
        assert_eq!(r.status_id, 2);
    }

    #[test]
    fn unresolved_status_is_not_in_progress() {
        let mut r = Reception::open(Uuid::new_v4(), Utc::now(), IN_PROGRESS);
        r.status = None;
        assert!(!r.is_in_progress());
    }

    #[test]
    fn status_names() {
        assert_eq!(
            ReceptionStatusKind::from_name("in_progress"),
            Some(ReceptionStatusKind::InProgress)
        );
        assert_eq!(ReceptionStatusKind::Closed.to_string(), "closed");
        assert_eq!(ReceptionStatusKind::from_name("close"), None);
    }
}
