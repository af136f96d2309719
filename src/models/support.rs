use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(anyhow::anyhow!("Unknown ticket status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for TicketPriority {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            _ => Err(anyhow::anyhow!("Unknown ticket priority: {s}")),
        }
    }
}

/// Who authored a ticket response or support message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Trainer,
    Student,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sender::Trainer => "trainer",
            Sender::Student => "student",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Sender {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trainer" => Ok(Sender::Trainer),
            "student" => Ok(Sender::Student),
            _ => Err(anyhow::anyhow!("Unknown sender: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupportTicket {
    pub id: i64,
    pub ticket_number: String,
    pub student_id: i64,
    pub trainer_id: i64,
    pub subject: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketResponse {
    pub id: i64,
    pub ticket_id: i64,
    pub sender: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SupportMessage {
    pub id: i64,
    pub student_id: i64,
    pub trainer_id: i64,
    pub sender: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub student_id: i64,
    pub subject: String,
    pub category: Option<String>,
    pub priority: Option<TicketPriority>,
    /// Optional first message, stored as the opening response.
    pub message: Option<String>,
}

/// Student-panel variant: the student is taken from the session.
#[derive(Debug, Deserialize)]
pub struct CreateStudentTicketRequest {
    pub subject: String,
    pub category: Option<String>,
    pub priority: Option<TicketPriority>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicketRequest {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketResponseRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSupportMessageRequest {
    pub student_id: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentSupportMessageRequest {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ticket_status_round_trips_through_strings() {
        for s in ["open", "in_progress", "resolved", "closed"] {
            assert_eq!(TicketStatus::from_str(s).unwrap().to_string(), s);
        }
        assert!(TicketStatus::from_str("reopened").is_err());
    }

    #[test]
    fn sender_rejects_unknown_values() {
        assert_eq!(Sender::from_str("trainer").unwrap(), Sender::Trainer);
        assert_eq!(Sender::from_str("student").unwrap(), Sender::Student);
        assert!(Sender::from_str("admin").is_err());
    }
}
