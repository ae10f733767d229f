//! Wire format of the ticket status endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body returned by the ticket status endpoint.
///
/// Every field is optional so that error bodies (`{"status": "error",
/// "message": ...}`) still parse and read as "not found yet". Detail fields
/// come straight from a database row and may be numbers; they are kept as
/// their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketStatusResponse {
    /// `success` when the lookup ran.
    #[serde(default)]
    pub status: Option<String>,
    /// Whether a recent ticket exists for the email.
    #[serde(default)]
    pub found: bool,
    /// Ticket identifier.
    #[serde(default, deserialize_with = "lenient_text")]
    pub ticket_id: Option<String>,
    /// Booked service.
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_type: Option<String>,
    /// Appointment date.
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    /// Appointment time.
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
}

/// Reads a scalar as text. Strings are kept as is, null is absent, and any
/// other value becomes its JSON rendering.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// A confirmed ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDetails {
    /// Ticket identifier.
    pub ticket_id: String,
    /// Booked service.
    pub service_type: String,
    /// Appointment date.
    pub date: String,
    /// Appointment time.
    pub time: String,
}

/// Outcome of one status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketStatus {
    /// The ticket exists.
    Found(TicketDetails),
    /// The ticket is not there yet.
    NotFound,
}

impl TicketStatusResponse {
    /// Interprets the response.
    ///
    /// Only `status == "success"` together with `found == true` confirms a
    /// ticket; every other body means it is still being processed.
    #[must_use]
    pub fn into_status(self) -> TicketStatus {
        if self.status.as_deref() == Some("success") && self.found {
            TicketStatus::Found(TicketDetails {
                ticket_id: self.ticket_id.unwrap_or_default(),
                service_type: self.service_type.unwrap_or_default(),
                date: self.date.unwrap_or_default(),
                time: self.time.unwrap_or_default(),
            })
        } else {
            TicketStatus::NotFound
        }
    }
}
