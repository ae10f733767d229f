//! Visitor-facing texts.
//!
//! Defaults are the French copy the clinic's chat backend expects to be
//! paired with.

use deskchat_ticket::TicketDetails;
use serde::Deserialize;

/// Every fixed string the widget shows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetTexts {
    /// First assistant turn of every conversation.
    pub welcome: String,
    /// Prefix of a failed-send bubble; the reason follows.
    pub chat_error_prefix: String,
    /// Reason shown when the backend gave none.
    pub network_error: String,
    /// Reason shown when a successful response had no reply.
    pub malformed_response: String,
    /// Waiting bubble while the ticket is not found.
    pub ticket_waiting: String,
    /// Label of the re-check action.
    pub ticket_retry_label: String,
    /// Bubble shown when a ticket check fails.
    pub ticket_error: String,
    /// First line of the confirmation bubble.
    pub ticket_confirmed: String,
}

impl Default for WidgetTexts {
    fn default() -> Self {
        Self {
            welcome: "Bonjour ! Je suis l'assistant virtuel de la Clinique Dentaire St Dominique. \
                      Comment puis-je vous aider aujourd'hui ? 🦷"
                .to_string(),
            chat_error_prefix: "Désolé, une erreur est survenue : ".to_string(),
            network_error: "Erreur réseau".to_string(),
            malformed_response: "La réponse du serveur est mal formée.".to_string(),
            ticket_waiting: "⏳ Ticket encore en cours...\nRéessayez dans quelques secondes."
                .to_string(),
            ticket_retry_label: "Re-vérifier".to_string(),
            ticket_error: "❌ Erreur lors de la vérification du ticket.".to_string(),
            ticket_confirmed: "✅ Ticket confirmé !".to_string(),
        }
    }
}

impl WidgetTexts {
    /// Formats a failed-send bubble.
    #[must_use]
    pub fn chat_error(&self, reason: &str) -> String {
        format!("{}{reason}", self.chat_error_prefix)
    }

    /// Formats the confirmation bubble for a found ticket.
    #[must_use]
    pub fn ticket_confirmation(&self, details: &TicketDetails) -> String {
        format!(
            "{}\n- ID : **{}**\n- Soin : **{}**\n- Date : **{}** à **{}**",
            self.ticket_confirmed,
            details.ticket_id,
            details.service_type,
            details.date,
            details.time
        )
    }
}
