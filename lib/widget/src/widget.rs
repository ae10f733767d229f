//! The widget state machine.
//!
//! Ties the conversation session, the transcript and the ticket polls
//! together. All state changes happen in [`Widget::handle`] and
//! [`Widget::fire_due_timers`]; both return the network work to perform.
//!
//! Every chat request, reveal delay and ticket poll remembers the session
//! it was started in. Results that come back after the visitor started a
//! new conversation are dropped instead of leaking into it.

use crate::config::WidgetConfig;
use crate::event::{Effect, Event};
use crate::render::{View, render};
use crate::transcript::{EntryKind, Transcript};
use deskchat_conversation::{ChatError, Session, signals_pending_ticket};
use deskchat_core::{EntryId, PollId, SessionId};
use deskchat_scheduler::{Clock, DelayQueue};
use deskchat_ticket::{PollState, TicketError, TicketPoll, TicketStatus};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Work waiting on a delay.
#[derive(Debug, Clone)]
enum Timer {
    /// End of the typing indicator: show the reply.
    Reveal { session_id: SessionId, reply: String },
    /// Time for a ticket status check.
    TicketCheck { poll_id: PollId },
}

/// A poll and the conversation it belongs to.
#[derive(Debug, Clone)]
struct TrackedPoll {
    session_id: SessionId,
    poll: TicketPoll,
    waiting_entry: Option<EntryId>,
}

/// The chat widget.
pub struct Widget<C> {
    config: WidgetConfig,
    session: Session,
    transcript: Transcript,
    in_flight: Option<SessionId>,
    polls: HashMap<PollId, TrackedPoll>,
    timers: DelayQueue<Timer, C>,
}

impl<C: Clock> Widget<C> {
    /// Creates a widget showing a fresh conversation.
    pub fn new(config: WidgetConfig, clock: C) -> Self {
        let mut widget = Self {
            session: Session::new(),
            transcript: Transcript::new(),
            in_flight: None,
            polls: HashMap::new(),
            timers: DelayQueue::new(clock),
            config,
        };
        widget.start_new_conversation();
        widget
    }

    /// Applies an event and returns the network work it requires.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::NewConversation => {
                self.start_new_conversation();
                Vec::new()
            }
            Event::Submit(text) => self.send_message(&text).into_iter().collect(),
            Event::RetryTicket(poll_id) => {
                self.retry_ticket(poll_id);
                Vec::new()
            }
            Event::ChatCompleted { session_id, result } => {
                self.chat_completed(session_id, result);
                Vec::new()
            }
            Event::TicketChecked { poll_id, result } => {
                self.ticket_checked(poll_id, result);
                Vec::new()
            }
        }
    }

    /// Runs every timer whose delay has elapsed.
    pub fn fire_due_timers(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        for task in self.timers.pop_due() {
            match task.payload {
                Timer::Reveal { session_id, reply } => self.reveal(session_id, reply),
                Timer::TicketCheck { poll_id } => effects.extend(self.begin_check(poll_id)),
            }
        }
        effects
    }

    /// Returns the clock time at which the next timer fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Returns the widget's clock.
    pub fn clock(&self) -> &C {
        self.timers.clock()
    }

    /// Renders the current surface.
    #[must_use]
    pub fn view(&self) -> View {
        render(
            &self.transcript,
            self.is_busy(),
            &self.config.texts,
            |poll_id| {
                self.polls
                    .get(&poll_id)
                    .is_some_and(|tracked| tracked.poll.state.offers_retry())
            },
        )
    }

    /// Returns the current conversation.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns true while a chat request is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the state of a poll, if it exists.
    #[must_use]
    pub fn poll_state(&self, poll_id: PollId) -> Option<&PollState> {
        self.polls.get(&poll_id).map(|tracked| &tracked.poll.state)
    }

    /// Returns every poll started for the current conversation.
    pub fn current_polls(&self) -> impl Iterator<Item = &TicketPoll> {
        let session_id = self.session.id();
        self.polls
            .values()
            .filter(move |tracked| tracked.session_id == session_id)
            .map(|tracked| &tracked.poll)
    }

    fn start_new_conversation(&mut self) {
        self.session = Session::with_welcome(self.config.texts.welcome.clone());
        self.transcript.clear();
        // Polls waiting on a timer or a check are dropped when that resolves.
        self.polls.retain(|_, tracked| {
            matches!(tracked.poll.state, PollState::Scheduled | PollState::Checking)
        });
        self.transcript.push(EntryKind::AssistantMessage(
            self.config.texts.welcome.clone(),
        ));
        info!(session_id = %self.session.id(), "started new conversation");
    }

    fn send_message(&mut self, text: &str) -> Option<Effect> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(outstanding) = self.in_flight {
            debug!(session_id = %outstanding, "send ignored while a request is in flight");
            return None;
        }

        let session_id = self.session.id();
        self.session.push_user(text);
        self.transcript.push(EntryKind::UserMessage(text.to_string()));
        self.in_flight = Some(session_id);

        debug!(
            session_id = %session_id,
            turns = self.session.len(),
            "posting conversation"
        );
        Some(Effect::PostChat {
            session_id,
            request: self.session.chat_request(),
        })
    }

    fn chat_completed(&mut self, session_id: SessionId, result: Result<String, ChatError>) {
        if self.in_flight != Some(session_id) {
            warn!(session_id = %session_id, "chat completion without matching request");
            return;
        }

        match result {
            Ok(reply) => {
                let delay = self.config.typing_delay();
                self.timers.schedule(delay, Timer::Reveal { session_id, reply });
            }
            Err(err) => {
                self.in_flight = None;
                warn!(session_id = %session_id, error = %err, "chat request failed");
                if session_id != self.session.id() {
                    debug!(session_id = %session_id, "dropping error for replaced conversation");
                    return;
                }
                let reason = self.failure_reason(&err);
                self.transcript.push(EntryKind::ChatError(reason));
            }
        }
    }

    fn failure_reason(&self, err: &ChatError) -> String {
        let texts = &self.config.texts;
        match err.server_reason() {
            Some(reason) => reason.to_string(),
            None if err.is_malformed() => texts.malformed_response.clone(),
            None => texts.network_error.clone(),
        }
    }

    fn reveal(&mut self, session_id: SessionId, reply: String) {
        if self.in_flight == Some(session_id) {
            self.in_flight = None;
        }
        if session_id != self.session.id() {
            debug!(session_id = %session_id, "dropping reply for replaced conversation");
            return;
        }

        self.session.push_assistant(reply.clone());
        self.transcript.push(EntryKind::AssistantMessage(reply.clone()));

        if !signals_pending_ticket(&reply) {
            return;
        }
        match self.session.find_recent_email().map(str::to_string) {
            Some(email) => self.start_poll(email),
            None => debug!(
                session_id = %session_id,
                "ticket pending but no email in history"
            ),
        }
    }

    fn start_poll(&mut self, email: String) {
        let session_id = self.session.id();
        if self.config.poll.dedupe_by_email
            && self.polls.values().any(|tracked| {
                tracked.session_id == session_id
                    && tracked.poll.email == email
                    && !tracked.poll.state.is_terminal()
            })
        {
            debug!(session_id = %session_id, "ticket poll already running for this email");
            return;
        }

        let poll = TicketPoll::new(email, self.config.poll.max_retries);
        let poll_id = poll.id;
        let delay = self.config.poll.delay_for(poll.retry_count);
        self.polls.insert(
            poll_id,
            TrackedPoll {
                session_id,
                poll,
                waiting_entry: None,
            },
        );
        self.timers.schedule(delay, Timer::TicketCheck { poll_id });
        info!(
            session_id = %session_id,
            poll_id = %poll_id,
            delay_ms = delay.as_millis(),
            "scheduled ticket check"
        );
    }

    fn begin_check(&mut self, poll_id: PollId) -> Option<Effect> {
        let tracked = self.polls.get_mut(&poll_id)?;
        if let Err(err) = tracked.poll.begin_check() {
            warn!(poll_id = %poll_id, error = %err, "ticket check not started");
            return None;
        }
        debug!(
            poll_id = %poll_id,
            retry_count = tracked.poll.retry_count,
            "checking ticket status"
        );
        Some(Effect::CheckTicket {
            poll_id,
            email: tracked.poll.email.clone(),
        })
    }

    fn ticket_checked(&mut self, poll_id: PollId, result: Result<TicketStatus, TicketError>) {
        let current_session = self.session.id();
        let Some(tracked) = self.polls.get_mut(&poll_id) else {
            warn!(poll_id = %poll_id, "ticket status for unknown poll");
            return;
        };

        if let Err(err) = &result {
            warn!(poll_id = %poll_id, error = %err, "ticket check failed");
        }
        let state = match tracked.poll.resolve(result) {
            Ok(state) => state.clone(),
            Err(err) => {
                warn!(poll_id = %poll_id, error = %err, "ticket status ignored");
                return;
            }
        };
        info!(
            poll_id = %poll_id,
            retry_count = tracked.poll.retry_count,
            state = %state,
            "ticket check resolved"
        );

        let replaced = tracked.session_id != current_session;
        if replaced || state.is_terminal() {
            self.polls.remove(&poll_id);
        }
        if replaced {
            debug!(poll_id = %poll_id, "dropping ticket status for replaced conversation");
            return;
        }

        match state {
            PollState::Found(details) => {
                self.transcript.push(EntryKind::TicketConfirmed(details));
            }
            PollState::Pending => {
                let entry = self.transcript.push(EntryKind::TicketWaiting(poll_id));
                if let Some(tracked) = self.polls.get_mut(&poll_id) {
                    tracked.waiting_entry = Some(entry);
                }
            }
            PollState::AwaitingManualRetry => {
                self.transcript.push(EntryKind::TicketWaiting(poll_id));
            }
            PollState::Errored => {
                self.transcript.push(EntryKind::TicketError);
            }
            PollState::Scheduled | PollState::Checking => {}
        }
    }

    fn retry_ticket(&mut self, poll_id: PollId) {
        let current_session = self.session.id();
        let Some(tracked) = self.polls.get_mut(&poll_id) else {
            debug!(poll_id = %poll_id, "retry for unknown poll");
            return;
        };
        if tracked.session_id != current_session {
            debug!(poll_id = %poll_id, "retry for replaced conversation ignored");
            return;
        }
        if let Err(err) = tracked.poll.retry() {
            debug!(poll_id = %poll_id, error = %err, "retry not available");
            return;
        }

        if let Some(entry) = tracked.waiting_entry.take() {
            self.transcript.remove(entry);
        }
        let delay = self.config.poll.delay_for(tracked.poll.retry_count);
        self.timers.schedule(delay, Timer::TicketCheck { poll_id });
        info!(
            poll_id = %poll_id,
            retry_count = tracked.poll.retry_count,
            delay_ms = delay.as_millis(),
            "rescheduled ticket check"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Action, Tone};
    use deskchat_conversation::{MessageRole, TICKET_PENDING_MARKER};
    use deskchat_scheduler::ManualClock;
    use deskchat_ticket::TicketDetails;

    const PENDING_REPLY: &str = "Votre demande est en cours de traitement. Vous recevrez une confirmation par e-mail sous peu.";

    fn widget_with(config: WidgetConfig) -> (Widget<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Widget::new(config, clock.clone()), clock)
    }

    fn widget() -> (Widget<ManualClock>, ManualClock) {
        widget_with(WidgetConfig::default())
    }

    fn submit(widget: &mut Widget<ManualClock>, text: &str) -> SessionId {
        let effects = widget.handle(Event::Submit(text.to_string()));
        match effects.as_slice() {
            [Effect::PostChat { session_id, .. }] => *session_id,
            other => panic!("expected one PostChat, got {other:?}"),
        }
    }

    /// Sends `text`, answers with `reply` and waits out the typing delay.
    fn exchange(widget: &mut Widget<ManualClock>, clock: &ManualClock, text: &str, reply: &str) {
        let session_id = submit(widget, text);
        widget.handle(Event::ChatCompleted {
            session_id,
            result: Ok(reply.to_string()),
        });
        clock.advance(Duration::from_millis(1000));
        assert!(widget.fire_due_timers().is_empty());
    }

    fn single_poll(widget: &Widget<ManualClock>) -> PollId {
        let polls: Vec<_> = widget.current_polls().collect();
        assert_eq!(polls.len(), 1, "expected exactly one poll");
        polls[0].id
    }

    fn fire_check(widget: &mut Widget<ManualClock>, clock: &ManualClock, after: Duration) -> String {
        clock.advance(after);
        match widget.fire_due_timers().as_slice() {
            [Effect::CheckTicket { email, .. }] => email.clone(),
            other => panic!("expected one CheckTicket, got {other:?}"),
        }
    }

    fn found() -> TicketStatus {
        TicketStatus::Found(TicketDetails {
            ticket_id: "T1".to_string(),
            service_type: "Cleaning".to_string(),
            date: "2024-01-01".to_string(),
            time: "10:00".to_string(),
        })
    }

    #[test]
    fn starts_with_welcome_turn() {
        let (widget, _) = widget();
        let history = widget.session().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, MessageRole::Assistant);

        let view = widget.view();
        assert_eq!(view.bubbles.len(), 1);
        assert_eq!(view.bubbles[0].text, WidgetConfig::default().texts.welcome);
        assert!(view.input_enabled);
    }

    #[test]
    fn blank_input_is_ignored() {
        let (mut widget, _) = widget();
        assert!(widget.handle(Event::Submit("   \n\t".to_string())).is_empty());
        assert_eq!(widget.session().len(), 1);
        assert!(!widget.is_busy());
    }

    #[test]
    fn user_turn_is_appended_before_request() {
        let (mut widget, _) = widget();
        let effects = widget.handle(Event::Submit("  hello  ".to_string()));

        let [Effect::PostChat { session_id, request }] = effects.as_slice() else {
            panic!("expected one PostChat");
        };
        assert_eq!(*session_id, widget.session().id());
        assert_eq!(request.session_id, Some(session_id.to_string()));
        let last = request.history.last().expect("history");
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "hello");

        let view = widget.view();
        assert_eq!(view.bubbles.last().map(|b| b.text.as_str()), Some("hello"));
        assert!(view.typing);
        assert!(!view.input_enabled);
    }

    #[test]
    fn second_send_while_in_flight_is_ignored() {
        let (mut widget, _) = widget();
        submit(&mut widget, "first");
        assert!(widget.handle(Event::Submit("second".to_string())).is_empty());
        assert_eq!(widget.session().len(), 2);
    }

    #[test]
    fn reply_is_revealed_after_typing_delay() {
        let (mut widget, clock) = widget();
        let session_id = submit(&mut widget, "hello");
        widget.handle(Event::ChatCompleted {
            session_id,
            result: Ok("Hi!".to_string()),
        });

        assert_eq!(widget.session().len(), 2);
        assert!(widget.is_busy());

        clock.advance(Duration::from_millis(999));
        widget.fire_due_timers();
        assert_eq!(widget.session().len(), 2);

        clock.advance(Duration::from_millis(1));
        assert!(widget.fire_due_timers().is_empty());

        let last = widget.session().last_message().expect("reply");
        assert_eq!(last.role, MessageRole::Assistant);
        assert_eq!(last.content, "Hi!");
        assert_eq!(widget.session().len(), 3);
        assert!(!widget.is_busy());
        assert_eq!(widget.current_polls().count(), 0);
        assert_eq!(widget.next_deadline(), None);
    }

    #[test]
    fn http_failure_without_body_uses_generic_reason() {
        let (mut widget, _) = widget();
        let session_id = submit(&mut widget, "hello");
        widget.handle(Event::ChatCompleted {
            session_id,
            result: Err(ChatError::Http {
                status: 500,
                reason: None,
            }),
        });

        let view = widget.view();
        let last = view.bubbles.last().expect("bubble");
        assert_eq!(last.text, "Désolé, une erreur est survenue : Erreur réseau");
        assert_eq!(last.tone, Tone::Error);
        assert!(view.input_enabled);
        assert_eq!(widget.session().len(), 2);
        assert_eq!(
            widget.session().last_message().map(|m| m.role),
            Some(MessageRole::User)
        );
    }

    #[test]
    fn server_reason_is_shown() {
        let (mut widget, _) = widget();
        let session_id = submit(&mut widget, "hello");
        widget.handle(Event::ChatCompleted {
            session_id,
            result: Err(ChatError::Http {
                status: 500,
                reason: Some("Une erreur interne est survenue.".to_string()),
            }),
        });

        let view = widget.view();
        assert_eq!(
            view.bubbles.last().map(|b| b.text.as_str()),
            Some("Désolé, une erreur est survenue : Une erreur interne est survenue.")
        );
    }

    #[test]
    fn malformed_reply_is_reported() {
        let (mut widget, _) = widget();
        let session_id = submit(&mut widget, "hello");
        widget.handle(Event::ChatCompleted {
            session_id,
            result: Err(ChatError::MalformedResponse {
                details: "missing response field".to_string(),
            }),
        });

        let view = widget.view();
        assert_eq!(
            view.bubbles.last().map(|b| b.text.as_str()),
            Some("Désolé, une erreur est survenue : La réponse du serveur est mal formée.")
        );
        assert!(!widget.is_busy());
    }

    #[test]
    fn input_usable_after_failure() {
        let (mut widget, _) = widget();
        let session_id = submit(&mut widget, "hello");
        widget.handle(Event::ChatCompleted {
            session_id,
            result: Err(ChatError::Transport {
                details: "connection refused".to_string(),
            }),
        });
        submit(&mut widget, "again");
        assert_eq!(widget.session().len(), 3);
    }

    #[test]
    fn pending_marker_starts_poll_for_recent_email() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "mon email est p@q.com", "Merci !");
        exchange(&mut widget, &clock, "book an appointment", PENDING_REPLY);

        let poll_id = single_poll(&widget);
        assert_eq!(widget.poll_state(poll_id), Some(&PollState::Scheduled));
        assert_eq!(
            widget.next_deadline(),
            Some(clock.now() + Duration::from_millis(7000))
        );

        clock.advance(Duration::from_millis(6999));
        assert!(widget.fire_due_timers().is_empty());
        assert_eq!(fire_check(&mut widget, &clock, Duration::from_millis(1)), "p@q.com");
        assert_eq!(widget.poll_state(poll_id), Some(&PollState::Checking));
    }

    #[test]
    fn marker_without_email_starts_nothing() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "book an appointment", TICKET_PENDING_MARKER);

        assert_eq!(widget.current_polls().count(), 0);
        assert_eq!(widget.next_deadline(), None);
    }

    #[test]
    fn found_ticket_is_confirmed() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        let poll_id = single_poll(&widget);
        fire_check(&mut widget, &clock, Duration::from_millis(7000));

        widget.handle(Event::TicketChecked {
            poll_id,
            result: Ok(found()),
        });

        let view = widget.view();
        let last = view.bubbles.last().expect("bubble");
        assert_eq!(last.tone, Tone::Confirmation);
        for field in ["T1", "Cleaning", "2024-01-01", "10:00"] {
            assert!(last.text.contains(field));
        }
        assert_eq!(widget.poll_state(poll_id), None);
        assert_eq!(widget.current_polls().count(), 0);
        assert_eq!(widget.next_deadline(), None);
    }

    #[test]
    fn retries_are_user_driven_and_bounded() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        let poll_id = single_poll(&widget);
        fire_check(&mut widget, &clock, Duration::from_millis(7000));

        for retry in 1..=3 {
            widget.handle(Event::TicketChecked {
                poll_id,
                result: Ok(TicketStatus::NotFound),
            });
            let view = widget.view();
            let waiting = view.bubbles.last().expect("waiting bubble");
            assert_eq!(waiting.tone, Tone::Waiting);
            let action = waiting.action.clone().expect("retry offered");
            assert!(matches!(action, Action::RetryTicket { poll_id: id, .. } if id == poll_id));
            assert_eq!(widget.next_deadline(), None);

            let bubbles_before = view.bubbles.len();
            widget.handle(action.event());
            assert_eq!(widget.view().bubbles.len(), bubbles_before - 1);
            assert_eq!(
                widget.next_deadline(),
                Some(clock.now() + Duration::from_millis(4000))
            );
            assert_eq!(
                widget.current_polls().next().map(|p| p.retry_count),
                Some(retry)
            );
            fire_check(&mut widget, &clock, Duration::from_millis(4000));
        }

        widget.handle(Event::TicketChecked {
            poll_id,
            result: Ok(TicketStatus::NotFound),
        });
        let view = widget.view();
        let waiting = view.bubbles.last().expect("waiting bubble");
        assert_eq!(waiting.tone, Tone::Waiting);
        assert_eq!(waiting.action, None);
        assert_eq!(widget.poll_state(poll_id), None);

        widget.handle(Event::RetryTicket(poll_id));
        assert_eq!(widget.next_deadline(), None);
        assert_eq!(widget.view().bubbles.len(), view.bubbles.len());
    }

    #[test]
    fn failed_check_stops_polling() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        let poll_id = single_poll(&widget);
        fire_check(&mut widget, &clock, Duration::from_millis(7000));

        widget.handle(Event::TicketChecked {
            poll_id,
            result: Err(TicketError::Parse {
                details: "expected value".to_string(),
            }),
        });

        let view = widget.view();
        let last = view.bubbles.last().expect("bubble");
        assert_eq!(last.text, "❌ Erreur lors de la vérification du ticket.");
        assert_eq!(last.action, None);
        assert_eq!(widget.poll_state(poll_id), None);
        assert_eq!(widget.next_deadline(), None);
    }

    #[test]
    fn repeated_marker_runs_independent_polls() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        exchange(&mut widget, &clock, "encore ?", PENDING_REPLY);
        assert_eq!(widget.current_polls().count(), 2);
    }

    #[test]
    fn dedupe_skips_unresolved_poll_for_same_email() {
        let mut config = WidgetConfig::default();
        config.poll.dedupe_by_email = true;
        let (mut widget, clock) = widget_with(config);

        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        exchange(&mut widget, &clock, "encore ?", PENDING_REPLY);
        assert_eq!(widget.current_polls().count(), 1);
    }

    #[test]
    fn new_conversation_resets_session_and_surface() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "hello", "Hi!");
        let old_id = widget.session().id();

        widget.handle(Event::NewConversation);

        assert_ne!(widget.session().id(), old_id);
        assert_eq!(widget.session().len(), 1);
        assert_eq!(widget.view().bubbles.len(), 1);
    }

    #[test]
    fn late_reply_for_replaced_conversation_is_dropped() {
        let (mut widget, clock) = widget();
        let old_session = submit(&mut widget, "hello");
        widget.handle(Event::NewConversation);

        assert!(widget.is_busy());
        assert!(widget.handle(Event::Submit("too soon".to_string())).is_empty());

        widget.handle(Event::ChatCompleted {
            session_id: old_session,
            result: Ok(PENDING_REPLY.to_string()),
        });
        clock.advance(Duration::from_millis(1000));
        widget.fire_due_timers();

        assert!(!widget.is_busy());
        assert_eq!(widget.session().len(), 1);
        assert_eq!(widget.view().bubbles.len(), 1);
        assert_eq!(widget.current_polls().count(), 0);
    }

    #[test]
    fn late_error_for_replaced_conversation_is_dropped() {
        let (mut widget, _) = widget();
        let old_session = submit(&mut widget, "hello");
        widget.handle(Event::NewConversation);

        widget.handle(Event::ChatCompleted {
            session_id: old_session,
            result: Err(ChatError::Http {
                status: 500,
                reason: None,
            }),
        });

        assert!(!widget.is_busy());
        assert_eq!(widget.view().bubbles.len(), 1);
    }

    #[test]
    fn ticket_status_for_replaced_conversation_is_not_shown() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        let poll_id = single_poll(&widget);

        widget.handle(Event::NewConversation);
        fire_check(&mut widget, &clock, Duration::from_millis(7000));
        widget.handle(Event::TicketChecked {
            poll_id,
            result: Ok(found()),
        });

        assert_eq!(widget.poll_state(poll_id), None);
        assert_eq!(widget.view().bubbles.len(), 1);
    }

    #[test]
    fn pending_poll_is_forgotten_with_its_conversation() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        let poll_id = single_poll(&widget);
        fire_check(&mut widget, &clock, Duration::from_millis(7000));
        widget.handle(Event::TicketChecked {
            poll_id,
            result: Ok(TicketStatus::NotFound),
        });
        assert_eq!(widget.poll_state(poll_id), Some(&PollState::Pending));

        widget.handle(Event::NewConversation);

        assert_eq!(widget.poll_state(poll_id), None);
        widget.handle(Event::RetryTicket(poll_id));
        assert_eq!(widget.next_deadline(), None);
    }

    #[test]
    fn scheduled_poll_outlives_new_conversation_until_resolved() {
        let (mut widget, clock) = widget();
        exchange(&mut widget, &clock, "p@q.com", PENDING_REPLY);
        let poll_id = single_poll(&widget);

        widget.handle(Event::NewConversation);
        assert_eq!(widget.poll_state(poll_id), Some(&PollState::Scheduled));
        assert_eq!(widget.current_polls().count(), 0);

        fire_check(&mut widget, &clock, Duration::from_millis(7000));
        widget.handle(Event::TicketChecked {
            poll_id,
            result: Ok(TicketStatus::NotFound),
        });

        assert_eq!(widget.poll_state(poll_id), None);
        assert_eq!(widget.view().bubbles.len(), 1);
    }

    #[test]
    fn unmatched_completions_are_ignored() {
        let (mut widget, _) = widget();
        widget.handle(Event::ChatCompleted {
            session_id: SessionId::new(),
            result: Ok("stray".to_string()),
        });
        widget.handle(Event::TicketChecked {
            poll_id: PollId::new(),
            result: Ok(TicketStatus::NotFound),
        });

        assert_eq!(widget.view().bubbles.len(), 1);
        assert_eq!(widget.next_deadline(), None);
    }
}
