//! Tokio driver for a [`Widget`].

use crate::event::{Effect, Event};
use crate::render::View;
use crate::widget::Widget;
use deskchat_conversation::ChatBackend;
use deskchat_scheduler::Clock;
use deskchat_ticket::TicketBackend;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Runs a widget: feeds it events, performs its effects on the backends and
/// fires its timers.
///
/// Backend calls run as spawned tasks and report back through an internal
/// channel, so a slow endpoint never blocks the visitor's input. Every state
/// change publishes a fresh [`View`] to subscribers.
pub struct WidgetRuntime<C, B, T> {
    widget: Widget<C>,
    chat: Arc<B>,
    tickets: Arc<T>,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
    view_tx: watch::Sender<View>,
}

impl<C, B, T> WidgetRuntime<C, B, T>
where
    C: Clock,
    B: ChatBackend + 'static,
    T: TicketBackend + 'static,
{
    /// Creates a runtime around `widget`.
    pub fn new(widget: Widget<C>, chat: Arc<B>, tickets: Arc<T>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (view_tx, _) = watch::channel(widget.view());
        Self {
            widget,
            chat,
            tickets,
            completions_tx,
            completions_rx,
            view_tx,
        }
    }

    /// Returns a receiver that always holds the latest view.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.view_tx.subscribe()
    }

    /// Processes visitor events until `input` closes, then returns the
    /// widget.
    ///
    /// Backend calls still in flight when `input` closes are abandoned.
    pub async fn run(mut self, mut input: mpsc::Receiver<Event>) -> Widget<C> {
        info!(session_id = %self.widget.session().id(), "widget runtime started");

        loop {
            let until_due = self.until_next_timer();

            tokio::select! {
                event = input.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                Some(event) = self.completions_rx.recv() => self.dispatch(event),
                () = tokio::time::sleep(until_due.unwrap_or_default()), if until_due.is_some() => {
                    let effects = self.widget.fire_due_timers();
                    self.perform_all(effects);
                }
            }

            self.view_tx.send_replace(self.widget.view());
        }

        info!("widget runtime stopped");
        self.widget
    }

    fn until_next_timer(&self) -> Option<Duration> {
        let now = self.widget.clock().now();
        self.widget
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.widget.handle(event);
        self.perform_all(effects);
    }

    fn perform_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(&self, effect: Effect) {
        let completions = self.completions_tx.clone();
        match effect {
            Effect::PostChat {
                session_id,
                request,
            } => {
                let chat = Arc::clone(&self.chat);
                tokio::spawn(async move {
                    let result = chat.send(&request).await;
                    if completions
                        .send(Event::ChatCompleted { session_id, result })
                        .is_err()
                    {
                        debug!(session_id = %session_id, "runtime gone before chat reply");
                    }
                });
            }
            Effect::CheckTicket { poll_id, email } => {
                let tickets = Arc::clone(&self.tickets);
                tokio::spawn(async move {
                    let result = tickets.check(&email).await;
                    if completions
                        .send(Event::TicketChecked { poll_id, result })
                        .is_err()
                    {
                        debug!(poll_id = %poll_id, "runtime gone before ticket status");
                    }
                });
            }
        }
    }
}
