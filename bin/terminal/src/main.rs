//! Chat with the clinic assistant from a terminal.
//!
//! Lines typed on stdin are sent as messages; `/new`, `/retry` and `/quit`
//! drive the widget. Logs go to stderr and are filtered with `RUST_LOG`.

mod command;
mod config;
mod error;
mod surface;

use command::{Command, HELP};
use config::TerminalConfig;
use deskchat_http::ApiClient;
use deskchat_scheduler::TokioClock;
use deskchat_widget::{Event, View, Widget, WidgetRuntime};
use error::TerminalError;
use std::sync::Arc;
use surface::TerminalSurface;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> deskchat_core::Result<(), TerminalError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TerminalConfig::from_env().map_err(|e| TerminalError::Config {
        details: e.to_string(),
    })?;
    tracing::info!(base_url = %config.api.base_url, "Loaded configuration");

    let client = ApiClient::new(config.api.clone()).map_err(|e| TerminalError::Client {
        details: e.to_string(),
    })?;
    if let Err(e) = client.health().await {
        tracing::warn!(error = %e, "Backend health check failed; continuing anyway");
    }

    let widget = Widget::new(config.widget, TokioClock::new());
    let runtime = WidgetRuntime::new(
        widget,
        Arc::new(client.chat_backend()),
        Arc::new(client.ticket_backend()),
    );
    let views = runtime.subscribe();
    let (input, events) = mpsc::channel(16);
    let runtime = tokio::spawn(runtime.run(events));
    let printer = tokio::spawn(print_views(views.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(|e| TerminalError::Io {
        details: e.to_string(),
    })? {
        let event = match Command::parse(&line) {
            Command::Say(text) => Event::Submit(text),
            Command::NewConversation => Event::NewConversation,
            Command::Retry => match views.borrow().latest_action() {
                Some(action) => action.event(),
                None => {
                    println!("Aucun ticket à re-vérifier.");
                    continue;
                }
            },
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
        };
        if input.send(event).await.is_err() {
            tracing::warn!("Widget runtime stopped");
            break;
        }
    }

    drop(input);
    if let Err(e) = runtime.await {
        tracing::warn!(error = %e, "Widget runtime task failed");
    }
    printer.abort();
    Ok(())
}

/// Prints every published view until the runtime goes away.
async fn print_views(mut views: watch::Receiver<View>) {
    let mut surface = TerminalSurface::new();
    loop {
        let view = views.borrow_and_update().clone();
        if let Err(e) = surface.draw(&view, &mut std::io::stdout()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
            return;
        }
        if views.changed().await.is_err() {
            return;
        }
    }
}
