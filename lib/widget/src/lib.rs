//! The deskchat widget.
//!
//! The widget is a single-threaded state machine: user actions and backend
//! completions come in as [`Event`]s, network work goes out as
//! [`Effect`]s, and delays run on a [`DelayQueue`](deskchat_scheduler::DelayQueue).
//! What the visitor sees is [`render`]ed from state on demand.
//!
//! [`WidgetRuntime`] drives a widget on tokio against real or fake backends.

pub mod config;
pub mod event;
pub mod render;
pub mod runtime;
pub mod texts;
pub mod transcript;
pub mod widget;

pub use config::WidgetConfig;
pub use event::{Effect, Event};
pub use render::{Action, Author, Bubble, Tone, View, render};
pub use runtime::WidgetRuntime;
pub use texts::WidgetTexts;
pub use transcript::{Entry, EntryKind, Transcript};
pub use widget::Widget;
