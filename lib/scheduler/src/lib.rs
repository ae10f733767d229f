//! Delayed-task scheduling for the deskchat widget.
//!
//! This crate provides:
//!
//! - **Clock**: elapsed-time source, real (`TokioClock`) or virtual (`ManualClock`)
//! - **Delay queue**: tasks released once their deadline has passed

pub mod clock;
pub mod queue;

pub use clock::{Clock, ManualClock, TokioClock};
pub use queue::{DelayQueue, ScheduledTask};
