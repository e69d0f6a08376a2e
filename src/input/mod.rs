// SPDX-License-Identifier: GPL-3.0-only

//! Input state and host plumbing.
//!
//! This module holds the small state machines the controller consults on
//! every key (one-shot shift, the readiness gate), the [`TextSink`] trait
//! through which committed text reaches the host, and the host
//! implementations shipped with the crate.
//!
//! # Hosts
//!
//! - `Vec<HostCommand>`: records every call, used by tests
//! - [`Document`]: an in-memory text buffer with a cursor
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use coderskey::input::{Document, HostCommand, TextSink};
//!
//! let mut doc = Document::new();
//! doc.insert_text("let");
//! doc.insert_text(" ");
//! doc.move_cursor(-1);
//!
//! let mut recorded: Vec<HostCommand> = Vec::new();
//! recorded.insert_return();
//! assert_eq!(recorded, vec![HostCommand::InsertReturn]);
//! ```

pub mod document;
pub mod readiness;
pub mod shift;
pub mod sink;

pub use document::Document;
pub use readiness::ReadinessGate;
pub use shift::ShiftState;
pub use sink::{HostCommand, TextSink};
