//! Roster is an in-memory view engine over a remotely persisted collection of
//! users: it searches, filters, orders and windows the collection into the
//! rows to be rendered, and keeps the collection consistent with the remote
//! record service on mutations.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod controller;
pub mod domain;
pub mod form;
pub mod infra;
pub mod notification;
pub mod read;

use std::time::Duration;

use common::pagination::Mode;
use smart_default::SmartDefault;

use crate::read::user::list::PageSize;

pub use self::{command::Command, controller::Controller};

/// [`Controller`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// [`PageSize`] to start with.
    #[default(PageSize::Ten)]
    pub page_size: PageSize,

    /// Windowing [`Mode`] to start with.
    #[default(Mode::Paged)]
    pub mode: Mode,

    /// Quiet period after the last search input before it becomes active.
    #[default(Duration::from_millis(300))]
    pub debounce: Duration,

    /// Suggested display duration of emitted notifications.
    #[default(Duration::from_secs(3))]
    pub notification_duration: Duration,
}
