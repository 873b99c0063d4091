//! [`Notification`]s emitted on completed mutations.

use std::time::Duration;

use common::define_kind;
use derive_more::{Display, From, Into};

define_kind! {
    #[doc = "Severity of a [`Notification`]."]
    enum Severity {
        #[doc = "Neutral information."]
        Info = 1,

        #[doc = "Successfully completed operation."]
        Success = 2,

        #[doc = "Failed operation."]
        Error = 3,
    }
}

/// ID of a [`Notification`], unique within its [`Queue`].
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Id(u64);

/// Discrete message to be displayed to the user for a while.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    /// ID of this [`Notification`].
    pub id: Id,

    /// Text of this [`Notification`].
    pub message: String,

    /// [`Severity`] of this [`Notification`].
    pub severity: Severity,

    /// Suggested display duration of this [`Notification`].
    pub duration: Duration,
}

/// Queue of [`Notification`]s awaiting to be displayed or dismissed.
#[derive(Clone, Debug)]
pub struct Queue {
    /// Default display duration of pushed [`Notification`]s.
    duration: Duration,

    /// ID of the last pushed [`Notification`].
    last_id: u64,

    /// [`Notification`]s not dismissed yet, in the order they were pushed.
    items: Vec<Notification>,
}

impl Queue {
    /// Creates a new empty [`Queue`] with the provided default display
    /// `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            last_id: 0,
            items: Vec::new(),
        }
    }

    /// Pushes a new [`Notification`] into this [`Queue`].
    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
    ) -> Id {
        self.last_id += 1;
        let id = Id(self.last_id);
        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
            duration: self.duration,
        });
        id
    }

    /// Removes the [`Notification`] with the provided [`Id`].
    ///
    /// Returns `false` if there is no such [`Notification`].
    pub fn dismiss(&mut self, id: Id) -> bool {
        let len = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != len
    }

    /// Returns the [`Notification`]s not dismissed yet.
    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Returns the most recently pushed [`Notification`] not dismissed yet.
    #[must_use]
    pub fn last(&self) -> Option<&Notification> {
        self.items.last()
    }
}
