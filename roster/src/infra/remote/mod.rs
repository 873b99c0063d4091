//! Remote record service owning the persistence of [`User`]s.
//!
//! [`User`]: crate::domain::User

#[cfg(feature = "http")]
pub mod http;
pub mod raw;

use derive_more::{Display, Error as StdError};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote record service operation.
///
/// Implementors are expected to support:
/// - [`Select`]`<`[`By`]`<Vec<`[`raw::User`]`>, ()>>` listing all records;
/// - [`Insert`]`<`[`raw::Payload`]`>` creating a record and echoing it back;
/// - [`Update`]`<(`[`user::Id`]`, `[`raw::Payload`]`)>` updating a record;
/// - [`Delete`]`<`[`user::Id`]`>` deleting a record.
///
/// [`By`]: common::operations::By
/// [`Delete`]: common::operations::Delete
/// [`Insert`]: common::operations::Insert
/// [`Select`]: common::operations::Select
/// [`Update`]: common::operations::Update
/// [`user::Id`]: crate::domain::user::Id
pub use common::Handler as Remote;

/// Operation performed on a [`Remote`] record service.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Operation {
    /// Listing of all users.
    #[display("fetch users")]
    List,

    /// Creation of a user.
    #[display("create user")]
    Create,

    /// Update of a user.
    #[display("update user")]
    Update,

    /// Deletion of a user.
    #[display("delete user")]
    Delete,
}

/// [`Remote`] record service error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// [`Remote`] refused to perform the [`Operation`].
    #[display("Failed to {_0}")]
    Rejected(#[error(not(source))] Operation),

    /// [`Remote`] couldn't be reached or responded with garbage.
    #[cfg(feature = "http")]
    #[display("Failed to {operation}: {source}")]
    Transport {
        /// [`Operation`] being performed.
        operation: Operation,

        /// Underlying [`reqwest`] error.
        source: reqwest::Error,
    },
}

impl Error {
    /// Returns the [`Operation`] this [`Error`] happened on.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::Rejected(op) => *op,
            #[cfg(feature = "http")]
            Self::Transport { operation, .. } => *operation,
        }
    }
}
