//! [`Command`] for deleting a [`User`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user,
    infra::{remote, Remote},
    notification::Severity,
    Controller,
};

use super::Command;

/// [`Command`] for deleting a [`User`] whose deletion was staged with
/// [`Controller::request_delete()`].
///
/// The [`User`] is removed from the canonical collection right away, before
/// the [`Remote`] record service is asked to delete it, and isn't restored if
/// that fails.
#[derive(Clone, Copy, Debug)]
pub struct DeleteUser {
    /// ID of the [`User`] to delete.
    pub id: user::Id,
}

impl<R> Command<DeleteUser> for Controller<R>
where
    R: Remote<Delete<user::Id>, Ok = (), Err = Traced<remote::Error>>,
{
    /// Indicator whether the response was applied rather than discarded.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteUser { id } = cmd;

        let ticket = {
            let mut state = self.state();
            if state.pending_delete != Some(id) {
                return Err(tracerr::new!(E::NotConfirmed(id)));
            }
            state.pending_delete = None;
            state.banner = None;
            state.users.retain(|u| u.id != id);
            state.ticket()
        };

        let result = self.remote().execute(Delete(id)).await;

        let mut state = self.state();
        if !state.is_current(ticket) {
            log::warn!("discarding stale `DeleteUser` response");
            return Ok(false);
        }

        result
            .inspect_err(|e| {
                state.fail(e.as_ref(), Some("Failed to delete user"));
            })
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        state.notify("User deleted", Severity::Success);
        log::info!("`User(id: {id})` deleted");

        Ok(true)
    }
}

/// Error of [`DeleteUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] error.
    #[display("`Remote` operation failed: {_0}")]
    Remote(remote::Error),

    /// Deletion wasn't confirmed.
    #[display("Deletion of `User(id: {_0})` wasn't confirmed")]
    #[from(ignore)]
    NotConfirmed(#[error(not(source))] user::Id),
}
