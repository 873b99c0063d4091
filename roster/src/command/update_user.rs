//! [`Command`] for updating an existing [`User`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    form::Form,
    infra::{
        remote::{self, raw},
        Remote,
    },
    notification::Severity,
    Controller,
};

use super::{Command, SAVE_FAILED};

/// [`Command`] for updating the editable [`user::Fields`] of an existing
/// [`User`].
///
/// On success the [`User`] is updated in place and the form is closed. On
/// failure the collection and the form stay untouched.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to update.
    pub id: user::Id,

    /// Already validated new [`user::Fields`] of the [`User`].
    pub fields: user::Fields,
}

impl<R> Command<UpdateUser> for Controller<R>
where
    R: Remote<
        Update<(user::Id, raw::Payload)>,
        Ok = raw::User,
        Err = Traced<remote::Error>,
    >,
{
    /// Updated [`User`], or [`None`] if the response was discarded or the
    /// [`User`] has vanished from the collection meanwhile.
    type Ok = Option<User>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser { id, fields } = cmd;

        let ticket = {
            let mut state = self.state();
            if state.submitting {
                return Err(tracerr::new!(E::Busy));
            }
            if state.user(id).is_none() {
                state.banner = Some(E::UserNotExists(id).to_string());
                state.notify(SAVE_FAILED, Severity::Error);
                return Err(tracerr::new!(E::UserNotExists(id)));
            }
            state.begin_submit()
        };

        let result = self
            .remote()
            .execute(Update((id, raw::Payload::new(Some(id), &fields))))
            .await;

        let mut state = self.state();
        if !state.is_current(ticket) {
            log::warn!("discarding stale `UpdateUser` response");
            return Ok(None);
        }
        state.submitting = false;

        _ = result
            .inspect_err(|e| state.fail(e.as_ref(), Some(SAVE_FAILED)))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        state.form = Form::Closed;
        state.notify("User updated", Severity::Success);
        let Some(user) = state.user_mut(id) else {
            log::warn!("updated `User(id: {id})` is gone from the collection");
            return Ok(None);
        };
        user.apply(fields);
        let user = user.clone();
        log::info!("`User(id: {id})` updated");

        Ok(Some(user))
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] error.
    #[display("`Remote` operation failed: {_0}")]
    Remote(remote::Error),

    /// Another creation or update is in flight.
    #[display("Another `User` is being saved")]
    #[from(ignore)]
    Busy,

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
