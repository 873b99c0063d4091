//! [`Command`] for creating a new [`User`].

use common::operations::Insert;
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

/// [`Command`] for creating a new [`User`].
///
/// On success the [`User`] is prepended to the canonical collection, the form
/// is closed and the window is reset. On failure the collection and the form
/// stay untouched.
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// Already validated [`user::Fields`] of a new [`User`].
    pub fields: user::Fields,
}

impl<R> Command<CreateUser> for Controller<R>
where
    R: Remote<
        Insert<raw::Payload>,
        Ok = raw::User,
        Err = Traced<remote::Error>,
    >,
{
    /// Created [`User`], or [`None`] if the response was discarded.
    type Ok = Option<User>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser { fields } = cmd;

        let ticket = {
            let mut state = self.state();
            if state.submitting {
                return Err(tracerr::new!(E::Busy));
            }
            state.begin_submit()
        };

        let result = self
            .remote()
            .execute(Insert(raw::Payload::new(None, &fields)))
            .await;

        let mut state = self.state();
        if !state.is_current(ticket) {
            log::warn!("discarding stale `CreateUser` response");
            return Ok(None);
        }
        state.submitting = false;

        let echoed = result
            .inspect_err(|e| state.fail(e.as_ref(), Some(SAVE_FAILED)))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let user = User::new(state.assign_id(echoed.id()), fields);
        state.users.insert(0, user.clone());
        state.form = Form::Closed;
        state.reset_window();
        state.notify("User created", Severity::Success);
        log::info!("`User(id: {})` created", user.id);

        Ok(Some(user))
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] error.
    #[display("`Remote` operation failed: {_0}")]
    Remote(remote::Error),

    /// Another creation or update is in flight.
    #[display("Another `User` is being saved")]
    #[from(ignore)]
    Busy,
}
