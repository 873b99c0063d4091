//! [`Command`] for loading the canonical collection of [`User`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    infra::{
        remote::{self, raw},
        Remote,
    },
    Controller,
};

use super::Command;

/// [`Command`] for loading the canonical collection of [`User`]s from the
/// [`Remote`] record service.
///
/// Issuing a new [`LoadUsers`] supersedes any in-flight one, whose response
/// is discarded then.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadUsers;

impl<R> Command<LoadUsers> for Controller<R>
where
    R: Remote<
        Select<By<Vec<raw::User>, ()>>,
        Ok = Vec<raw::User>,
        Err = Traced<remote::Error>,
    >,
{
    /// Number of loaded [`User`]s, or [`None`] if the response was discarded.
    type Ok = Option<usize>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: LoadUsers) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ticket = self.state().begin_load();

        let result = self.remote().execute(Select(By::new(()))).await;

        let mut state = self.state();
        if !state.is_current_load(ticket) {
            log::warn!("discarding stale `LoadUsers` response");
            return Ok(None);
        }
        state.loading = false;

        let records = result
            .inspect_err(|e| state.fail(e.as_ref(), None))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let count = state.populate(records);
        log::info!("{count} users loaded");

        Ok(Some(count))
    }
}

/// Error of [`LoadUsers`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Remote`] error.
    #[display("`Remote` operation failed: {_0}")]
    Remote(remote::Error),
}
