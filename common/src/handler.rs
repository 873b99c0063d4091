//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous handler of some `Args`.
///
/// Both view commands and remote record service operations are expressed as
/// [`Handler`]s, so a command is generic over any remote able to execute the
/// operations it needs.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
