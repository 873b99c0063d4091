//! HTTP [`Remote`] record service implementation.

use std::time::Duration;

use common::operations::{By, Delete, Insert, Select, Update};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracerr::Traced;
use tracing as log;

use crate::domain::user;

use super::{raw, Error, Operation, Remote};

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Remote`] record service reachable over a REST API.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP [`Client`].
    client: Client,

    /// Base URL of the REST API.
    base_url: String,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying HTTP [`Client`].
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns URL of the users collection.
    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    /// Returns URL of the user with the provided [`user::Id`].
    fn user_url(&self, id: user::Id) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    /// Sends the provided request, ensuring a successful status.
    async fn send(
        request: RequestBuilder,
        operation: Operation,
    ) -> Result<Response, Traced<Error>> {
        let response = request
            .send()
            .await
            .map_err(|source| Error::Transport { operation, source })
            .map_err(tracerr::wrap!())?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("`{operation}` responded with `{status}`");
            return Err(tracerr::new!(Error::Rejected(operation)));
        }
        Ok(response)
    }

    /// Reads a JSON body of the provided [`Response`].
    async fn json<T: DeserializeOwned>(
        response: Response,
        operation: Operation,
    ) -> Result<T, Traced<Error>> {
        response
            .json()
            .await
            .map_err(|source| Error::Transport { operation, source })
            .map_err(tracerr::wrap!())
    }
}

impl Remote<Select<By<Vec<raw::User>, ()>>> for Http {
    type Ok = Vec<raw::User>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<raw::User>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::List;
        let response = Self::send(self.client.get(self.users_url()), op)
            .await
            .map_err(tracerr::wrap!())?;
        Self::json(response, op).await.map_err(tracerr::wrap!())
    }
}

impl Remote<Insert<raw::Payload>> for Http {
    type Ok = raw::User;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert(payload): Insert<raw::Payload>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::Create;
        let request = self.client.post(self.users_url()).json(&payload);
        let response =
            Self::send(request, op).await.map_err(tracerr::wrap!())?;
        Self::json(response, op).await.map_err(tracerr::wrap!())
    }
}

impl Remote<Update<(user::Id, raw::Payload)>> for Http {
    type Ok = raw::User;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Update((id, payload)): Update<(user::Id, raw::Payload)>,
    ) -> Result<Self::Ok, Self::Err> {
        let op = Operation::Update;
        let request = self.client.put(self.user_url(id)).json(&payload);
        let response =
            Self::send(request, op).await.map_err(tracerr::wrap!())?;
        Self::json(response, op).await.map_err(tracerr::wrap!())
    }
}

impl Remote<Delete<user::Id>> for Http {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(id): Delete<user::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::send(self.client.delete(self.user_url(id)), Operation::Delete)
            .await
            .map(drop)
            .map_err(tracerr::wrap!())
    }
}
