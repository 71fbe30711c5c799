//! An [`ApiConnection`] that records requests instead of sending them.
//!
//! Replies are scripted in order with [`MockConnection::reply`]; each call
//! consumes the next one. A listing with nothing scripted, or scripted with a
//! bare [`Reply::Status`], yields no items.
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    client::Error,
    connection::ApiConnection,
    pagination::ApiOptions,
    path::Endpoint,
};

/// A request received by a [`MockConnection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(Endpoint),
    GetAll(Endpoint, ApiOptions),
    Put(Endpoint, Value),
    PutEmpty(Endpoint),
    Post(Endpoint, Value),
    Delete(Endpoint),
}

/// A scripted outcome for the next call.
#[derive(Debug)]
pub enum Reply {
    /// A success carrying this JSON body.
    Body(Value),
    /// A success with this status and no body.
    Status(StatusCode),
    /// A failure.
    Error(Error),
}

#[derive(Default)]
pub struct MockConnection {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Reply>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `reply` behind any already scripted.
    pub fn reply(&self, reply: Reply) -> &Self {
        lock(&self.replies).push_back(reply);
        self
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: Call) -> Option<Reply> {
        log::trace!("mock connection received {:?}", call);
        lock(&self.calls).push(call);
        lock(&self.replies).pop_front()
    }

    fn body<T: DeserializeOwned>(reply: Option<Reply>, endpoint: &Endpoint) -> Result<T, Error> {
        match reply {
            Some(Reply::Body(value)) => Ok(serde_json::from_value(value)?),
            Some(Reply::Status(_)) => Ok(serde_json::from_value(Value::Null)?),
            Some(Reply::Error(e)) => Err(e),
            None => Err(unscripted(endpoint)),
        }
    }

    fn status(reply: Option<Reply>, endpoint: &Endpoint) -> Result<StatusCode, Error> {
        match reply {
            Some(Reply::Status(status)) => Ok(status),
            Some(Reply::Body(_)) => Ok(StatusCode::OK),
            Some(Reply::Error(e)) => Err(e),
            None => Err(unscripted(endpoint)),
        }
    }
}

fn unscripted(endpoint: &Endpoint) -> Error {
    Error::ErrorResponse(500, format!("no reply scripted for {}", endpoint))
}

#[async_trait]
impl ApiConnection for MockConnection {
    async fn get<T>(&self, endpoint: &Endpoint) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        let reply = self.record(Call::Get(endpoint.clone()));
        Self::body(reply, endpoint)
    }

    async fn get_all<T>(
        &self,
        endpoint: &Endpoint,
        options: ApiOptions,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        match self.record(Call::GetAll(endpoint.clone(), options)) {
            None | Some(Reply::Status(_)) => Ok(Vec::new()),
            reply => Self::body(reply, endpoint),
        }
    }

    async fn put<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized,
    {
        let reply = self.record(Call::Put(endpoint.clone(), serde_json::to_value(body)?));
        Self::body(reply, endpoint)
    }

    async fn put_empty(&self, endpoint: &Endpoint) -> Result<StatusCode, Error> {
        let reply = self.record(Call::PutEmpty(endpoint.clone()));
        Self::status(reply, endpoint)
    }

    async fn post<T, B>(&self, endpoint: &Endpoint, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized,
    {
        let reply = self.record(Call::Post(endpoint.clone(), serde_json::to_value(body)?));
        Self::body(reply, endpoint)
    }

    async fn delete(&self, endpoint: &Endpoint) -> Result<StatusCode, Error> {
        let reply = self.record(Call::Delete(endpoint.clone()));
        Self::status(reply, endpoint)
    }
}
