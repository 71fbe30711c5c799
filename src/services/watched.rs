//! Watching-related APIs
use crate::{
    client::Error,
    connection::ApiConnection,
    model::{NewSubscription, Repository, Subscription, User},
    pagination::ApiOptions,
    path,
    services::options_or_default,
    status,
};

use async_trait::async_trait;
use serde::de::IgnoredAny;

/// Watching-related APIs
///
/// Listings take `None` to fetch every page the server offers.
#[async_trait]
pub trait WatchedService {
    /// Retrieves the repositories watched by the authenticated user.
    async fn get_all_for_current(
        &self,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error>;

    /// Retrieves the repositories watched by the user named `login`.
    async fn get_all_for_user(
        &self,
        login: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error>;

    /// Retrieves the users watching the repository.
    async fn get_all_watchers(
        &self,
        owner: &str,
        name: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<User>, Error>;

    /// Checks whether the authenticated user watches the repository.
    async fn check_watched(&self, owner: &str, name: &str) -> Result<bool, Error>;

    /// Watches the repository with the given settings.
    async fn watch_repo(
        &self,
        owner: &str,
        name: &str,
        new_subscription: &NewSubscription,
    ) -> Result<Subscription, Error>;

    /// Stops watching the repository.
    ///
    /// Returns `true` when a subscription was removed and `false` when there
    /// was none to remove.
    async fn unwatch_repo(&self, owner: &str, name: &str) -> Result<bool, Error>;
}

/// [`WatchedService`] over any [`ApiConnection`].
pub struct WatchedClient<'a, C> {
    pub(crate) connection: &'a C,
}

impl<'a, C: ApiConnection> WatchedClient<'a, C> {
    pub fn new(connection: &'a C) -> Self {
        WatchedClient { connection }
    }
}

#[async_trait]
impl<'a, C: ApiConnection> WatchedService for WatchedClient<'a, C> {
    async fn get_all_for_current(
        &self,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error> {
        let p = path::current_user_subscriptions_path()?;

        self.connection
            .get_all(&p, options_or_default(options))
            .await
    }

    async fn get_all_for_user(
        &self,
        login: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error> {
        let p = path::user_subscriptions_path(login)?;

        self.connection
            .get_all(&p, options_or_default(options))
            .await
    }

    async fn get_all_watchers(
        &self,
        owner: &str,
        name: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<User>, Error> {
        let p = path::repo_subscribers_path(owner, name)?;

        self.connection
            .get_all(&p, options_or_default(options))
            .await
    }

    async fn check_watched(&self, owner: &str, name: &str) -> Result<bool, Error> {
        let p = path::repo_subscription_path(owner, name)?;
        // Only the status matters, not the body.
        let result = self.connection.get::<IgnoredAny>(&p).await;

        status::is_present(result)
    }

    async fn watch_repo(
        &self,
        owner: &str,
        name: &str,
        new_subscription: &NewSubscription,
    ) -> Result<Subscription, Error> {
        let p = path::repo_subscription_path(owner, name)?;

        self.connection.put(&p, new_subscription).await
    }

    async fn unwatch_repo(&self, owner: &str, name: &str) -> Result<bool, Error> {
        let p = path::repo_subscription_path(owner, name)?;
        let result = self.connection.delete(&p).await;

        status::applied(result)
    }
}
