//! Starring-related APIs
use crate::{
    client::Error,
    connection::ApiConnection,
    model::{Repository, User},
    pagination::ApiOptions,
    path,
    services::options_or_default,
    status,
};

use async_trait::async_trait;
use serde::de::IgnoredAny;

/// Starring-related APIs
#[async_trait]
pub trait StarredService {
    /// Retrieves the repositories starred by the authenticated user.
    async fn get_all_for_current(
        &self,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error>;

    /// Retrieves the repositories starred by the user named `login`.
    async fn get_all_for_user(
        &self,
        login: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error>;

    /// Retrieves the users who starred the repository.
    async fn get_all_stargazers(
        &self,
        owner: &str,
        name: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<User>, Error>;

    /// Checks whether the authenticated user starred the repository.
    async fn check_starred(&self, owner: &str, name: &str) -> Result<bool, Error>;

    /// Stars the repository. Returns `true` when the star was applied.
    async fn star_repo(&self, owner: &str, name: &str) -> Result<bool, Error>;

    /// Removes the star from the repository. Returns `true` when a star was
    /// removed.
    async fn unstar_repo(&self, owner: &str, name: &str) -> Result<bool, Error>;
}

/// [`StarredService`] over any [`ApiConnection`].
pub struct StarredClient<'a, C> {
    pub(crate) connection: &'a C,
}

impl<'a, C: ApiConnection> StarredClient<'a, C> {
    pub fn new(connection: &'a C) -> Self {
        StarredClient { connection }
    }
}

#[async_trait]
impl<'a, C: ApiConnection> StarredService for StarredClient<'a, C> {
    async fn get_all_for_current(
        &self,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error> {
        let p = path::current_user_starred_path()?;

        self.connection
            .get_all(&p, options_or_default(options))
            .await
    }

    async fn get_all_for_user(
        &self,
        login: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<Repository>, Error> {
        let p = path::user_starred_path(login)?;

        self.connection
            .get_all(&p, options_or_default(options))
            .await
    }

    async fn get_all_stargazers(
        &self,
        owner: &str,
        name: &str,
        options: Option<ApiOptions>,
    ) -> Result<Vec<User>, Error> {
        let p = path::repo_stargazers_path(owner, name)?;

        self.connection
            .get_all(&p, options_or_default(options))
            .await
    }

    async fn check_starred(&self, owner: &str, name: &str) -> Result<bool, Error> {
        let p = path::current_user_starred_repo_path(owner, name)?;
        // 204 with no body when starred
        let result = self.connection.get::<IgnoredAny>(&p).await;

        status::is_present(result)
    }

    async fn star_repo(&self, owner: &str, name: &str) -> Result<bool, Error> {
        let p = path::current_user_starred_repo_path(owner, name)?;
        let result = self.connection.put_empty(&p).await;

        status::applied(result)
    }

    async fn unstar_repo(&self, owner: &str, name: &str) -> Result<bool, Error> {
        let p = path::current_user_starred_repo_path(owner, name)?;
        let result = self.connection.delete(&p).await;

        status::applied(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        client::ArgumentError,
        path::Endpoint,
        testing::{Call, MockConnection, Reply},
    };
    use reqwest::StatusCode;

    fn endpoint(p: &str) -> Endpoint {
        Endpoint::resolve(p, &[]).unwrap()
    }

    #[tokio::test]
    async fn test_listings_forward_options() {
        let connection = MockConnection::new();
        let client = StarredClient::new(&connection);
        let options = ApiOptions::new(1, 1, 1).unwrap();

        client.get_all_for_current(None).await.unwrap();
        client.get_all_for_user("banana", Some(options)).await.unwrap();
        client
            .get_all_stargazers("fight", "club", None)
            .await
            .unwrap();

        assert_eq!(
            connection.calls(),
            vec![
                Call::GetAll(endpoint("user/starred"), ApiOptions::NONE),
                Call::GetAll(endpoint("users/banana/starred"), options),
                Call::GetAll(endpoint("repos/fight/club/stargazers"), ApiOptions::NONE),
            ]
        );
    }

    #[tokio::test]
    async fn test_check_starred() {
        let connection = MockConnection::new();
        connection
            .reply(Reply::Status(StatusCode::NO_CONTENT))
            .reply(Reply::Error(Error::NotFound("Not Found".to_string())));
        let client = StarredClient::new(&connection);

        assert!(client.check_starred("fight", "club").await.unwrap());
        assert!(!client.check_starred("fight", "club").await.unwrap());
        assert_eq!(
            connection.calls(),
            vec![
                Call::Get(endpoint("user/starred/fight/club")),
                Call::Get(endpoint("user/starred/fight/club")),
            ]
        );
    }

    #[tokio::test]
    async fn test_star_and_unstar() {
        let connection = MockConnection::new();
        connection
            .reply(Reply::Status(StatusCode::NO_CONTENT))
            .reply(Reply::Status(StatusCode::NO_CONTENT))
            .reply(Reply::Error(Error::NotFound("Not Found".to_string())));
        let client = StarredClient::new(&connection);

        assert!(client.star_repo("fight", "club").await.unwrap());
        assert!(client.unstar_repo("fight", "club").await.unwrap());
        assert!(!client.unstar_repo("fight", "club").await.unwrap());
        assert_eq!(
            connection.calls(),
            vec![
                Call::PutEmpty(endpoint("user/starred/fight/club")),
                Call::Delete(endpoint("user/starred/fight/club")),
                Call::Delete(endpoint("user/starred/fight/club")),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejects_empty_arguments() {
        let connection = MockConnection::new();
        let client = StarredClient::new(&connection);

        let err = client.star_repo("", "club").await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument(ArgumentError::Empty("owner"))
        ));
        let err = client.get_all_for_user("", None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument(ArgumentError::Empty("login"))
        ));

        assert!(connection.calls().is_empty());
    }
}
