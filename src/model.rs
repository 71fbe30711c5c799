//! Data models of the REST API
use serde::{Deserialize, Serialize};

/// A user account, as listed among watchers or stargazers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Login name of this user.
    pub login: String,
    pub id: u64,
    /// API url of this user.
    pub url: Option<String>,
    /// Web url of this user's profile.
    pub html_url: Option<String>,
    /// Account type, e.g. `User` or `Organization`.
    pub r#type: Option<String>,
}

/// Repository information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    /// Name of this repository.
    pub name: String,
    /// `owner/name` of this repository.
    pub full_name: String,
    /// The account owning this repository.
    pub owner: User,
    #[serde(default)]
    pub private: bool,
    pub description: Option<String>,
    /// Url of this repository.
    pub url: Option<String>,
    pub html_url: Option<String>,
}

/// The current user's watch settings for a repository.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    /// Whether notifications are received from this repository.
    pub subscribed: bool,
    /// Whether all notifications from this repository are blocked.
    pub ignored: bool,
    /// Why the user is subscribed, when the server says.
    pub reason: Option<String>,
    /// When the subscription was created.
    pub created_at: String,
    /// Url of this subscription.
    pub url: String,
    pub repository_url: Option<String>,
    pub thread_url: Option<String>,
}

/// Watch settings to apply to a repository.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NewSubscription {
    /// Receive notifications from the repository.
    pub subscribed: bool,
    /// Block all notifications from the repository.
    pub ignored: bool,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscription_from_json() {
        let subscription: Subscription = serde_json::from_value(json!({
            "subscribed": true,
            "ignored": false,
            "reason": null,
            "created_at": "2012-10-06T21:34:12Z",
            "url": "https://api.github.com/repos/octocat/Hello-World/subscription",
            "repository_url": "https://api.github.com/repos/octocat/Hello-World"
        }))
        .unwrap();

        assert!(subscription.subscribed);
        assert!(!subscription.ignored);
        assert_eq!(subscription.reason, None);
        assert_eq!(subscription.created_at, "2012-10-06T21:34:12Z");
        assert_eq!(subscription.thread_url, None);
    }

    #[test]
    fn test_new_subscription_to_json() {
        let new_subscription = NewSubscription {
            subscribed: true,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&new_subscription).unwrap(),
            json!({"subscribed": true, "ignored": false})
        );
    }

    #[test]
    fn test_repository_ignores_unknown_fields() {
        let repo: Repository = serde_json::from_value(json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": {"login": "octocat", "id": 1, "type": "User"},
            "forks_count": 9,
            "html_url": "https://github.com/octocat/Hello-World"
        }))
        .unwrap();

        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert_eq!(repo.owner.login, "octocat");
        assert_eq!(repo.owner.r#type.as_deref(), Some("User"));
        assert!(!repo.private);
    }
}
