use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::client::{ArgumentError, Error};

/// Bytes escaped inside one path segment, so an identifier can never add a
/// segment, a query or a fragment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A relative resource path such as `repos/octocat/hello/subscription`.
///
/// Built from a template whose `{placeholders}` are bound to caller-supplied
/// identifiers. Every identifier is checked before the path exists, so an
/// `Endpoint` never carries an empty segment. Identifiers are percent-encoded
/// and always stay a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Binds each `(name, value)` pair to the `{name}` placeholder of `template`.
    ///
    /// Fails with [`ArgumentError::Null`] for a `None` value,
    /// [`ArgumentError::Empty`] for an empty one, [`ArgumentError::DotSegment`]
    /// for `.` or `..`, and [`ArgumentError::Unbound`] when a placeholder is
    /// left without a value.
    pub fn resolve(
        template: &str,
        segments: &[(&'static str, Option<&str>)],
    ) -> Result<Self, Error> {
        let mut bound = Vec::with_capacity(segments.len());
        for &(name, value) in segments {
            bound.push((name, ensure_segment(name, value)?));
        }

        let mut path = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let end = rest[start..].find('}').map_or(rest.len(), |i| start + i + 1);
            let placeholder = &rest[start..end];
            let name = placeholder.trim_start_matches('{').trim_end_matches('}');

            match bound.iter().find(|(n, _)| *n == name) {
                Some((_, value)) => path.extend(utf8_percent_encode(value, SEGMENT)),
                None => return Err(ArgumentError::Unbound(placeholder.to_owned()).into()),
            }
            rest = &rest[end..];
        }
        path.push_str(rest);

        Ok(Endpoint(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn ensure_segment<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, Error> {
    match value {
        None => Err(ArgumentError::Null(name).into()),
        Some("") => Err(ArgumentError::Empty(name).into()),
        Some(".") | Some("..") => Err(ArgumentError::DotSegment(name).into()),
        Some(v) => Ok(v),
    }
}

pub(crate) fn current_user_subscriptions_path() -> Result<Endpoint, Error> {
    Endpoint::resolve("user/subscriptions", &[])
}

pub(crate) fn user_subscriptions_path(login: &str) -> Result<Endpoint, Error> {
    Endpoint::resolve("users/{login}/subscriptions", &[("login", Some(login))])
}

pub(crate) fn repo_subscribers_path(owner: &str, name: &str) -> Result<Endpoint, Error> {
    Endpoint::resolve(
        "repos/{owner}/{name}/subscribers",
        &[("owner", Some(owner)), ("name", Some(name))],
    )
}

pub(crate) fn repo_subscription_path(owner: &str, name: &str) -> Result<Endpoint, Error> {
    Endpoint::resolve(
        "repos/{owner}/{name}/subscription",
        &[("owner", Some(owner)), ("name", Some(name))],
    )
}

pub(crate) fn current_user_starred_path() -> Result<Endpoint, Error> {
    Endpoint::resolve("user/starred", &[])
}

pub(crate) fn user_starred_path(login: &str) -> Result<Endpoint, Error> {
    Endpoint::resolve("users/{login}/starred", &[("login", Some(login))])
}

pub(crate) fn repo_stargazers_path(owner: &str, name: &str) -> Result<Endpoint, Error> {
    Endpoint::resolve(
        "repos/{owner}/{name}/stargazers",
        &[("owner", Some(owner)), ("name", Some(name))],
    )
}

pub(crate) fn current_user_starred_repo_path(owner: &str, name: &str) -> Result<Endpoint, Error> {
    Endpoint::resolve(
        "user/starred/{owner}/{name}",
        &[("owner", Some(owner)), ("name", Some(name))],
    )
}
