//! Polymorphic owner references.
//!
//! Metric values and newsflash events point at their owner with a tagged
//! reference: `{"kind": "user" | "team" | "generic", "href": ...}`. Generic
//! owners have no resource of their own and are addressed by a URN of the
//! form `urn:hoopla:generic:<token>`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HooplaError, Result};
use crate::models::{Team, User};
use crate::session::Session;
use crate::traits::{Reload, Resource};

/// URN prefix of generic owner references.
pub const GENERIC_URN_PREFIX: &str = "urn:hoopla:generic:";

/// Wire shape of a tagged reference.
#[derive(Debug, Serialize, Deserialize)]
struct TaggedReference {
    kind: String,
    href: String,
}

/// An encoded owner, as stored in a resource's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerRef {
    /// A user, by href.
    User(String),
    /// A team, by href.
    Team(String),
    /// An opaque external owner, by token.
    Generic(String),
}

impl OwnerRef {
    /// Generic owner for an external identifier.
    pub fn generic(token: impl Into<String>) -> Self {
        Self::Generic(token.into())
    }

    /// The `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Team(_) => "team",
            Self::Generic(_) => "generic",
        }
    }

    /// The `href`: a resource URL, or the generic URN.
    pub fn href(&self) -> String {
        match self {
            Self::User(href) | Self::Team(href) => href.clone(),
            Self::Generic(token) => format!("{GENERIC_URN_PREFIX}{token}"),
        }
    }

    /// Encode as `{"kind", "href"}`.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "kind": self.kind(),
            "href": self.href(),
        })
    }

    /// Decode a tagged reference.
    ///
    /// # Errors
    ///
    /// [`HooplaError::UnknownOwnerKind`] for a kind other than user, team or
    /// generic; [`HooplaError::MalformedReference`] when the value is not a
    /// `{kind, href}` object or a generic href is not a generic URN.
    pub fn from_value(value: &Value) -> Result<Self> {
        let tagged = TaggedReference::deserialize(value)
            .map_err(|e| HooplaError::MalformedReference(format!("{value}: {e}")))?;

        match tagged.kind.as_str() {
            "user" => Ok(Self::User(tagged.href)),
            "team" => Ok(Self::Team(tagged.href)),
            "generic" => match tagged.href.strip_prefix(GENERIC_URN_PREFIX) {
                Some(token) => Ok(Self::generic(token)),
                None => Err(HooplaError::MalformedReference(tagged.href)),
            },
            _ => Err(HooplaError::UnknownOwnerKind(tagged.kind)),
        }
    }

    /// Turn the reference into a live owner.
    ///
    /// Users and teams are fetched from their href; generic owners need no
    /// request.
    pub async fn resolve(&self, session: &Arc<dyn Session>) -> Result<Owner> {
        match self {
            Self::User(href) => Ok(Owner::User(User::fetch(session.clone(), href).await?)),
            Self::Team(href) => Ok(Owner::Team(Team::fetch(session.clone(), href).await?)),
            Self::Generic(token) => Ok(Owner::Generic(token.clone())),
        }
    }
}

impl From<&str> for OwnerRef {
    fn from(token: &str) -> Self {
        Self::generic(token)
    }
}

impl From<String> for OwnerRef {
    fn from(token: String) -> Self {
        Self::Generic(token)
    }
}

impl TryFrom<&User> for OwnerRef {
    type Error = HooplaError;

    fn try_from(user: &User) -> Result<Self> {
        Ok(Self::User(user.require_href("reference")?.to_string()))
    }
}

impl TryFrom<&Team> for OwnerRef {
    type Error = HooplaError;

    fn try_from(team: &Team) -> Result<Self> {
        Ok(Self::Team(team.require_href("reference")?.to_string()))
    }
}

/// A resolved owner.
#[derive(Debug, Clone)]
pub enum Owner {
    User(User),
    Team(Team),
    /// Token of a generic owner.
    Generic(String),
}

impl Owner {
    /// Encode the owner back into a reference.
    pub fn to_ref(&self) -> Result<OwnerRef> {
        match self {
            Self::User(user) => OwnerRef::try_from(user),
            Self::Team(team) => OwnerRef::try_from(team),
            Self::Generic(token) => Ok(OwnerRef::generic(token.as_str())),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(user) => write!(f, "{}", user.display_name()),
            Self::Team(team) => write!(f, "{}", team.name().unwrap_or("<unnamed team>")),
            Self::Generic(token) => write!(f, "{token} <generic>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSession;
    use serde_json::json;

    #[test]
    fn test_generic_encoding() {
        let owner = OwnerRef::from("system-42");
        assert_eq!(
            owner.to_value(),
            json!({"kind": "generic", "href": "urn:hoopla:generic:system-42"})
        );
    }

    #[test]
    fn test_generic_decoding() {
        let owner =
            OwnerRef::from_value(&json!({"kind": "generic", "href": "urn:hoopla:generic:X"}))
                .unwrap();
        assert_eq!(owner, OwnerRef::generic("X"));
    }

    #[test]
    fn test_user_and_team_encoding() {
        let session = FakeSession::shared();
        let user = User::stub(session.clone(), "https://api.example/users/1");
        let team = Team::stub(session, "https://api.example/teams/2");

        let user_ref = OwnerRef::try_from(&user).unwrap();
        let team_ref = OwnerRef::try_from(&team).unwrap();

        assert_eq!(
            user_ref.to_value(),
            json!({"kind": "user", "href": "https://api.example/users/1"})
        );
        assert_eq!(OwnerRef::from_value(&team_ref.to_value()).unwrap(), team_ref);
    }

    #[test]
    fn test_transient_user_cannot_be_referenced() {
        let user = User::with_creation_url(FakeSession::shared(), "https://api.example/users");
        assert!(matches!(
            OwnerRef::try_from(&user),
            Err(HooplaError::MissingHref { kind: "user", .. })
        ));
    }

    #[test]
    fn test_unknown_kind_is_error() {
        let err = OwnerRef::from_value(&json!({"kind": "robot", "href": "x"})).unwrap_err();
        assert!(matches!(err, HooplaError::UnknownOwnerKind(kind) if kind == "robot"));
    }

    #[test]
    fn test_malformed_references() {
        assert!(matches!(
            OwnerRef::from_value(&json!("just a string")),
            Err(HooplaError::MalformedReference(_))
        ));
        assert!(matches!(
            OwnerRef::from_value(&json!({"kind": "generic", "href": "urn:other:X"})),
            Err(HooplaError::MalformedReference(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_generic_makes_no_request() {
        let fake = FakeSession::new();
        let session: Arc<dyn Session> = fake.clone();

        let owner = OwnerRef::generic("X").resolve(&session).await.unwrap();

        assert_eq!(owner.to_string(), "X <generic>");
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_user_fetches_href() {
        let fake = FakeSession::new();
        fake.respond(
            200,
            json!({"href": "https://api.example/users/1", "first_name": "Ada", "last_name": "Lovelace"}),
        );
        let session: Arc<dyn Session> = fake.clone();

        let owner = OwnerRef::User("https://api.example/users/1".to_string())
            .resolve(&session)
            .await
            .unwrap();

        match &owner {
            Owner::User(user) => assert_eq!(user.href(), Some("https://api.example/users/1")),
            other => panic!("expected user, got {other:?}"),
        }
        assert_eq!(owner.to_string(), "Ada Lovelace");
        assert_eq!(fake.requests()[0].url, "https://api.example/users/1");
    }
}
