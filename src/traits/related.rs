//! Related trait for following collection links.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{HooplaError, Result};
use crate::resource::LocalAttrs;
use crate::traits::Resource;

/// Fetch the collection behind one of a resource's link relations.
///
/// Every listing and lookup in the crate goes through this one call;
/// filtering is expressed only through query parameters.
///
/// # Example
///
/// ```ignore
/// use hoopla::{Related, User};
///
/// let users: Vec<User> = root
///     .fetch_related("list_users", &[("email", "ada@example.com")], Default::default())
///     .await?;
/// ```
#[async_trait]
pub trait Related: Resource {
    /// GET the URL behind `relation` and build one `K` per array element,
    /// each carrying a copy of `local`.
    ///
    /// # Errors
    ///
    /// [`HooplaError::MissingRelation`] before any request when the relation
    /// is unknown; [`HooplaError::UnexpectedBody`] when the response is not
    /// an array of objects; otherwise any transport or HTTP error.
    async fn fetch_related<K: Resource>(
        &self,
        relation: &str,
        params: &[(&str, &str)],
        local: LocalAttrs,
    ) -> Result<Vec<K>>;
}

#[async_trait]
impl<T: Resource> Related for T {
    async fn fetch_related<K: Resource>(
        &self,
        relation: &str,
        params: &[(&str, &str)],
        local: LocalAttrs,
    ) -> Result<Vec<K>> {
        let url = self.relation(relation)?.to_string();

        let response = self.session().get(&url, params).await?.error_for_status()?;
        let body: Value = response.json()?;

        let Value::Array(items) = body else {
            return Err(HooplaError::UnexpectedBody {
                url: response.url,
                expected: "a JSON array",
            });
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::Object(payload) => Ok(K::from_payload_with_local(
                    self.session().clone(),
                    payload,
                    local.clone(),
                )),
                _ => Err(HooplaError::UnexpectedBody {
                    url: response.url.clone(),
                    expected: "an array of JSON objects",
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSession;
    use crate::{Connection, Resource, User};
    use serde_json::json;

    fn root(fake: std::sync::Arc<FakeSession>) -> Connection {
        Connection::from_payload(
            fake,
            json!({
                "href": "https://api.example/",
                "links": [{"rel": "list_users", "href": "https://api.example/users"}]
            })
            .as_object()
            .unwrap()
            .clone(),
        )
    }

    #[tokio::test]
    async fn test_fetch_related_builds_each_element() {
        let fake = FakeSession::new();
        fake.respond(
            200,
            json!([
                {"href": "https://api.example/users/1", "email": "a@example.com"},
                {"href": "https://api.example/users/2", "email": "b@example.com"}
            ]),
        );

        let mut local = LocalAttrs::new();
        local.insert("team_name".to_string(), json!("Sales"));

        let users: Vec<User> = root(fake.clone())
            .fetch_related("list_users", &[("email", "a@example.com")], local)
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].email(), Some("b@example.com"));
        assert_eq!(users[0].get("team_name").unwrap(), Some(&json!("Sales")));

        let requests = fake.requests();
        assert_eq!(requests[0].url, "https://api.example/users");
        assert_eq!(
            requests[0].params,
            vec![("email".to_string(), "a@example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_relation_makes_no_request() {
        let fake = FakeSession::new();

        let result = root(fake.clone())
            .fetch_related::<User>("list_teams", &[], LocalAttrs::new())
            .await;

        assert!(matches!(
            result,
            Err(HooplaError::MissingRelation { relation, .. }) if relation == "list_teams"
        ));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_non_array_body_is_rejected() {
        let fake = FakeSession::new();
        fake.respond(200, json!({"users": []}));

        let result = root(fake)
            .fetch_related::<User>("list_users", &[], LocalAttrs::new())
            .await;

        assert!(matches!(result, Err(HooplaError::UnexpectedBody { .. })));
    }
}
