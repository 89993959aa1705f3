use std::collections::BTreeMap;

use const_format::concatcp;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{ReassignError, Result};
use crate::responses::{ErrorBody, SearchPage};
use crate::types::{Issue, RepoName};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const ACCEPT_VALUE: &str = "application/vnd.github.v3+json";
const USER_AGENT_VALUE: &str = concatcp!("gh-reassign/", env!("CARGO_PKG_VERSION"));
const SEARCH_PAGE_SIZE: u32 = 100;

pub struct GitHubClient {
    http: Client,
    token: String,
    api_base: String,
}

impl GitHubClient {
    /// `api_base` is usually [`DEFAULT_API_BASE`]; GitHub Enterprise
    /// installations point it elsewhere.
    pub fn new(token: String, api_base: String) -> Self {
        Self {
            http: Client::new(),
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn issue_url(&self, repo: &RepoName, number: u64) -> String {
        format!("{}/repos/{repo}/issues/{number}", self.api_base)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.api_base))
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, ACCEPT_VALUE)
            .header(USER_AGENT, USER_AGENT_VALUE)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Repositories with at least one open issue or PR assigned to `user`,
    /// with the number of matching items per repository.
    ///
    /// Walks the search endpoint page by page; pagination ends at the first
    /// empty or undecodable page, or when the response carries no
    /// `rel="next"` link. Any non-success status aborts the whole walk.
    pub async fn repos_with_open_assignments(
        &self,
        user: &str,
    ) -> Result<BTreeMap<RepoName, usize>> {
        let mut repos = BTreeMap::new();
        let mut page = 1u32;

        loop {
            let path = format!(
                "/search/issues?q=assignee:{user}+is:open&page={page}&per_page={SEARCH_PAGE_SIZE}"
            );
            let response = self.request(Method::GET, &path).send().await?;

            if !response.status().is_success() {
                return Err(api_error(response).await);
            }

            let has_next = has_next_page(&response);

            // A body that fails to decode ends pagination rather than failing
            // the run.
            let results: SearchPage = match response.json().await {
                Ok(body) => body,
                Err(_) => break,
            };

            if results.items.is_empty() {
                break;
            }

            for item in results.items {
                if let Some(repo) = RepoName::from_api_url(&item.repository_url) {
                    *repos.entry(repo).or_insert(0) += 1;
                }
            }

            if !has_next {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }

    /// Open issues and PRs in `repo` currently assigned to `assignee`.
    pub async fn open_issues_assigned(
        &self,
        repo: &RepoName,
        assignee: &str,
    ) -> Result<Vec<Issue>> {
        self.get_json(&format!("/repos/{repo}/issues?assignee={assignee}&state=open"))
            .await
    }

    /// Replace the assignee list on an issue or PR.
    pub async fn set_assignees(
        &self,
        repo: &RepoName,
        number: u64,
        assignees: &[&str],
    ) -> Result<()> {
        let response = self
            .request(Method::PATCH, &format!("/repos/{repo}/issues/{number}"))
            .json(&json!({ "assignees": assignees }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    /// Whether `user` has collaborator access on `repo`. GitHub answers the
    /// probe with 204; any other status, including errors, counts as "not a
    /// collaborator".
    pub async fn is_collaborator(&self, repo: &RepoName, user: &str) -> Result<bool> {
        let response = self
            .request(Method::GET, &format!("/repos/{repo}/collaborators/{user}"))
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    /// Send `user` a write-permission invitation for `repo`. Returns whether
    /// the invitation was created.
    #[cfg(feature = "auto-invite")]
    pub async fn invite_collaborator(&self, repo: &RepoName, user: &str) -> Result<bool> {
        let response = self
            .request(Method::PUT, &format!("/repos/{repo}/collaborators/{user}"))
            .json(&json!({ "permission": "write" }))
            .send()
            .await?;

        Ok(response.status() == reqwest::StatusCode::CREATED)
    }
}

fn has_next_page(response: &Response) -> bool {
    response
        .headers()
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .map(link_has_next)
        .unwrap_or(false)
}

/// `Link: <url>; rel="next", <url>; rel="last"`: true when any entry carries
/// `rel="next"`.
fn link_has_next(link: &str) -> bool {
    link.split(',')
        .any(|entry| entry.split(';').skip(1).any(|param| param.trim() == r#"rel="next""#))
}

async fn api_error(response: Response) -> ReassignError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => "<no error message>".to_string(),
    };

    ReassignError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn search_item(repo: &str) -> serde_json::Value {
        json!({ "repository_url": format!("https://api.github.com/repos/{repo}") })
    }

    fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::new("t-123".to_string(), server.uri())
    }

    #[test]
    fn test_link_has_next() {
        assert!(link_has_next(
            r#"<https://api.github.com/search/issues?page=2>; rel="next", <https://api.github.com/search/issues?page=4>; rel="last""#
        ));
        assert!(!link_has_next(
            r#"<https://api.github.com/search/issues?page=1>; rel="prev""#
        ));
        assert!(!link_has_next(""));
    }

    #[tokio::test]
    async fn test_discovery_paginates_and_dedupes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("page", "1"))
            .and(header("authorization", "token t-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(
                        "link",
                        r#"<https://api.github.com/search/issues?page=2>; rel="next""#,
                    )
                    .set_body_json(json!({
                        "items": [search_item("a/b"), search_item("a/c"), search_item("a/b")]
                    })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_item("z/y"), search_item("a/c")]
            })))
            .mount(&server)
            .await;

        let repos = client_for(&server)
            .repos_with_open_assignments("alice")
            .await
            .unwrap();

        let names: Vec<String> = repos.keys().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["a/b", "a/c", "z/y"]);
        assert_eq!(repos.values().copied().collect::<Vec<_>>(), vec![2, 2, 1]);
    }

    #[tokio::test]
    async fn test_discovery_stops_without_next_link() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [search_item("a/b")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repos = client_for(&server)
            .repos_with_open_assignments("alice")
            .await
            .unwrap();

        assert_eq!(repos.len(), 1);
    }

    #[tokio::test]
    async fn test_discovery_empty_first_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let repos = client_for(&server)
            .repos_with_open_assignments("alice")
            .await
            .unwrap();

        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_http_failure_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "rate limited" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .repos_with_open_assignments("alice")
            .await
            .unwrap_err();

        match err {
            ReassignError::Api { status, message } => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_collaborator_probe() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/a/b/collaborators/bob"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/a/c/collaborators/bob"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let repo_b: RepoName = "a/b".parse().unwrap();
        let repo_c: RepoName = "a/c".parse().unwrap();

        assert!(client.is_collaborator(&repo_b, "bob").await.unwrap());
        assert!(!client.is_collaborator(&repo_c, "bob").await.unwrap());
    }
}
