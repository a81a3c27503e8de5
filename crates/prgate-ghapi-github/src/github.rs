//! GitHub API service.

use async_trait::async_trait;
use futures::{pin_mut, TryStreamExt};
use prgate_config::Config;
use prgate_ghapi_interface::{
    comments::CommentSplitter,
    types::{
        GhCommitStatusState, GhMergeResult, GhMergeStrategy, GhPullFile, GhPullRequest,
        GhRepository, GhReview, GhReviewState,
    },
    ApiError, ApiService, Result,
};
use prgate_models::{CommitStatus, MergeMethod};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::{
    api_root::ConnectionSettings,
    auth::{credentials_from_config, Credentials},
    errors::GitHubError,
    pagination::{next_page_from_headers, paginate, Page, PAGE_SIZE},
    transport::Transport,
};

const MAX_STATUS_DESCRIPTION_LEN: usize = 139;

/// Commit message of merges performed by the bot.
pub const AUTOMERGE_COMMIT_MESSAGE: &str =
    "[prgate] Automatically merging after successful checks";

/// GitHub API service implementation.
#[derive(Clone)]
pub struct GitHubApiService {
    transport: Transport,
}

impl GitHubApiService {
    /// Creates a service from an authenticated transport.
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Authenticate with credentials and create a service.
    pub async fn connect(
        settings: &ConnectionSettings,
        credentials: &dyn Credentials,
    ) -> Result<Self> {
        Ok(Self::new(credentials.derive_transport(settings).await?))
    }

    /// Create a service from configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let settings = ConnectionSettings::from_config(config)?;
        let credentials = credentials_from_config(config)?;

        Self::connect(&settings, credentials.as_ref()).await
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Get repository details.
    #[tracing::instrument(skip(self), ret)]
    pub async fn repositories_get(&self, owner: &str, name: &str) -> Result<GhRepository> {
        Ok(self
            .get_json(&format!("/repos/{owner}/{name}"))
            .await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GitHubError> {
        let request = self.transport.request(Method::GET, path).await?;
        Ok(self.transport.send(request).await?.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, GitHubError> {
        let request = self.transport.request(method, path).await?.json(body);
        self.transport.send(request).await
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
    ) -> Result<Page<T>, GitHubError> {
        let request = self
            .transport
            .request(Method::GET, path)
            .await?
            .query(&[("per_page", PAGE_SIZE), ("page", page)]);
        let response = self.transport.send(request).await?;
        let next_page = next_page_from_headers(response.headers());

        Ok(Page {
            items: response.json().await?,
            next_page,
        })
    }
}

#[async_trait]
impl ApiService for GitHubApiService {
    #[tracing::instrument(skip(self), ret)]
    async fn pulls_get(&self, owner: &str, name: &str, pr_number: u64) -> Result<GhPullRequest> {
        Ok(self
            .get_json(&format!("/repos/{owner}/{name}/pulls/{pr_number}"))
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_files_list(
        &self,
        owner: &str,
        name: &str,
        pr_number: u64,
    ) -> Result<Vec<String>> {
        let path = format!("/repos/{owner}/{name}/pulls/{pr_number}/files");
        let path = path.as_str();
        let pages = paginate(move |page| self.fetch_page::<GhPullFile>(path, page));
        pin_mut!(pages);

        let mut files = Vec::new();
        loop {
            match pages.try_next().await {
                Ok(Some(page)) => {
                    files.extend(
                        page.iter()
                            .flat_map(GhPullFile::touched_paths)
                            .map(str::to_string),
                    );
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(
                        collected = files.len(),
                        error = %e,
                        message = "Pull request file listing interrupted"
                    );
                    return Err(ApiError::PartialListing {
                        collected: files,
                        source: Box::new(e.into()),
                    });
                }
            }
        }

        debug!(count = files.len(), message = "Listed pull request files");
        Ok(files)
    }

    #[tracing::instrument(skip(self), ret)]
    async fn pull_is_approved(&self, owner: &str, name: &str, pr_number: u64) -> Result<bool> {
        let path = format!("/repos/{owner}/{name}/pulls/{pr_number}/reviews");
        let path = path.as_str();
        let pages = paginate(move |page| self.fetch_page::<GhReview>(path, page));
        pin_mut!(pages);

        while let Some(reviews) = pages.try_next().await.map_err(ApiError::from)? {
            if reviews.iter().any(|r| r.state == GhReviewState::Approved) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    #[tracing::instrument(skip(self), ret)]
    async fn pull_is_mergeable(&self, owner: &str, name: &str, pr_number: u64) -> Result<bool> {
        let pull = self.pulls_get(owner, name, pr_number).await?;
        Ok(pull.mergeable_state.is_merge_clickable())
    }

    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    async fn comments_post(
        &self,
        owner: &str,
        name: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            body: &'a str,
        }

        let path = format!("/repos/{owner}/{name}/issues/{issue_number}/comments");
        let segments = CommentSplitter::default().split(body);
        if segments.len() > 1 {
            debug!(segments = segments.len(), message = "Splitting long comment");
        }

        for segment in &segments {
            self.send_json(Method::POST, &path, &Request { body: segment })
                .await?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn commit_statuses_update(
        &self,
        owner: &str,
        name: &str,
        git_ref: &str,
        status: CommitStatus,
        context: &str,
        description: &str,
        target_url: &str,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            state: &'a str,
            description: String,
            context: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            target_url: Option<&'a str>,
        }

        if git_ref.trim().is_empty() {
            return Err(ApiError::ConfigError {
                message: "commit status requires a commit identifier".into(),
            });
        }

        self.send_json(
            Method::POST,
            &format!("/repos/{owner}/{name}/statuses/{git_ref}"),
            &Request {
                state: GhCommitStatusState::from(status).to_str(),
                description: description
                    .chars()
                    .take(MAX_STATUS_DESCRIPTION_LEN)
                    .collect(),
                context,
                target_url: Some(target_url).filter(|url| !url.is_empty()),
            },
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn pulls_merge(&self, owner: &str, name: &str, pr_number: u64) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            commit_message: &'a str,
            merge_method: GhMergeStrategy,
        }

        let repository = self.repositories_get(owner, name).await?;
        let method = MergeMethod::select(repository.merge_method_flags());
        debug!(merge_method = %method, message = "Selected merge method");

        let result: GhMergeResult = self
            .send_json(
                Method::PUT,
                &format!("/repos/{owner}/{name}/pulls/{pr_number}/merge"),
                &Request {
                    commit_message: AUTOMERGE_COMMIT_MESSAGE,
                    merge_method: method.into(),
                },
            )
            .await?
            .json()
            .await
            .map_err(GitHubError::from)?;

        if !result.merged {
            return Err(GitHubError::MergeError {
                pr_number,
                repository_path: format!("{owner}/{name}"),
                message: result.message,
            }
            .into());
        }

        info!(sha = ?result.sha, message = "Pull request merged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path, query_param},
        Mock, MockServer, Request, ResponseTemplate,
    };

    use super::*;
    use crate::testutils::{
        basic_service, mock_installation_token, test_private_key, MockServerExt, TEST_APP_ID,
    };

    const FILES_PATH: &str = "/repos/owner/name/pulls/1/files";
    const REVIEWS_PATH: &str = "/repos/owner/name/pulls/1/reviews";

    fn next_link(server: &MockServer, list_path: &str, page: u32) -> String {
        format!(
            r#"<{}{list_path}?per_page=300&page={page}>; rel="next""#,
            server.uri()
        )
    }

    fn files(prefix: &str, count: usize) -> serde_json::Value {
        (0..count)
            .map(|i| json!({"filename": format!("{prefix}/{i}.tf"), "status": "modified"}))
            .collect()
    }

    async fn mount_page(
        server: &MockServer,
        list_path: &str,
        page: u32,
        body: serde_json::Value,
        next_page: Option<u32>,
    ) {
        let mut response = ResponseTemplate::new(200).set_body_json(body);
        if let Some(next_page) = next_page {
            response = response.insert_header("Link", next_link(server, list_path, next_page).as_str());
        }

        Mock::given(method("GET"))
            .and(path(list_path))
            .and(query_param("page", page.to_string()))
            .and(query_param("per_page", "300"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }

    fn pull_request(mergeable_state: &str) -> serde_json::Value {
        json!({
            "number": 1,
            "state": "open",
            "title": "Add network module",
            "user": {"login": "me"},
            "head": {"ref": "feature", "sha": "abcdef"},
            "base": {"ref": "main", "sha": "123456"},
            "mergeable_state": mergeable_state
        })
    }

    fn repository(merge: bool, rebase: bool, squash: bool) -> serde_json::Value {
        json!({
            "name": "name",
            "full_name": "owner/name",
            "owner": {"login": "owner"},
            "allow_merge_commit": merge,
            "allow_rebase_merge": rebase,
            "allow_squash_merge": squash
        })
    }

    #[tokio::test]
    async fn test_pull_files_list_walks_pages() {
        let server = MockServer::start().await;
        mount_page(&server, FILES_PATH, 1, files("a", 300), Some(2)).await;
        mount_page(&server, FILES_PATH, 2, files("b", 300), Some(3)).await;
        mount_page(&server, FILES_PATH, 3, files("c", 40), None).await;

        let result = basic_service(&server)
            .pull_files_list("owner", "name", 1)
            .await
            .unwrap();

        assert_eq!(result.len(), 640);
        assert_eq!(result[0], "a/0.tf");
        assert_eq!(result[300], "b/0.tf");
        assert_eq!(result[639], "c/39.tf");
    }

    #[tokio::test]
    async fn test_pull_files_list_includes_renamed_sources() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            FILES_PATH,
            1,
            json!([
                {"filename": "new/main.tf", "status": "renamed", "previous_filename": "old/main.tf"},
                {"filename": "README.md", "status": "added"}
            ]),
            None,
        )
        .await;

        let result = basic_service(&server)
            .pull_files_list("owner", "name", 1)
            .await
            .unwrap();

        assert_eq!(result, vec!["new/main.tf", "old/main.tf", "README.md"]);
    }

    #[tokio::test]
    async fn test_pull_files_list_keeps_partial_result() {
        let server = MockServer::start().await;
        mount_page(&server, FILES_PATH, 1, files("a", 2), Some(2)).await;
        Mock::given(method("GET"))
            .and(path(FILES_PATH))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let error = basic_service(&server)
            .pull_files_list("owner", "name", 1)
            .await
            .unwrap_err();

        assert_eq!(
            error.partial_result(),
            Some(&["a/0.tf".to_string(), "a/1.tf".to_string()][..])
        );
        match error {
            ApiError::PartialListing { source, .. } => {
                assert!(matches!(*source, ApiError::RequestError { .. }))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pull_is_approved_short_circuits() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            REVIEWS_PATH,
            1,
            json!([{"state": "COMMENTED"}, {"user": {"login": "me"}, "state": "APPROVED"}]),
            Some(2),
        )
        .await;
        Mock::given(method("GET"))
            .and(path(REVIEWS_PATH))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        assert!(basic_service(&server)
            .pull_is_approved("owner", "name", 1)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_pull_is_approved_on_later_page() {
        let server = MockServer::start().await;
        mount_page(&server, REVIEWS_PATH, 1, json!([{"state": "CHANGES_REQUESTED"}]), Some(2)).await;
        mount_page(&server, REVIEWS_PATH, 2, json!([{"state": "APPROVED"}]), None).await;

        assert!(basic_service(&server)
            .pull_is_approved("owner", "name", 1)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_pull_is_not_approved() {
        let server = MockServer::start().await;
        mount_page(&server, REVIEWS_PATH, 1, json!([{"state": "COMMENTED"}]), Some(2)).await;
        mount_page(&server, REVIEWS_PATH, 2, json!([{"state": "DISMISSED"}, {"state": "SOMETHING_NEW"}]), None).await;

        assert!(!basic_service(&server)
            .pull_is_approved("owner", "name", 1)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_pull_is_mergeable() {
        for (state, expected) in [
            ("clean", true),
            ("unstable", true),
            ("has_hooks", true),
            ("dirty", false),
            ("blocked", false),
            ("behind", false),
            ("unknown", false),
            ("something_new", false),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/repos/owner/name/pulls/1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(pull_request(state)))
                .mount(&server)
                .await;

            assert_eq!(
                basic_service(&server)
                    .pull_is_mergeable("owner", "name", 1)
                    .await
                    .unwrap(),
                expected,
                "state {state}"
            );
        }
    }

    #[tokio::test]
    async fn test_comments_post_single() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/owner/name/issues/1/comments"))
            .and(body_json(json!({"body": "Plan succeeded"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        basic_service(&server)
            .comments_post("owner", "name", 1, "Plan succeeded")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_comments_post_split() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/owner/name/issues/1/comments"))
            .respond_with(ResponseTemplate::new(201))
            .expect(2)
            .mount(&server)
            .await;

        let body: String = (0..5000).map(|i| format!("+ resource.item_{i:05}\n")).collect();
        basic_service(&server)
            .comments_post("owner", "name", 1, &body)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let segments: Vec<String> = requests
            .iter()
            .map(|r: &Request| {
                r.body_json::<serde_json::Value>().unwrap()["body"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(CommentSplitter::default().join(&segments), body);
    }

    #[tokio::test]
    async fn test_comments_post_stops_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/owner/name/issues/1/comments"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let body = "x\n".repeat(40_000);
        let result = basic_service(&server)
            .comments_post("owner", "name", 1, &body)
            .await;

        assert!(matches!(result, Err(ApiError::RequestError { .. })));
    }

    #[tokio::test]
    async fn test_commit_statuses_update() {
        let server = MockServer::start().await;
        let description = "d".repeat(200);
        Mock::given(method("POST"))
            .and(path("/repos/owner/name/statuses/abcdef"))
            .and(body_json(json!({
                "state": "failure",
                "description": "d".repeat(139),
                "context": "prgate/plan",
                "target_url": "https://ci.example.com/1"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        basic_service(&server)
            .commit_statuses_update(
                "owner",
                "name",
                "abcdef",
                CommitStatus::Failed,
                "prgate/plan",
                &description,
                "https://ci.example.com/1",
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_commit_statuses_update_requires_ref() {
        let server = MockServer::start().await;
        let result = basic_service(&server)
            .commit_statuses_update("owner", "name", " ", CommitStatus::Pending, "ctx", "", "")
            .await;

        assert!(matches!(result, Err(ApiError::ConfigError { .. })));
    }

    #[tokio::test]
    async fn test_pulls_merge_selects_method() {
        for (flags, expected) in [
            ((true, true, true), "merge"),
            ((false, true, true), "rebase"),
            ((false, false, true), "squash"),
            ((false, false, false), "merge"),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/repos/owner/name"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(repository(flags.0, flags.1, flags.2)),
                )
                .mount(&server)
                .await;
            Mock::given(method("PUT"))
                .and(path("/repos/owner/name/pulls/1/merge"))
                .and(body_json(json!({
                    "commit_message": AUTOMERGE_COMMIT_MESSAGE,
                    "merge_method": expected
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "sha": "abcdef",
                    "merged": true,
                    "message": "Pull Request successfully merged"
                })))
                .expect(1)
                .mount(&server)
                .await;

            basic_service(&server)
                .pulls_merge("owner", "name", 1)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_pulls_merge_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repository(true, false, false)))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/repos/owner/name/pulls/1/merge"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "merged": false,
                "message": "Head branch was modified"
            })))
            .mount(&server)
            .await;

        let error = basic_service(&server)
            .pulls_merge("owner", "name", 1)
            .await
            .unwrap_err();

        match error {
            ApiError::MergeRejected {
                pr_number,
                repository_path,
                message,
            } => {
                assert_eq!(pr_number, 1);
                assert_eq!(repository_path, "owner/name");
                assert_eq!(message, "Head branch was modified");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pulls_merge_refused_by_platform() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repository(true, false, false)))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/repos/owner/name/pulls/1/merge"))
            .respond_with(ResponseTemplate::new(405).set_body_string("Method not allowed"))
            .mount(&server)
            .await;

        let result = basic_service(&server).pulls_merge("owner", "name", 1).await;
        assert!(matches!(result, Err(ApiError::RequestError { .. })));
    }

    #[tokio::test]
    async fn test_installation_service_refreshes_after_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/app"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "77"})))
            .mount(&server)
            .await;
        mock_installation_token(&server, 77, "inst-token").await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/name/pulls/1"))
            .and(header("Authorization", "Bearer inst-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let credentials = crate::AppCredentials::new(
            TEST_APP_ID,
            crate::PrivateKeySource::Pem(test_private_key()),
        );
        let service = GitHubApiService::connect(&server.settings(), &credentials)
            .await
            .unwrap();

        for _ in 0..2 {
            assert!(service.pulls_get("owner", "name", 1).await.is_err());
        }

        let token_requests = server
            .received_requests()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.url.path() == "/app/installations/77/access_tokens")
            .count();
        assert_eq!(token_requests, 2);
    }

    #[tokio::test]
    async fn test_installation_token_renewal_failure_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/app"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "77"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/app/installations/77/access_tokens"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "token": "inst-token",
                "expires_at": "2099-01-01T00:00:00Z"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/app/installations/77/access_tokens"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/name/pulls/1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = crate::AppCredentials::new(
            TEST_APP_ID,
            crate::PrivateKeySource::Pem(test_private_key()),
        );
        let service = GitHubApiService::connect(&server.settings(), &credentials)
            .await
            .unwrap();

        assert!(matches!(
            service.pulls_get("owner", "name", 1).await,
            Err(ApiError::RequestError { .. })
        ));
        assert!(matches!(
            service.pulls_get("owner", "name", 1).await,
            Err(ApiError::AuthError { .. })
        ));
    }
}
