//! GitHub REST implementation of [`TeamClient`].
//!
//! Listing endpoints are paginated with `per_page=100`; the loop stops on
//! the first short page. `is_org_member` maps the endpoint's status-code
//! protocol (204 member / 404 not a member) onto a boolean.

use async_trait::async_trait;
use reqwest::{header, Response, StatusCode, Url};
use serde::Deserialize;

use roster_core::types::{OrgSlug, TeamSlug, Username};

use crate::client::TeamClient;
use crate::error::GithubError;

const GITHUB_API_BASE: &str = "https://api.github.com";
const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// Authenticated GitHub REST client.
pub struct GithubRestClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct Member {
    login: String,
}

impl GithubRestClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: Url::parse(GITHUB_API_BASE).expect("GitHub API base URL is valid"),
            token: token.into(),
        }
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL has a path")
            .extend(segments);
        url
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::USER_AGENT, USER_AGENT)
    }

    async fn check(&self, resp: Response) -> Result<Response, GithubError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(GithubError::Http {
            status: status.as_u16(),
            message,
        })
    }

    /// Collect every page of a member-listing endpoint.
    async fn paginate_members(&self, url: Url) -> Result<Vec<Username>, GithubError> {
        let mut members = Vec::new();
        let mut page = 1usize;
        loop {
            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let resp = self.request(reqwest::Method::GET, page_url).send().await?;
            let resp = self.check(resp).await?;
            let batch: Vec<Member> = resp.json().await?;
            let batch_len = batch.len();
            members.extend(batch.into_iter().map(|m| Username::new(m.login)));

            if batch_len < PER_PAGE {
                return Ok(members);
            }
            page += 1;
        }
    }
}

#[async_trait]
impl TeamClient for GithubRestClient {
    async fn list_org_members(&self, org: &OrgSlug) -> Result<Vec<Username>, GithubError> {
        self.paginate_members(self.url(&["orgs", &org.0, "members"]))
            .await
    }

    async fn list_team_members(
        &self,
        org: &OrgSlug,
        team: &TeamSlug,
    ) -> Result<Vec<Username>, GithubError> {
        self.paginate_members(self.url(&["orgs", &org.0, "teams", &team.0, "members"]))
            .await
    }

    async fn is_org_member(
        &self,
        org: &OrgSlug,
        username: &Username,
    ) -> Result<bool, GithubError> {
        let url = self.url(&["orgs", &org.0, "members", username.as_str()]);
        let resp = self.request(reqwest::Method::GET, url).send().await?;
        match resp.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => {
                let message = resp.text().await.unwrap_or_default();
                Err(GithubError::Http {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn add_to_team(
        &self,
        org: &OrgSlug,
        team: &TeamSlug,
        username: &Username,
    ) -> Result<(), GithubError> {
        let url = self.url(&[
            "orgs",
            &org.0,
            "teams",
            &team.0,
            "memberships",
            username.as_str(),
        ]);
        tracing::debug!(%org, %team, user = %username, "adding user to team");
        let resp = self.request(reqwest::Method::PUT, url).send().await?;
        self.check(resp).await?;
        Ok(())
    }

    async fn remove_from_team(
        &self,
        org: &OrgSlug,
        team: &TeamSlug,
        username: &Username,
    ) -> Result<(), GithubError> {
        let url = self.url(&[
            "orgs",
            &org.0,
            "teams",
            &team.0,
            "memberships",
            username.as_str(),
        ]);
        tracing::debug!(%org, %team, user = %username, "removing user from team");
        let resp = self.request(reqwest::Method::DELETE, url).send().await?;
        self.check(resp).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
