//! Following links and redirects from a response.

use livetest_domain::{DomainError, NavigationMethod, RequestBody, TestResponse};
use url::Url;

use super::{RequestOptions, TestApp};
use crate::ApplicationResult;
use crate::ports::Connector;

/// Redirect hops [`TestApp::maybe_follow`] takes before giving up.
pub const MAX_REDIRECTS: usize = 100;

impl<C: Connector> TestApp<C> {
    /// Follows the `Location` of a redirect response with a GET.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotRedirect`] or
    /// [`DomainError::MissingLocation`] when there is nothing to follow, and
    /// any error of the new request.
    pub async fn follow(&mut self, response: &TestResponse) -> ApplicationResult<TestResponse> {
        self.follow_with(response, RequestOptions::default()).await
    }

    /// Follows a redirect response with options for the new request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::follow`].
    pub async fn follow_with(
        &mut self,
        response: &TestResponse,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        let target = response.follow_target()?;
        self.dispatch(NavigationMethod::Get, &target, options).await
    }

    /// Follows redirects until a non-redirect response arrives.
    ///
    /// A redirect without `Location` is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TooManyRedirects`] after
    /// [`MAX_REDIRECTS`] hops, and any error of the followed requests.
    pub async fn maybe_follow(&mut self, response: TestResponse) -> ApplicationResult<TestResponse> {
        let mut response = response;
        let mut hops = 0;
        while response.is_redirect() && response.location().is_some() {
            if hops == MAX_REDIRECTS {
                return Err(DomainError::TooManyRedirects { max: MAX_REDIRECTS }.into());
            }
            response = self.follow(&response).await?;
            hops += 1;
        }
        Ok(response)
    }

    /// Goes to `href` as seen from the page of `response`.
    ///
    /// The target keeps the page's scheme and host unless `href` names its
    /// own, and loses any fragment. `method` must be `get` or `post`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRedirectMethod`] for other methods,
    /// and any error of the new request.
    pub async fn goto(
        &mut self,
        response: &TestResponse,
        href: &str,
        method: &str,
    ) -> ApplicationResult<TestResponse> {
        self.goto_with(response, href, method, RequestOptions::default())
            .await
    }

    /// Goes to `href` with options for the new request.
    ///
    /// # Errors
    ///
    /// See [`TestApp::goto`].
    pub async fn goto_with(
        &mut self,
        response: &TestResponse,
        href: &str,
        method: &str,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        let target = response.goto_target(href)?;
        let method: NavigationMethod = method.parse()?;
        self.dispatch(method, &target, options).await
    }

    async fn dispatch(
        &mut self,
        method: NavigationMethod,
        target: &Url,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        self.request_with(
            method.http_method(),
            target.as_str(),
            RequestBody::none(),
            options,
        )
        .await
    }
}
