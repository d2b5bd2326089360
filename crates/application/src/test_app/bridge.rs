//! Request/response bridge: turns test requests into wire requests and
//! wire responses back into test responses.

use livetest_domain::{HttpMethod, RequestBody, StatusExpectation, TestRequest, TestResponse};
use tracing::{debug, warn};

use super::{RequestOptions, TestApp};
use crate::ApplicationResult;
use crate::ports::{Connection, Connector, WireRequest};

impl<C: Connector> TestApp<C> {
    /// Builds a request for `url` and runs it through [`TestApp::do_request`].
    ///
    /// For GET-like methods `options.params` are appended to the query
    /// string. For other methods they become a url-encoded form body when
    /// `body` is empty.
    ///
    /// # Errors
    ///
    /// Fails on an invalid URL, connection errors, malformed cookies, or an
    /// unexpected status.
    pub async fn request_with(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> ApplicationResult<TestResponse> {
        let RequestOptions {
            headers,
            params,
            status,
            expect_errors,
        } = options;

        let mut request = TestRequest::new(method, self.resolve_url(url)?);
        let mut body = body;
        if method.params_in_query() {
            request = request.with_query(&params);
        } else if body.is_empty() && !params.is_empty() {
            body = RequestBody::form(&params)?;
        }
        request.headers.merge(&headers);
        let request = request.with_body(body);

        self.do_request(request, &status, expect_errors).await
    }

    /// Sends `request` over the live connection for its scheme.
    ///
    /// The jar's cookies replace any `Cookie` header on the request. Every
    /// `Set-Cookie` in the response updates the jar before the status is
    /// checked, so a rejected response still changes the session. Unless
    /// `expect_errors` is set, a status outside `status` fails the call.
    ///
    /// # Errors
    ///
    /// Returns [`livetest_domain::DomainError::CookieParse`] for a
    /// malformed `Set-Cookie` header,
    /// [`livetest_domain::DomainError::UnexpectedStatus`] for a rejected
    /// status, and connection errors as they happen.
    pub async fn do_request(
        &mut self,
        mut request: TestRequest,
        status: &StatusExpectation,
        expect_errors: bool,
    ) -> ApplicationResult<TestResponse> {
        if let Some(cookie_header) = self.cookies.cookie_header() {
            request.headers.set("Cookie", cookie_header);
        }

        let mut response = self.send(request).await?;
        response.cookies_set = self.cookies.process_set_cookies(&response.headers)?;
        debug!(
            status = response.status_code,
            cookies_set = response.cookies_set.len(),
            "received response"
        );

        if !expect_errors {
            response.check(status)?;
        }
        Ok(response)
    }

    async fn send(&mut self, request: TestRequest) -> ApplicationResult<TestResponse> {
        let mut headers = self.extra_headers.clone();
        headers.merge(&request.headers);
        if headers.remove("host") {
            warn!(url = %request.url, "dropping caller-supplied Host header");
        }

        let wire = WireRequest {
            method: request.method,
            target: request.path_qs(),
            headers,
            body: request.body.clone(),
        };
        debug!(method = %wire.method, url = %request.url, "sending request");

        let reply = self.connection(request.scheme())?.send(wire).await?;
        Ok(TestResponse::new(
            request,
            reply.status,
            reply.reason,
            reply.headers,
            reply.body,
        ))
    }
}
