use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;

use authn_sdk::{AuthNError, NEGOTIATE, NegotiateToken, SchemeMatch, SecurityRealm};
use sched_auth::is_unauthenticated_signal;
use sched_security::Subject;

/// Shared state for the Negotiate middleware.
#[derive(Clone)]
pub struct NegotiateState {
    pub realm: Arc<dyn SecurityRealm>,
    pub scheme_match: SchemeMatch,
}

/// SPNEGO (RFC 4559) authentication middleware.
///
/// For each request:
/// 1. No `Authorization` header: inserts an anonymous `Subject` and forwards. If the
///    handler answers with the `Unauthenticated` signal, responds 401 with a
///    `WWW-Authenticate: Negotiate` challenge instead.
/// 2. Header that is not a Negotiate credential: 400, handler not called.
/// 3. Credential rejected by the realm: 401 with challenge, handler not called.
/// 4. Credential accepted: inserts the realm's `Subject` and forwards.
pub async fn negotiate_middleware(
    axum::extract::State(state): axum::extract::State<NegotiateState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let parsed = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| NegotiateToken::parse_bytes(value.as_bytes(), state.scheme_match));

    let Some(parsed) = parsed else {
        // Unauthenticated callers are fine until a handler says otherwise.
        req.extensions_mut().insert(Subject::anonymous());
        let response = next.run(req).await;
        if is_unauthenticated_signal(&response) {
            tracing::debug!("Handler requires authentication; sending Negotiate challenge");
            return challenge();
        }
        return response;
    };

    tracing::debug!("Authorization header is present");
    let token = match parsed {
        Ok(token) => token,
        Err(err) => {
            tracing::info!("Malformed Authorization header: {err}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match state.realm.login(&token).await {
        Ok(result) => {
            tracing::debug!(
                principal = result.subject.principal().unwrap_or_default(),
                "Negotiate login succeeded"
            );
            req.extensions_mut().insert(result.subject);
            next.run(req).await
        }
        Err(err) => {
            log_login_error(&err);
            challenge()
        }
    }
}

/// 401 with `WWW-Authenticate: Negotiate` and an empty body.
#[must_use]
pub fn challenge() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, HeaderValue::from_static(NEGOTIATE))],
    )
        .into_response()
}

/// Log login failures at appropriate levels.
///
/// Cognitive complexity is inflated by tracing macro expansion.
#[allow(clippy::cognitive_complexity)]
fn log_login_error(err: &AuthNError) {
    match err {
        AuthNError::Rejected(_) | AuthNError::Expired(_) | AuthNError::Malformed(_) => {
            tracing::warn!("Login failed: {err}");
        }
        AuthNError::Unavailable(_) => tracing::error!("Login failed: {err}"),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use authn_sdk::LoginResult;
    use axum::{Router, body::Body, http::Request, middleware::from_fn_with_state, routing::get};
    use tower::ServiceExt;
    use tracing_test::traced_test;

    const CREDENTIAL: &str = "YIIBhgYGKwYBBQUCoIIBejCCAXag";

    struct RejectingRealm;

    #[async_trait]
    impl SecurityRealm for RejectingRealm {
        async fn login(&self, _token: &NegotiateToken) -> Result<LoginResult, AuthNError> {
            Err(AuthNError::Expired("ticket expired".to_owned()))
        }
    }

    fn app() -> Router {
        let state = NegotiateState {
            realm: Arc::new(RejectingRealm),
            scheme_match: SchemeMatch::Exact,
        };
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(from_fn_with_state(state, negotiate_middleware))
    }

    fn request(authorization: &str) -> Request<Body> {
        Request::builder()
            .uri("/")
            .header(AUTHORIZATION, authorization)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn challenge_has_negotiate_header() {
        let response = challenge();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            NEGOTIATE
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn login_failure_is_logged_without_credential() {
        let response = app()
            .oneshot(request(&format!("Negotiate {CREDENTIAL}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(logs_contain("Login failed: credential expired: ticket expired"));
        assert!(!logs_contain(CREDENTIAL));
    }

    #[tokio::test]
    #[traced_test]
    async fn malformed_header_is_logged() {
        let response = app().oneshot(request("Basic abcd")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(logs_contain("Malformed Authorization header"));
    }
}
