//! API Gateway definition
//!
//! Contains the `ApiGateway` struct: assembles the middleware stack around
//! application routes and serves them.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::middleware::{Next, from_fn, from_fn_with_state};
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use authn_sdk::SecurityRealm;
use sched_security::constants::{DEFAULT_PRINCIPAL, DEFAULT_SUBJECT_ID, ROLE_ADMIN};
use sched_security::{KerberosPrincipal, Subject};

use crate::auth;
use crate::config::ApiGatewayConfig;

/// Owns the HTTP server and the authentication stack in front of the scheduler routes.
pub struct ApiGateway {
    config: ApiGatewayConfig,
    // Security realm (None when auth_disabled)
    realm: Option<Arc<dyn SecurityRealm>>,
}

impl ApiGateway {
    #[must_use]
    pub fn new(config: ApiGatewayConfig, realm: Option<Arc<dyn SecurityRealm>>) -> Self {
        Self { config, realm }
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    /// Mount built-in routes next to `routes` and wrap everything in the middleware stack.
    ///
    /// # Errors
    /// Returns an error if auth is enabled but no realm was provided.
    pub fn build_router(&self, routes: Router) -> Result<Router> {
        let router = routes.route("/health", get(|| async { "ok" }));
        self.apply_middleware_stack(router)
    }

    /// Apply all middleware layers to a router (request ID, tracing, timeout, body limit, auth)
    ///
    /// # Errors
    /// Returns an error if auth is enabled but no realm was provided.
    pub fn apply_middleware_stack(&self, mut router: Router) -> Result<Router> {
        // `Router::layer` wraps: the **last** added layer runs **first**.
        //
        // Request execution order (outermost -> innermost):
        // SetRequestId -> PropagateRequestId -> Trace -> Timeout -> BodyLimit -> Auth -> Router
        let config = &self.config;

        // 5) Auth
        if config.auth_disabled {
            let principal: KerberosPrincipal = DEFAULT_PRINCIPAL.parse()?;
            let default_subject = Subject::builder()
                .subject_id(DEFAULT_SUBJECT_ID)
                .principal(&principal)
                .roles(vec![ROLE_ADMIN.to_owned()])
                .build();

            tracing::warn!(
                principal = DEFAULT_PRINCIPAL,
                "API Gateway auth is DISABLED: every request runs as the development subject. \
                 DO NOT use this mode outside local development."
            );
            router = router.layer(from_fn(
                move |mut req: axum::extract::Request, next: Next| {
                    let subject = default_subject.clone();
                    async move {
                        req.extensions_mut().insert(subject);
                        next.run(req).await
                    }
                },
            ));
        } else if let Some(realm) = self.realm.clone() {
            let state = auth::NegotiateState {
                realm,
                scheme_match: config.negotiate.scheme_match,
            };
            router = router.layer(from_fn_with_state(state, auth::negotiate_middleware));
        } else {
            return Err(anyhow::anyhow!(
                "auth is enabled but no security realm is available; \
                 configure a realm or set `auth_disabled: true`"
            ));
        }

        // 4) Body limit
        router = router.layer(RequestBodyLimitLayer::new(config.defaults.body_limit_bytes));
        router = router.layer(DefaultBodyLimit::max(config.defaults.body_limit_bytes));

        // 3) Timeout
        router = router.layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(config.defaults.request_timeout_secs),
        ));

        // 2) Trace
        router = router.layer(
            TraceLayer::new_for_http().make_span_with(
                |req: &axum::http::Request<axum::body::Body>| {
                    let rid = req
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        request_id = %rid,
                    )
                },
            ),
        );

        // 1) Request ID handling
        router = router.layer(PropagateRequestIdLayer::x_request_id());
        router = router.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Ok(router)
    }

    fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr> {
        bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
    }

    /// Bind the configured address and serve `router` until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the address is invalid, binding fails, or the server fails.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr = Self::parse_bind_address(&self.config.bind_addr)?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", addr);

        // Graceful shutdown on cancel
        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
