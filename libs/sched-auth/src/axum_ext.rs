//! Axum extractors and the unauthenticated signal

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use sched_security::Subject;
use thiserror::Error;

/// Response extension marking a 401 raised by downstream code because the
/// request carried no credentials.
///
/// The Negotiate gate looks for this marker on responses to requests that had
/// no `Authorization` header and replaces them with a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnauthenticatedSignal;

/// Returns `true` when `response` was produced by [`Unauthenticated`].
#[must_use]
pub fn is_unauthenticated_signal(response: &Response) -> bool {
    response
        .extensions()
        .get::<UnauthenticatedSignal>()
        .is_some()
}

/// Raised by handlers when an operation requires an authenticated caller.
#[derive(Debug, Clone, Copy, Default, Error)]
#[error("authentication required")]
pub struct Unauthenticated;

impl IntoResponse for Unauthenticated {
    fn into_response(self) -> Response {
        let mut response = StatusCode::UNAUTHORIZED.into_response();
        response.extensions_mut().insert(UnauthenticatedSignal);
        response
    }
}

/// Rejection for the subject extractors.
#[derive(Debug, Error)]
pub enum AuthRejection {
    /// The request has no authenticated subject.
    #[error(transparent)]
    Unauthenticated(#[from] Unauthenticated),

    /// No `Subject` in request extensions: the gate is not installed on this route.
    #[error("subject not found - negotiate middleware not configured")]
    MissingSubject,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated(signal) => signal.into_response(),
            Self::MissingSubject => {
                tracing::error!("{self}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Extractor for the request's [`Subject`], authenticated or anonymous.
#[derive(Debug, Clone)]
pub struct CurrentSubject(pub Subject);

impl<S> FromRequestParts<S> for CurrentSubject
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Subject>()
            .cloned()
            .map(CurrentSubject)
            .ok_or(AuthRejection::MissingSubject)
    }
}

/// Extractor that requires an authenticated [`Subject`].
///
/// Anonymous requests are rejected with [`Unauthenticated`], which the gate
/// answers with `WWW-Authenticate: Negotiate`.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Subject);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentSubject(subject) = CurrentSubject::from_request_parts(parts, state).await?;
        if subject.is_authenticated() {
            Ok(Self(subject))
        } else {
            Err(Unauthenticated.into())
        }
    }
}
