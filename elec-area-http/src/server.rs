//! The `POST /api/area-check` endpoint.
//!
//! Responses:
//! * `200` with an [`AreaCheckResponse`] body for any non-empty postal code.
//! * `400` with `{"error": ...}` when `postalCode` is missing, empty or not a string.
//! * `500` with `{"error": ...}` when the body is not JSON.
//!
//! Transport-level failures (wrong method, unknown path, oversized or
//! unreadable body) also answer with an `{"error": ...}` body.

use std::{future::Future, net::SocketAddr, pin::pin};

use elec_core::{AreaCheckResponse, Locale, resolve};
use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::{debug, info, warn};
use warp::{
    Filter, Rejection, Reply,
    http::StatusCode,
    hyper::body::Buf,
    reject::{self, MethodNotAllowed, Reject},
};

use crate::wire::ErrorBody;

/// Upper bound on accepted request bodies, in bytes.
const MAX_BODY_BYTES: usize = 4 * 1024;

#[derive(Debug)]
struct BodyTooLarge;

impl Reject for BodyTooLarge {}

#[derive(Debug)]
struct UnreadableBody;

impl Reject for UnreadableBody {}

/// Outcome of one request, before it is turned into a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaCheckReply {
    Resolved(AreaCheckResponse),
    Failed {
        status: StatusCode,
        body: ErrorBody,
    },
}

impl AreaCheckReply {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Resolved(_) => StatusCode::OK,
            Self::Failed { status, .. } => *status,
        }
    }
}

/// Request handling without any transport concerns.
pub fn handle_area_check(
    body: &[u8],
    locale: Locale,
) -> AreaCheckReply {
    let messages = locale.messages();

    let request: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "unreadable area check request");
            return AreaCheckReply::Failed {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody {
                    error: messages.area_check_failed.to_string(),
                },
            };
        }
    };

    let postal_code = request
        .get("postalCode")
        .and_then(Value::as_str)
        .filter(|code| !code.is_empty());

    let Some(postal_code) = postal_code else {
        debug!("area check request without postal code");
        return AreaCheckReply::Failed {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: messages.postal_code_missing.to_string(),
            },
        };
    };

    let response = resolve(postal_code, locale);
    debug!(postal_code, area = %response.area, "area resolved");
    AreaCheckReply::Resolved(response)
}

/// Collects a request body of at most [`MAX_BODY_BYTES`], with or without a
/// `Content-Length` header.
async fn read_body<S, B>(body: S) -> Result<Vec<u8>, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    let mut body = pin!(body);
    let mut collected = Vec::new();

    while let Some(chunk) = body.next().await {
        let mut chunk = chunk.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            reject::custom(UnreadableBody)
        })?;
        if collected.len() + chunk.remaining() > MAX_BODY_BYTES {
            debug!(limit = MAX_BODY_BYTES, "request body too large");
            return Err(reject::custom(BodyTooLarge));
        }
        let bytes = chunk.copy_to_bytes(chunk.remaining());
        collected.extend_from_slice(&bytes);
    }

    Ok(collected)
}

/// Maps rejections to a status and an [`ErrorBody`].
fn rejection_reply(rejection: &Rejection) -> (StatusCode, ErrorBody) {
    let status = if rejection.is_not_found() {
        StatusCode::NOT_FOUND
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        StatusCode::METHOD_NOT_ALLOWED
    } else if rejection.find::<BodyTooLarge>().is_some() {
        StatusCode::PAYLOAD_TOO_LARGE
    } else if rejection.find::<UnreadableBody>().is_some() {
        StatusCode::BAD_REQUEST
    } else {
        warn!(?rejection, "unhandled rejection");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let error = status.canonical_reason().unwrap_or("Error").to_string();
    (status, ErrorBody { error })
}

/// Route tree for the endpoint.
pub fn routes(locale: Locale) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("api" / "area-check")
        .and(warp::post())
        .and(warp::body::stream())
        .and_then(read_body)
        .map(move |body: Vec<u8>| match handle_area_check(&body, locale) {
            AreaCheckReply::Resolved(response) => {
                warp::reply::with_status(warp::reply::json(&response), StatusCode::OK)
            }
            AreaCheckReply::Failed { status, body } => {
                warp::reply::with_status(warp::reply::json(&body), status)
            }
        })
        .recover(|rejection: Rejection| async move {
            let (status, body) = rejection_reply(&rejection);
            Ok::<_, Rejection>(warp::reply::with_status(warp::reply::json(&body), status))
        })
}

/// Bind `addr` and serve until `shutdown` resolves.
///
/// Returns the bound address, which differs from `addr` when port 0 was
/// requested, together with the server future.
pub fn bind(
    addr: SocketAddr,
    locale: Locale,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>), warp::Error> {
    let (bound, server) = warp::serve(routes(locale).with(warp::trace::request()))
        .try_bind_with_graceful_shutdown(addr, shutdown)?;
    info!(addr = %bound, locale = locale.as_str(), "area check endpoint listening");
    Ok((bound, server))
}
