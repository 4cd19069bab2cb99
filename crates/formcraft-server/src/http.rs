//! Bridge between hyper and the router's request/response types.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use formcraft_router::{Method, Request, Response, Router};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderName, HeaderValue, CONTENT_LENGTH};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request as HyperRequest, Response as HyperResponse, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, warn};

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Converts a hyper request, routes it and converts the response back.
///
/// At most `max_body_bytes` of the body are read; larger bodies get 413.
pub async fn handle_request(
    req: HyperRequest<Incoming>,
    router: Arc<Router>,
    max_body_bytes: usize,
) -> Result<HyperResponse<Full<Bytes>>, Infallible> {
    let Ok(method) = req.method().as_str().parse::<Method>() else {
        return Ok(into_hyper(Response::method_not_allowed()));
    };

    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|len| len > max_body_bytes as u64) {
        debug!(?declared, limit = max_body_bytes, "Declared body over limit");
        return Ok(into_hyper(Response::payload_too_large()));
    }

    let uri = req.uri();
    let mut request = Request::new(method, uri.path());
    if let Some(query) = uri.query() {
        request.query = Request::parse_query_string(query);
    }

    for (key, value) in req.headers() {
        if let Ok(v) = value.to_str() {
            request.headers.insert(key.to_string(), v.to_string());
        }
    }

    match Limited::new(req.into_body(), max_body_bytes).collect().await {
        Ok(body) => request.body = body.to_bytes().to_vec(),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            debug!(limit = max_body_bytes, "Request body over limit");
            return Ok(into_hyper(Response::payload_too_large()));
        }
        Err(err) => {
            debug!(error = %err, "Failed to read request body");
            return Ok(into_hyper(Response::error(
                400,
                "invalid-body",
                "could not read request body",
            )));
        }
    }

    Ok(into_hyper(router.handle(request).await))
}

/// Converts a router response into a hyper response.
///
/// Headers that are not valid HTTP are dropped.
pub fn into_hyper(res: Response) -> HyperResponse<Full<Bytes>> {
    let mut response = HyperResponse::new(Full::new(Bytes::from(res.body)));
    *response.status_mut() =
        StatusCode::from_u16(res.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    for (key, value) in &res.headers {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => warn!(header = %key, "Dropping invalid response header"),
        }
    }

    response
}

/// Accepts connections forever, serving each over HTTP/1.
///
/// Failed accepts are logged and retried after a short pause.
pub async fn serve(listener: TcpListener, router: Arc<Router>, max_body_bytes: usize) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);

        tokio::task::spawn(async move {
            let service = service_fn(move |req| {
                handle_request(req, Arc::clone(&router), max_body_bytes)
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                debug!(peer = %peer, error = %err, "Connection closed with error");
            }
        });
    }
}
