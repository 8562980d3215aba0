//! Request handling: mounts behind HTTP paths.

use bytes::Bytes;
use chrono::Utc;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode, Uri};
use log::{debug, warn};
use tagfs_record::Record;
use tagfs_vfs::Mount;

use crate::{BasicContentServer, ContentServer};

/// Something that answers HTTP requests.
pub trait Handler {
    fn handle<B>(&self, request: Request<B>) -> Response<Bytes>;
}

/// A plain-text response carrying only a status line.
pub(crate) fn status_response(status: StatusCode) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(format!("{}\n", status)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

/// Serves the file tree of a mount.
///
/// Each request opens its own handle, so concurrent requests never share a
/// cursor. Every handle is served as `application/octet-stream` unless the
/// content server picked another type.
pub struct FileServer<R, C = BasicContentServer> {
    mount: Mount<R>,
    content: C,
}

impl<R: Record> FileServer<R> {
    pub fn new(mount: Mount<R>) -> Self {
        Self::with_content_server(mount, BasicContentServer)
    }
}

impl<R: Record, C: ContentServer> FileServer<R, C> {
    pub fn with_content_server(mount: Mount<R>, content: C) -> Self {
        Self { mount, content }
    }

    pub fn mount(&self) -> &Mount<R> {
        &self.mount
    }
}

impl<R: Record, C: ContentServer> Handler for FileServer<R, C> {
    fn handle<B>(&self, request: Request<B>) -> Response<Bytes> {
        let mut file = match self.mount.open(request.uri().path()) {
            Ok(file) => file,
            Err(e) => {
                debug!("{} {}: {}", request.method(), request.uri(), e);
                return status_response(StatusCode::NOT_FOUND);
            }
        };

        let name = file.name().to_string();
        let served = self.content.serve_content(
            request.method(),
            request.headers(),
            &name,
            Utc::now(),
            &mut file,
        );
        match served {
            Ok(mut response) => {
                response
                    .headers_mut()
                    .entry(CONTENT_TYPE)
                    .or_insert(HeaderValue::from_static("application/octet-stream"));
                response
            }
            Err(e) => {
                warn!("{} {}: {}", request.method(), name, e);
                status_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Routes requests under `prefix` to `inner`, with the prefix removed.
///
/// Requests outside the prefix get `404 Not Found`.
pub struct StripPrefix<H> {
    prefix: String,
    inner: H,
}

impl<H: Handler> StripPrefix<H> {
    pub fn new(prefix: impl Into<String>, inner: H) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<H: Handler> Handler for StripPrefix<H> {
    fn handle<B>(&self, request: Request<B>) -> Response<Bytes> {
        let Some(rest) = request.uri().path().strip_prefix(self.prefix.as_str()) else {
            debug!("{}: outside {}", request.uri(), self.prefix);
            return status_response(StatusCode::NOT_FOUND);
        };
        let rest = rest.to_string();

        forward(&self.inner, request, rest)
    }
}

/// Drops the first path segment and routes the rest to `inner`.
///
/// `/127.0.0.1/metadata/v1/region` reaches `inner` as `/metadata/v1/region`,
/// which lets one tree answer under per-instance routes. Requests with a
/// single segment get `404 Not Found`.
pub struct StripSegment<H> {
    inner: H,
}

impl<H: Handler> StripSegment<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H: Handler> Handler for StripSegment<H> {
    fn handle<B>(&self, request: Request<B>) -> Response<Bytes> {
        let path = request.uri().path().trim_start_matches('/');
        let Some(idx) = path.find('/') else {
            debug!("{}: no segment to strip", request.uri());
            return status_response(StatusCode::NOT_FOUND);
        };
        let rest = path[idx..].to_string();
        forward(&self.inner, request, rest)
    }
}

/// Hand `request` to `inner` with its path replaced, keeping the query.
fn forward<H: Handler, B>(inner: &H, request: Request<B>, rest: String) -> Response<Bytes> {
    let path = if rest.starts_with('/') {
        rest
    } else {
        format!("/{}", rest)
    };
    let path_and_query = match request.uri().query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    };
    let uri = match Uri::try_from(path_and_query) {
        Ok(uri) => uri,
        Err(e) => {
            debug!("{}: {}", request.uri(), e);
            return status_response(StatusCode::BAD_REQUEST);
        }
    };

    let (mut parts, body) = request.into_parts();
    parts.uri = uri;
    inner.handle(Request::from_parts(parts, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_LENGTH;
    use http::Method;

    tagfs_record::record! {
        #[derive(Clone)]
        struct Meta {
            hostname: String => { json: "hostname" },
            region: String => { json: "region" },
        }
    }

    fn server() -> FileServer<Meta> {
        FileServer::new(Mount::new(
            Meta {
                hostname: "sample-droplet".to_string(),
                region: "nyc3".to_string(),
            },
            "json",
        ))
    }

    fn get(handler: &impl Handler, uri: &str) -> Response<Bytes> {
        handler.handle(Request::get(uri).body(()).unwrap())
    }

    #[test]
    fn serves_resolved_content() {
        let response = get(&server(), "/region");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body()[..], b"nyc3");
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "application/octet-stream"
        );
    }

    #[test]
    fn unresolved_path_is_404() {
        let response = get(&server(), "/zone");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = get(&server(), "/region/");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn head_request() {
        let request = Request::builder()
            .method(Method::HEAD)
            .uri("/hostname")
            .body(())
            .unwrap();
        let response = server().handle(request);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_LENGTH], "14");
        assert!(response.body().is_empty());
    }

    #[test]
    fn strip_prefix_routes() {
        let routed = StripPrefix::new("/metadata/v1", server());
        assert_eq!(routed.prefix(), "/metadata/v1");
        assert_eq!(&get(&routed, "/metadata/v1/").body()[..], b"hostname\nregion");
        assert_eq!(&get(&routed, "/metadata/v1").body()[..], b"hostname\nregion");
        assert_eq!(&get(&routed, "/metadata/v1/hostname?x=1").body()[..], b"sample-droplet");
        assert_eq!(get(&routed, "/other/hostname").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn strip_segment_serves_per_instance_routes() {
        let routed = StripSegment::new(StripPrefix::new("/metadata/v1", server()));
        assert_eq!(&get(&routed, "/127.0.0.1/metadata/v1/region").body()[..], b"nyc3");
        assert_eq!(
            &get(&routed, "/10.0.0.2/metadata/v1/?x=1").body()[..],
            b"hostname\nregion"
        );
        assert_eq!(get(&routed, "/127.0.0.1").status(), StatusCode::NOT_FOUND);
        assert_eq!(get(&routed, "/metadata/v1/region").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn trailing_slash_prefix() {
        let routed = StripPrefix::new("/metadata/v1/", server());
        assert_eq!(&get(&routed, "/metadata/v1/region").body()[..], b"nyc3");
    }

    struct Teapot;

    impl ContentServer for Teapot {
        fn serve_content(
            &self,
            _method: &Method,
            _headers: &http::HeaderMap,
            name: &str,
            _modified: chrono::DateTime<Utc>,
            _content: &mut dyn crate::ReadSeek,
        ) -> Result<Response<Bytes>, crate::Error> {
            let mut response = Response::new(Bytes::from(name.to_string()));
            *response.status_mut() = StatusCode::IM_A_TEAPOT;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            Ok(response)
        }
    }

    #[test]
    fn custom_content_server_is_delegated_to() {
        let teapot = FileServer::with_content_server(server().mount().clone(), Teapot);
        let response = get(&teapot, "/hostname");
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(&response.body()[..], b"/hostname");
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }
}
