//! Content serving: turning a seekable handle into a response.

use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{ACCEPT_RANGES, ALLOW, CONTENT_LENGTH, CONTENT_RANGE, LAST_MODIFIED, RANGE};
use http::{HeaderMap, HeaderValue, Method, Response, StatusCode};
use log::trace;

use crate::server::status_response;
use crate::Error;

/// A readable, seekable content source.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Produces a response for one request from an opened handle.
///
/// `modified` is the timestamp the caller wants advertised; content is
/// never versioned, so callers pass the current time.
pub trait ContentServer: Send + Sync {
    fn serve_content(
        &self,
        method: &Method,
        headers: &HeaderMap,
        name: &str,
        modified: DateTime<Utc>,
        content: &mut dyn ReadSeek,
    ) -> Result<Response<Bytes>, Error>;
}

/// A byte range requested through the `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// No usable range; serve everything.
    Full,
    /// Inclusive byte positions.
    Partial { start: u64, end: u64 },
    /// The range lies entirely past the end of the content.
    Unsatisfiable,
}

impl ByteRange {
    /// Interpret a `Range` header against content of `size` bytes.
    ///
    /// Only single ranges are honoured. Multiple ranges and malformed
    /// headers fall back to `Full`.
    pub fn parse(header: &str, size: u64) -> Self {
        let Some(range) = header.trim().strip_prefix("bytes=") else {
            return ByteRange::Full;
        };
        if range.contains(',') {
            return ByteRange::Full;
        }
        let Some((first, last)) = range.split_once('-') else {
            return ByteRange::Full;
        };
        let (first, last) = (first.trim(), last.trim());

        if first.is_empty() {
            let Ok(suffix) = last.parse::<u64>() else {
                return ByteRange::Full;
            };
            if suffix == 0 || size == 0 {
                return ByteRange::Unsatisfiable;
            }
            return ByteRange::Partial {
                start: size.saturating_sub(suffix),
                end: size - 1,
            };
        }

        let Ok(start) = first.parse::<u64>() else {
            return ByteRange::Full;
        };
        let end = if last.is_empty() {
            u64::MAX
        } else {
            match last.parse::<u64>() {
                Ok(end) if end >= start => end,
                _ => return ByteRange::Full,
            }
        };
        if start >= size {
            return ByteRange::Unsatisfiable;
        }
        ByteRange::Partial {
            start,
            end: end.min(size - 1),
        }
    }
}

/// `GET`/`HEAD` with single byte ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicContentServer;

impl ContentServer for BasicContentServer {
    fn serve_content(
        &self,
        method: &Method,
        headers: &HeaderMap,
        name: &str,
        modified: DateTime<Utc>,
        content: &mut dyn ReadSeek,
    ) -> Result<Response<Bytes>, Error> {
        if method != Method::GET && method != Method::HEAD {
            let mut response = status_response(StatusCode::METHOD_NOT_ALLOWED);
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
            return Ok(response);
        }

        let size = content.seek(SeekFrom::End(0))?;
        let range = headers
            .get(RANGE)
            .and_then(|value| value.to_str().ok())
            .map_or(ByteRange::Full, |value| ByteRange::parse(value, size));

        let (status, start, len) = match range {
            ByteRange::Full => (StatusCode::OK, 0, size),
            ByteRange::Partial { start, end } => {
                (StatusCode::PARTIAL_CONTENT, start, end - start + 1)
            }
            ByteRange::Unsatisfiable => {
                let mut response = status_response(StatusCode::RANGE_NOT_SATISFIABLE);
                response.headers_mut().insert(
                    CONTENT_RANGE,
                    HeaderValue::from_str(&format!("bytes */{}", size))?,
                );
                return Ok(response);
            }
        };
        trace!("{} {}: bytes {}+{} of {}", method, name, start, len, size);

        let mut body = Vec::new();
        if method != Method::HEAD {
            content.seek(SeekFrom::Start(start))?;
            Read::take(&mut *content, len).read_to_end(&mut body)?;
        }

        let mut response = Response::new(Bytes::from(body));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
        headers.insert(LAST_MODIFIED, HeaderValue::from_str(&http_date(modified))?);
        if status == StatusCode::PARTIAL_CONTENT {
            headers.insert(
                CONTENT_RANGE,
                HeaderValue::from_str(&format!("bytes {}-{}/{}", start, start + len - 1, size))?,
            );
        }
        Ok(response)
    }
}

/// IMF-fixdate, as used by `Last-Modified`.
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Cursor;

    fn serve(method: Method, range: Option<&str>, body: &'static [u8]) -> Response<Bytes> {
        let mut headers = HeaderMap::new();
        if let Some(range) = range {
            headers.insert(RANGE, HeaderValue::from_str(range).unwrap());
        }
        let modified = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
        BasicContentServer
            .serve_content(
                &method,
                &headers,
                "/hostname",
                modified,
                &mut Cursor::new(body),
            )
            .unwrap()
    }

    #[test]
    fn parse_ranges() {
        assert_eq!(
            ByteRange::parse("bytes=0-3", 10),
            ByteRange::Partial { start: 0, end: 3 }
        );
        assert_eq!(
            ByteRange::parse("bytes=4-", 10),
            ByteRange::Partial { start: 4, end: 9 }
        );
        assert_eq!(
            ByteRange::parse("bytes=-3", 10),
            ByteRange::Partial { start: 7, end: 9 }
        );
        assert_eq!(
            ByteRange::parse("bytes=-30", 10),
            ByteRange::Partial { start: 0, end: 9 }
        );
        assert_eq!(
            ByteRange::parse("bytes=2-99", 10),
            ByteRange::Partial { start: 2, end: 9 }
        );
    }

    #[test]
    fn parse_unsatisfiable_and_ignored() {
        assert_eq!(ByteRange::parse("bytes=10-", 10), ByteRange::Unsatisfiable);
        assert_eq!(ByteRange::parse("bytes=-0", 10), ByteRange::Unsatisfiable);
        assert_eq!(ByteRange::parse("bytes=0-1,4-5", 10), ByteRange::Full);
        assert_eq!(ByteRange::parse("bytes=5-2", 10), ByteRange::Full);
        assert_eq!(ByteRange::parse("items=0-1", 10), ByteRange::Full);
        assert_eq!(ByteRange::parse("bytes=x-1", 10), ByteRange::Full);
    }

    #[test]
    fn full_get() {
        let response = serve(Method::GET, None, b"sample-droplet");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body()[..], b"sample-droplet");
        assert_eq!(response.headers()[CONTENT_LENGTH], "14");
        assert_eq!(response.headers()[ACCEPT_RANGES], "bytes");
        assert_eq!(
            response.headers()[LAST_MODIFIED],
            "Wed, 21 Oct 2015 07:28:00 GMT"
        );
    }

    #[test]
    fn partial_get() {
        let response = serve(Method::GET, Some("bytes=7-13"), b"sample-droplet");
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(&response.body()[..], b"droplet");
        assert_eq!(response.headers()[CONTENT_RANGE], "bytes 7-13/14");
        assert_eq!(response.headers()[CONTENT_LENGTH], "7");
    }

    #[test]
    fn unsatisfiable_range() {
        let response = serve(Method::GET, Some("bytes=50-"), b"nyc3");
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(response.headers()[CONTENT_RANGE], "bytes */4");
    }

    #[test]
    fn head_has_length_but_no_body() {
        let response = serve(Method::HEAD, None, b"nyc3");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
        assert_eq!(response.headers()[CONTENT_LENGTH], "4");
    }

    #[test]
    fn other_methods_not_allowed() {
        let response = serve(Method::PUT, None, b"nyc3");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, HEAD");
    }
}
