//! Synthesized error responses.
//!
//! When the proxy cannot forward a request it answers with a small
//! self-contained HTML page. The status line is always HTTP/1.0 and the
//! connection closes after the response.

/// Render a complete error response: status line, headers and HTML body.
pub fn error_page(status: u16, reason: &str, cause: &str, detail: &str) -> Vec<u8> {
    let body = format!(
        "<html><title>Proxy Error</title><body bgcolor=\"ffffff\">\r\n\
         {status}: {reason}\r\n\
         <p>{detail}: {cause}\r\n\
         <hr><em>forward-proxy</em>\r\n\
         </body></html>"
    );
    format!(
        "HTTP/1.0 {} {}\r\nContent-type: text/html\r\nContent-length: {}\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    )
    .into_bytes()
}

/// `501 Not Implemented` for methods other than GET and HEAD.
pub fn not_implemented(method: &str) -> Vec<u8> {
    error_page(
        501,
        "Not Implemented",
        method,
        "The proxy does not implement this method",
    )
}

/// `400 Bad Request` for targets that cannot be decomposed.
pub fn bad_request(target: &str, why: &str) -> Vec<u8> {
    error_page(400, "Bad Request", target, why)
}

/// `500 Internal Server Error` when the origin cannot be reached.
pub fn connect_failed(authority: &str) -> Vec<u8> {
    error_page(
        500,
        "Internal Server Error",
        authority,
        "Failed to connect to the origin server",
    )
}
