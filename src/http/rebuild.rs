//! Outbound request reconstruction.
//!
//! # Responsibilities
//! - Emit the HTTP/1.0 request line for the decomposed target
//! - Forward the client's headers, minus the ones the proxy owns
//! - Force `Connection: close` / `Proxy-Connection: close` downstream
//!
//! # Design Decisions
//! - The version downgrade to HTTP/1.0 is deliberate: it makes the origin
//!   close after one response, so the relay can treat end-of-stream as
//!   end-of-response

use crate::http::target::RequestTarget;

/// Header names the proxy handles itself and never forwards verbatim
/// from the filtered pass.
const OWNED_HEADERS: [&str; 4] = ["Host", "Connection", "Proxy-Connection", "User-Agent"];

/// Build the complete outbound header block, terminated by a blank line.
///
/// Rules applied in order: request line, `Host` (client's verbatim or
/// synthesized from the target), the fixed `User-Agent`, remaining client
/// headers in their original order, forced close headers, blank line.
pub fn build_upstream_request(
    method: &str,
    target: &RequestTarget,
    client_headers: &[String],
    user_agent: &str,
) -> String {
    let mut out = String::with_capacity(256);

    out.push_str(method);
    out.push(' ');
    out.push_str(&target.path);
    out.push_str(" HTTP/1.0\r\n");

    match find_line(client_headers, "Host") {
        Some(line) => {
            out.push_str(line);
            out.push_str("\r\n");
        }
        None => {
            out.push_str("Host: ");
            out.push_str(&target.host);
            out.push_str("\r\n");
        }
    }

    out.push_str("User-Agent: ");
    out.push_str(user_agent);
    out.push_str("\r\n");

    for line in client_headers {
        if !is_owned_header(line) {
            out.push_str(line);
            out.push_str("\r\n");
        }
    }

    out.push_str("Connection: close\r\n");
    out.push_str("Proxy-Connection: close\r\n");
    out.push_str("\r\n");
    out
}

/// Find the client's raw line for a header, case-insensitively.
fn find_line<'a>(headers: &'a [String], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .map(String::as_str)
        .find(|line| header_name_is(line, name))
}

fn is_owned_header(line: &str) -> bool {
    OWNED_HEADERS.iter().any(|name| header_name_is(line, name))
}

fn header_name_is(line: &str, name: &str) -> bool {
    match line.split_once(':') {
        Some((field, _)) => field.trim().eq_ignore_ascii_case(name),
        None => false,
    }
}
