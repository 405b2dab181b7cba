//! Request-target decomposition.
//!
//! A proxy request-target arrives either in absolute form
//! (`scheme://host[:port][/path]`) or in origin form (`/path`, host implied
//! by the `Host` header). Both decompose into the `(host, port, path)`
//! triple the upstream connector dials.

use thiserror::Error;

/// Errors from decomposing a request-target.
///
/// Malformed targets are rejected here with a clear client-visible error
/// instead of being left to fail inside the connect call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    /// The authority component contained no hostname.
    #[error("request-target has an empty host")]
    EmptyHost,

    /// The port component was not a valid TCP port number.
    #[error("request-target has an invalid port: {0:?}")]
    InvalidPort(String),

    /// Origin-form target with no Host header to supply the hostname.
    #[error("origin-form request-target requires a Host header")]
    MissingHost,
}

/// A decomposed request-target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// Origin hostname (no validation of host syntax is attempted).
    pub host: String,
    /// Origin TCP port; defaults to 80 when the target names none.
    pub port: u16,
    /// Absolute path, always starting with `/`.
    pub path: String,
}

impl RequestTarget {
    /// Decompose a request-target.
    ///
    /// `host_header` is the value of the client's `Host` header, consulted
    /// only for origin-form targets.
    pub fn parse(target: &str, host_header: Option<&str>) -> Result<Self, TargetError> {
        // Origin form: the whole target is the path, the Host header names
        // the origin.
        if target.starts_with('/') {
            let authority = host_header.ok_or(TargetError::MissingHost)?;
            let (host, port) = split_authority(authority.trim())?;
            return Ok(Self {
                host,
                port,
                path: target.to_string(),
            });
        }

        // Absolute form: strip a leading scheme if present, otherwise the
        // string already starts at the host.
        let rest = match target.find("://") {
            Some(idx) => &target[idx + 3..],
            None => target,
        };

        let (authority, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };

        let (host, port) = split_authority(authority)?;
        Ok(Self {
            host,
            port,
            path: path.to_string(),
        })
    }

    /// The `host:port` pair as dialed by the upstream connector.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split `host[:port]`, defaulting the port to 80.
fn split_authority(authority: &str) -> Result<(String, u16), TargetError> {
    let (host, port) = match authority.find(':') {
        Some(idx) => {
            let port_str = &authority[idx + 1..];
            let port = port_str
                .parse::<u16>()
                .map_err(|_| TargetError::InvalidPort(port_str.to_string()))?;
            (&authority[..idx], port)
        }
        None => (authority, 80),
    };

    if host.is_empty() {
        return Err(TargetError::EmptyHost);
    }
    Ok((host.to_string(), port))
}
