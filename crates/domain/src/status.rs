//! Named HTTP status codes.
//!
//! Plain `u16` constants so expectations can read `status::NOT_FOUND` instead
//! of a bare number. The engine itself only ever compares integers.

#![allow(missing_docs)]

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const ACCEPTED: u16 = 202;
pub const NO_CONTENT: u16 = 204;
pub const MOVED_PERMANENTLY: u16 = 301;
pub const FOUND: u16 = 302;
pub const SEE_OTHER: u16 = 303;
pub const NOT_MODIFIED: u16 = 304;
pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;
pub const METHOD_NOT_ALLOWED: u16 = 405;
pub const CONFLICT: u16 = 409;
pub const UNPROCESSABLE_ENTITY: u16 = 422;
pub const TOO_MANY_REQUESTS: u16 = 429;
pub const INTERNAL_SERVER_ERROR: u16 = 500;
pub const BAD_GATEWAY: u16 = 502;
pub const SERVICE_UNAVAILABLE: u16 = 503;
pub const GATEWAY_TIMEOUT: u16 = 504;

/// Returns the canonical reason phrase for common status codes.
#[must_use]
pub const fn reason_phrase(code: u16) -> &'static str {
    match code {
        OK => "OK",
        CREATED => "Created",
        ACCEPTED => "Accepted",
        NO_CONTENT => "No Content",
        MOVED_PERMANENTLY => "Moved Permanently",
        FOUND => "Found",
        SEE_OTHER => "See Other",
        NOT_MODIFIED => "Not Modified",
        BAD_REQUEST => "Bad Request",
        UNAUTHORIZED => "Unauthorized",
        FORBIDDEN => "Forbidden",
        NOT_FOUND => "Not Found",
        METHOD_NOT_ALLOWED => "Method Not Allowed",
        CONFLICT => "Conflict",
        UNPROCESSABLE_ENTITY => "Unprocessable Entity",
        TOO_MANY_REQUESTS => "Too Many Requests",
        INTERNAL_SERVER_ERROR => "Internal Server Error",
        BAD_GATEWAY => "Bad Gateway",
        SERVICE_UNAVAILABLE => "Service Unavailable",
        GATEWAY_TIMEOUT => "Gateway Timeout",
        _ => "Unknown",
    }
}
