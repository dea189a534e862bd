//! Map transport failures onto retry kinds.

use super::policy::ErrorKind;
use crate::openrosa::FetchError;

pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Permanent,
    }
}

pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Permanent
}

pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Curl { source, .. } => classify_curl_error(source),
        FetchError::Http { code, .. } => classify_http_status(*code),
        _ => ErrorKind::Permanent,
    }
}
