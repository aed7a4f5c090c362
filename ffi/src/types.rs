//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer plus length instead of `Vec`,
//! and enums with explicit discriminants. Conversion functions live here so
//! `lib.rs` stays focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use follower_core::error::ApiError;
use follower_core::http::HttpMethod;
use follower_core::types::FollowerRecord;

/// Opaque handle to a `GitHubClient`.
pub struct FfiGitHubClient {
    pub(crate) inner: follower_core::GitHubClient,
}

/// Opaque handle to a `FollowerSession`. Not thread-safe: drive it from the
/// UI thread only.
pub struct FfiFollowerSession {
    pub(crate) inner: follower_core::FollowerSession,
}

/// Turn a Rust string into an owned C string. Interior NULs cannot be
/// represented in C, so they are dropped rather than failing the call.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s: String = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request the host must execute.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: follower_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: to_c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response as the host received it.
///
/// The host builds this on its own stack and passes a pointer in. The FFI
/// layer reads but never frees these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiFollowerResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUser = 1,
    Transport = 2,
    HttpStatus = 3,
    Decode = 4,
    EmptyResult = 5,
    Panic = 6,
    NullArg = 7,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::InvalidUser => FfiErrorCode::InvalidUser,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::HttpStatus { .. } => FfiErrorCode::HttpStatus,
            ApiError::Decode(_) => FfiErrorCode::Decode,
            ApiError::EmptyResult => FfiErrorCode::EmptyResult,
        }
    }
}

/// One follower exposed to C. Optional strings are null when absent;
/// `id` is 0 when absent.
#[repr(C)]
pub struct FfiFollower {
    pub login: *mut c_char,
    pub id: u64,
    pub avatar_url: *mut c_char,
    pub html_url: *mut c_char,
}

impl FfiFollower {
    fn from_core(record: FollowerRecord) -> Self {
        FfiFollower {
            login: to_c_string(record.login),
            id: record.id.unwrap_or(0),
            avatar_url: record.avatar_url.map_or(std::ptr::null_mut(), to_c_string),
            html_url: record.html_url.map_or(std::ptr::null_mut(), to_c_string),
        }
    }
}

/// Result envelope for `follower_parse_load_followers`.
///
/// On success `error_code` is `Ok`, `error_message` is null and
/// `followers`/`followers_len` describe the decoded list (null/0 when the
/// list is empty). On failure `error_code` names the category,
/// `error_message` is a human-readable C string and `followers` is null.
#[repr(C)]
pub struct FfiFollowerResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub followers: *mut FfiFollower,
    pub followers_len: u32,
}

impl FfiFollowerResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        followers: *mut FfiFollower,
        followers_len: u32,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiFollowerResult {
            error_code,
            error_message,
            http_status,
            followers,
            followers_len,
        }))
    }

    pub(crate) fn ok_followers(followers: Vec<FollowerRecord>) -> *mut Self {
        let followers_len = followers.len() as u32;
        let items = if followers.is_empty() {
            std::ptr::null_mut()
        } else {
            let items: Box<[FfiFollower]> =
                followers.into_iter().map(FfiFollower::from_core).collect();
            Box::into_raw(items) as *mut FfiFollower
        };
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, items, followers_len)
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let http_status = match &err {
            ApiError::HttpStatus { status, .. } => *status,
            _ => 0,
        };
        let msg = to_c_string(err.to_string());
        Self::boxed((&err).into(), msg, http_status, std::ptr::null_mut(), 0)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = to_c_string(format!("null argument: {name}"));
        Self::boxed(FfiErrorCode::NullArg, msg, 0, std::ptr::null_mut(), 0)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, to_c_string(msg), 0, std::ptr::null_mut(), 0)
    }
}

/// Free the C-string fields of an `FfiFollower` (but not the struct itself).
pub(crate) fn free_follower_fields(follower: &FfiFollower) {
    for ptr in [follower.login, follower.avatar_url, follower.html_url] {
        if !ptr.is_null() {
            drop(unsafe { CString::from_raw(ptr) });
        }
    }
}
