//! C-ABI wrapper around `follower-core`.
//!
//! # Overview
//! Exposes the followers endpoint and the trigger/complete session through
//! `extern "C"` functions, so an Android or iOS shell can drive the app's
//! logic while doing the HTTP itself with its platform client.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `follower_build_*` / `follower_parse_*` mirror the core client 1:1.
//! - `follower_session_*` wraps `FollowerSession`; the host executes the
//!   request returned by `follower_session_trigger` and reports back with the
//!   same request id.
//! - The C caller owns every returned pointer and frees it with the matching
//!   `follower_*_free` / `follower_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use follower_core::http::HttpResponse;
use follower_core::{ApiError, RequestId};

use types::*;

/// Read a borrowed C string. Invalid UTF-8 reads as empty.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
unsafe fn read_str<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        ""
    } else {
        unsafe { read_str(resp.body) }
    };
    HttpResponse::new(resp.status, body)
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `GitHubClient` bound to `base_url`. A null `base_url`
/// selects `https://api.github.com/`.
///
/// The caller must free the returned pointer with `follower_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn follower_client_new(base_url: *const c_char) -> *mut FfiGitHubClient {
    catch_unwind(|| {
        let inner = if base_url.is_null() {
            follower_core::GitHubClient::default()
        } else {
            follower_core::GitHubClient::new(unsafe { read_str(base_url) })
        };
        Box::into_raw(Box::new(FfiGitHubClient { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `follower_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn follower_client_free(client: *mut FfiGitHubClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Followers endpoint
// ---------------------------------------------------------------------------

/// Build the `GET /users/{user}/followers` request.
///
/// Returns null if `client` or `user` is null, or if `user` is empty.
/// The caller must free the returned pointer with `follower_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn follower_build_load_followers(
    client: *const FfiGitHubClient,
    user: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || user.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_load_followers(unsafe { read_str(user) }) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Parse the response to a followers request.
///
/// The caller must free the returned pointer with `follower_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn follower_parse_load_followers(
    client: *const FfiGitHubClient,
    response: *const FfiHttpResponse,
) -> *mut FfiFollowerResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiFollowerResult::null_arg("client");
        }
        if response.is_null() {
            return FfiFollowerResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let core_resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_load_followers(core_resp) {
            Ok(followers) => FfiFollowerResult::ok_followers(followers),
            Err(e) => FfiFollowerResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiFollowerResult::panic("panic in follower_parse_load_followers"))
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Create a session that loads followers of `user` through a copy of
/// `client`. The client may be freed afterwards.
///
/// Returns null if either argument is null.
/// The caller must free the returned pointer with `follower_session_free`.
#[unsafe(no_mangle)]
pub extern "C" fn follower_session_new(
    client: *const FfiGitHubClient,
    user: *const c_char,
) -> *mut FfiFollowerSession {
    catch_unwind(|| {
        if client.is_null() || user.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let inner = follower_core::FollowerSession::new(client.inner.clone(), unsafe { read_str(user) });
        Box::into_raw(Box::new(FfiFollowerSession { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a session. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn follower_session_free(session: *mut FfiFollowerSession) {
    if !session.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(session) });
        });
    }
}

/// Start a new load. Writes the request id to `out_request_id` (when
/// non-null) and returns the request to execute.
///
/// Returns null if `session` is null or the session's user is empty; in the
/// latter case the display text already reads "Request Failed".
/// The caller must free the returned pointer with `follower_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn follower_session_trigger(
    session: *mut FfiFollowerSession,
    out_request_id: *mut u64,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let session = unsafe { &mut *session };
        let Some(pending) = session.inner.trigger() else {
            return std::ptr::null_mut();
        };
        if !out_request_id.is_null() {
            unsafe { *out_request_id = pending.id.0 };
        }
        FfiHttpRequest::from_core(pending.request)
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Report the HTTP response for `request_id`.
///
/// Returns true if the response was applied, false if a newer trigger has
/// superseded it or an argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn follower_session_complete(
    session: *mut FfiFollowerSession,
    request_id: u64,
    response: *const FfiHttpResponse,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() || response.is_null() {
            return false;
        }
        let session = unsafe { &mut *session };
        let core_resp = ffi_response_to_core(unsafe { &*response });
        session.inner.complete(RequestId(request_id), Ok(core_resp))
    }))
    .unwrap_or(false)
}

/// Report that the host could not execute the request for `request_id`
/// (no network, DNS failure, timeout). `reason` may be null.
///
/// Returns true if the failure was applied.
#[unsafe(no_mangle)]
pub extern "C" fn follower_session_fail(
    session: *mut FfiFollowerSession,
    request_id: u64,
    reason: *const c_char,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if session.is_null() {
            return false;
        }
        let session = unsafe { &mut *session };
        let reason = if reason.is_null() {
            "unknown transport failure".to_string()
        } else {
            unsafe { read_str(reason) }.to_string()
        };
        session
            .inner
            .complete(RequestId(request_id), Err(ApiError::Transport(reason)))
    }))
    .unwrap_or(false)
}

/// Current display text. Never null unless `session` is null.
///
/// The caller must free the returned string with `follower_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn follower_session_display_text(
    session: *const FfiFollowerSession,
) -> *mut c_char {
    catch_unwind(|| {
        if session.is_null() {
            return std::ptr::null_mut();
        }
        let session = unsafe { &*session };
        to_c_string(session.inner.display_text())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn follower_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiFollowerResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn follower_free_result(result: *mut FfiFollowerResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.followers.is_null() && result.followers_len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    result.followers,
                    result.followers_len as usize,
                ))
            };
            for item in items.iter() {
                free_follower_fields(item);
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn follower_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
