//! FFI bindings for Vitals Score
//!
//! This module provides C-compatible functions for calling the engine from other
//! languages. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `vitals_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::ComputeError;
use crate::pipeline::{health_score_json, health_score_range_json};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Shared body of the request/response entry points
unsafe fn call_json(
    request: *const c_char,
    compute: fn(String) -> Result<String, ComputeError>,
) -> *mut c_char {
    clear_last_error();

    let request = match cstr_to_string(request) {
        Some(s) => s,
        None => {
            set_last_error("Invalid request string pointer");
            return ptr::null_mut();
        }
    };

    match compute(request) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Compute the health score for one day.
///
/// `request` is a JSON object with `bp_readings`, `sleep_entries`,
/// `activities` and an optional `target_date` (YYYY-MM-DD, defaults to today).
///
/// # Safety
/// - `request` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `vitals_free_string`.
/// - Returns NULL on error; call `vitals_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn vitals_health_score(request: *const c_char) -> *mut c_char {
    call_json(request, health_score_json)
}

/// Compute one health score per day over a range, as a JSON array.
///
/// `request` takes the same fields as `vitals_health_score` plus optional
/// `start_date` and `end_date`.
///
/// # Safety
/// - `request` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `vitals_free_string`.
/// - Returns NULL on error; call `vitals_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn vitals_health_score_range(request: *const c_char) -> *mut c_char {
    call_json(request, health_score_range_json)
}

/// Free a string returned by Vitals Score functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Vitals Score function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn vitals_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Vitals Score call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn vitals_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn vitals_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
