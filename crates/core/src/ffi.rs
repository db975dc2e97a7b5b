//! C ABI over [`Detector`] for embedding in mobile and desktop hosts.
//!
//! Every function returns a status code; detector handles are owned by the
//! caller and released with [`hgr_detector_free`]. Panics are caught before
//! they reach the host and reported as [`HGR_ERR_PANIC`].

use std::panic::{self, AssertUnwindSafe};
use std::slice;

use crate::classification::domain::operating_mode::OperatingMode;
use crate::pipeline::detector::Detector;
use crate::shared::error::DetectorError;
use crate::shared::frame::{validate_layout, Frame, PixelFormat};

pub const HGR_OK: i32 = 0;
pub const HGR_ERR_NULL: i32 = -1;
pub const HGR_ERR_INVALID_IMAGE: i32 = -2;
pub const HGR_ERR_UNSUPPORTED_MODE: i32 = -3;
pub const HGR_ERR_BUFFER_TOO_SMALL: i32 = -4;
pub const HGR_ERR_PANIC: i32 = -5;

fn status(err: &DetectorError) -> i32 {
    match err {
        DetectorError::InvalidImageFormat(_) => HGR_ERR_INVALID_IMAGE,
        DetectorError::UnsupportedMode(_) => HGR_ERR_UNSUPPORTED_MODE,
    }
}

/// Runs `body`, mapping an unwinding panic to [`HGR_ERR_PANIC`].
fn guarded(body: impl FnOnce() -> i32) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(code) => code,
        Err(_) => {
            log::error!("Panic caught at the C boundary");
            HGR_ERR_PANIC
        }
    }
}

/// Null with zero length is an empty buffer; null with a length is an error.
unsafe fn input<'a>(data: *const u8, len: usize) -> Option<&'a [u8]> {
    if data.is_null() {
        (len == 0).then_some(&[][..])
    } else {
        Some(slice::from_raw_parts(data, len))
    }
}

#[no_mangle]
pub extern "C" fn hgr_detector_new() -> *mut Detector {
    Box::into_raw(Box::new(Detector::new()))
}

/// # Safety
/// `detector` must be null or a handle from [`hgr_detector_new`] that has not
/// been freed.
#[no_mangle]
pub unsafe extern "C" fn hgr_detector_free(detector: *mut Detector) {
    if !detector.is_null() {
        drop(Box::from_raw(detector));
    }
}

/// Runs detection on `data` and writes the annotated image into `out`,
/// which must hold at least `width * height * channels` bytes.
///
/// # Safety
/// `detector` must be a live handle. `data` must be valid for `len` bytes
/// and `out` valid for writes of `out_len` bytes.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn hgr_detector_detect(
    detector: *mut Detector,
    data: *const u8,
    len: usize,
    width: u32,
    height: u32,
    format: i32,
    mode: i32,
    out: *mut u8,
    out_len: usize,
) -> i32 {
    let body = || {
        detect_into(
            detector,
            data,
            len,
            width,
            height,
            format,
            mode,
            out,
            out_len,
        )
    };
    guarded(body)
}

#[allow(clippy::too_many_arguments)]
unsafe fn detect_into(
    detector: *mut Detector,
    data: *const u8,
    len: usize,
    width: u32,
    height: u32,
    format: i32,
    mode: i32,
    out: *mut u8,
    out_len: usize,
) -> i32 {
    let Some(detector) = detector.as_mut() else {
        return HGR_ERR_NULL;
    };
    let Some(data) = input(data, len) else {
        return HGR_ERR_NULL;
    };
    if out.is_null() {
        return HGR_ERR_NULL;
    }

    let format = match PixelFormat::try_from(format) {
        Ok(format) => format,
        Err(e) => return status(&e),
    };
    if let Err(e) = validate_layout(data.len(), width, height, format) {
        return status(&e);
    }
    if let Err(e) = OperatingMode::try_from(mode) {
        return status(&e);
    }
    if out_len < data.len() {
        return HGR_ERR_BUFFER_TOO_SMALL;
    }

    match detector.detect_gesture_raw(data, width, height, format, mode) {
        Ok(frame) => {
            let bytes = frame.data();
            slice::from_raw_parts_mut(out, bytes.len()).copy_from_slice(bytes);
            HGR_OK
        }
        Err(e) => status(&e),
    }
}

/// Last verdict code (0 none, 1 left, 2 right), or -1 for a null handle.
///
/// # Safety
/// `detector` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn hgr_detector_gesture_type(detector: *const Detector) -> i32 {
    match detector.as_ref() {
        Some(detector) => detector.gesture_type().code(),
        None => HGR_ERR_NULL,
    }
}

/// Installs a background reference; a null `data` clears it.
///
/// # Safety
/// `detector` must be a live handle and `data` null or valid for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn hgr_detector_set_background(
    detector: *mut Detector,
    data: *const u8,
    len: usize,
    width: u32,
    height: u32,
    format: i32,
) -> i32 {
    let body = || install_background(detector, data, len, width, height, format);
    guarded(body)
}

unsafe fn install_background(
    detector: *mut Detector,
    data: *const u8,
    len: usize,
    width: u32,
    height: u32,
    format: i32,
) -> i32 {
    let Some(detector) = detector.as_mut() else {
        return HGR_ERR_NULL;
    };
    if data.is_null() {
        return match detector.set_background(None) {
            Ok(()) => HGR_OK,
            Err(e) => status(&e),
        };
    }

    let data = slice::from_raw_parts(data, len).to_vec();
    let result = PixelFormat::try_from(format)
        .and_then(|format| Frame::new(data, width, height, format))
        .and_then(|frame| detector.set_background(Some(&frame)));
    match result {
        Ok(()) => HGR_OK,
        Err(e) => status(&e),
    }
}
