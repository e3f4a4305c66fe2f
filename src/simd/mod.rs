// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/simd/mod.rs

/*
 * This module provides the SIMD Dispatcher for computer vision operations.
 * It selects the implementation (Native or Scalar) at compile-time
 * based on the target architecture and the "simd" feature flag.
 */

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
pub mod native;

/// Kernel implementation picked for this build.
#[cfg(all(target_arch = "x86_64", feature = "simd"))]
pub type DispatchCV = native::NativeCV;

/// Kernel implementation picked for this build.
#[cfg(not(all(target_arch = "x86_64", feature = "simd")))]
pub type DispatchCV = crate::cv::scalar::ScalarCV;
