// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! 22.10 fixed point: an `i32` encodes the rational `v / 1024`.
//!
//! Used for line slopes: integer coordinates stay exact while the slope
//! itself carries ten fractional bits, which is enough precision for the
//! one-pixel-wide antialiasing band the line generator produces.

/// A 22.10 fixed-point value: `raw / ONE` is the represented rational.
pub type F22Dot10 = i32;

pub const ONE: F22Dot10 = 1 << 10;

/// `(1 << 20) / d`, the reciprocal used to build a slope without ever
/// dividing by a coordinate delta more than once.
///
/// Returns `None` when `d == 0` (the line has no extent on that axis).
#[inline]
pub fn reciprocal(d: i32) -> Option<i32> {
    if d == 0 {
        None
    } else {
        Some((1i64 << 20) as i32 / d)
    }
}

/// Builds the 22.10 slope of `dy` over a unit `dx` given `dx`'s reciprocal
/// (see [`reciprocal`]): `(reciprocal(dx) * dy) >> 10`.
#[inline]
pub fn slope(recip: i32, d: i32) -> F22Dot10 {
    ((recip as i64 * d as i64) >> 10) as i32
}

/// `(steep * v) >> 10` — projects an integer coordinate through a 22.10 slope.
#[inline]
pub fn mul_shift(steep: F22Dot10, v: i32) -> i32 {
    ((steep as i64 * v as i64) >> 10) as i32
}
