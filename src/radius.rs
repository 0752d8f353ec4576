// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The rounded-rectangle mask generator, combining a [`CircleTable`] at each
//! corner with straight edges elsewhere. Ported from `lv_draw_mask_radius`.

use crate::circle::{CircleTable, CircleTableCache};
use crate::color::{mask_mix, Opa};
use crate::geom::IntRect;
use crate::stack::MaskRes;

fn clamp_like(min: i32, v: i32, max: i32) -> i32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// A rounded-rectangle mask: either keeps the inside (`outer = false`) or
/// clears it (`outer = true`, used to cut rounded holes into a shape).
#[derive(Clone, Debug)]
pub struct RadiusParam {
    rect: IntRect,
    radius: i32,
    outer: bool,
    circle: CircleTable,
}

impl RadiusParam {
    /// `radius` is clamped to `[0, min(width, height) / 2]`, matching the
    /// original's `LV_MIN(radius, LV_MIN(width, height) / 2)`.
    ///
    /// `cache` lets many rects sharing a radius reuse the same circle
    /// descriptor instead of recomputing it on every call.
    pub fn new<const N: usize>(rect: IntRect, radius: i32, outer: bool, cache: &mut CircleTableCache<N>) -> Self {
        let max_r = rect.width().min(rect.height()) / 2;
        let radius = radius.clamp(0, max_r.max(0));
        let circle = if radius > 0 { cache.get(radius) } else { CircleTable::build(0) };

        RadiusParam {
            rect,
            radius,
            outer,
            circle,
        }
    }

    pub fn apply(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        let r = &self.rect;

        if self.outer {
            if abs_y < r.y1 || abs_y > r.y2 {
                return MaskRes::FullCover;
            }
        } else if abs_y < r.y1 || abs_y > r.y2 {
            return MaskRes::Transp;
        }

        let in_straight_band =
            (abs_x >= r.x1 + self.radius && abs_x + len <= r.x2 - self.radius) || (abs_y >= r.y1 + self.radius && abs_y <= r.y2 - self.radius);

        if in_straight_band {
            return if self.outer {
                self.straight_outer(buf, abs_x, len)
            } else {
                self.straight_inner(buf, abs_x, len)
            };
        }

        self.corner(buf, abs_x, abs_y, len)
    }

    fn straight_inner(&self, buf: &mut [Opa], abs_x: i32, len: i32) -> MaskRes {
        let r = &self.rect;
        let last = r.x1 - abs_x;
        if last > len {
            return MaskRes::Transp;
        }
        if last >= 0 {
            buf[0..last.min(len) as usize].fill(0);
        }

        let first = r.x2 - abs_x + 1;
        if first <= 0 {
            return MaskRes::Transp;
        }
        if first < len {
            buf[first as usize..len as usize].fill(0);
        }

        if last <= 0 && first >= len {
            MaskRes::FullCover
        } else {
            MaskRes::Changed
        }
    }

    fn straight_outer(&self, buf: &mut [Opa], abs_x: i32, len: i32) -> MaskRes {
        let r = &self.rect;
        let first = (r.x1 - abs_x).max(0);
        if first <= len {
            let last = (r.x2 - abs_x - first + 1).min(len - first);
            if last >= 0 {
                buf[first as usize..(first + last) as usize].fill(0);
            }
        }
        MaskRes::Changed
    }

    fn corner(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        let r = &self.rect;
        let k = r.x1 - abs_x;
        let w = r.width();
        let h = r.height();
        let local_x = abs_x - r.x1;
        let local_y = abs_y - r.y1;

        let cir_y = if local_y < self.radius {
            self.radius - local_y - 1
        } else {
            local_y - (h - self.radius)
        };

        let (aa_opa, x_start) = self.circle.get_next_line(cir_y);
        let aa_len = aa_opa.len() as i32;

        let cir_x_right = k + w - self.radius + x_start;
        let cir_x_left = k + self.radius - x_start - 1;

        if self.outer {
            for (i, &opa) in aa_opa.iter().rev().enumerate() {
                let i = i as i32;
                let opa = 255 - opa;
                let ir = cir_x_right + i;
                if ir >= 0 && ir < len {
                    buf[ir as usize] = mask_mix(buf[ir as usize], opa);
                }
                let il = cir_x_left - i;
                if il >= 0 && il < len {
                    buf[il as usize] = mask_mix(buf[il as usize], opa);
                }
            }

            let clr_start = clamp_like(0, cir_x_left + 1, (len - 1).max(0));
            let clr_len = clamp_like(0, cir_x_right - clr_start, len - clr_start);
            if clr_len > 0 {
                buf[clr_start as usize..(clr_start + clr_len) as usize].fill(0);
            }
        } else {
            for (i, &opa) in aa_opa.iter().rev().enumerate() {
                let i = i as i32;
                let ir = cir_x_right + i;
                if ir >= 0 && ir < len {
                    buf[ir as usize] = mask_mix(buf[ir as usize], opa);
                }
                let il = cir_x_left - i;
                if il >= 0 && il < len {
                    buf[il as usize] = mask_mix(buf[il as usize], opa);
                }
            }

            let right_clear = clamp_like(0, cir_x_right + aa_len, len);
            if right_clear < len {
                buf[right_clear as usize..len as usize].fill(0);
            }
            let left_clear = clamp_like(0, cir_x_left - aa_len + 1, len);
            if left_clear > 0 {
                buf[0..left_clear as usize].fill(0);
            }
        }

        MaskRes::Changed
    }
}
