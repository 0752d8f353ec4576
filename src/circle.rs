// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Precomputed anti-aliased quarter-circle edge descriptors, shared by the
//! radius mask generator.
//!
//! Ported from `cir_calc_aa4` and the `lv_circ_init`/`lv_circ_cont`/
//! `lv_circ_next` Bresenham helpers in `lv_draw_mask.c`. The 4x-oversampled
//! midpoint circle algorithm there is reused verbatim; what changes is the
//! storage: the original keeps one static `cir_size <= 300` buffer that every
//! radius overwrites in place (and never terminates its last row, relying on
//! the array having been zeroed once at startup). Here each call builds an
//! owned, explicitly-terminated table, and [`CircleTableCache`] gives callers
//! back the reuse-across-same-radius behavior the static buffer used to.

use arrayvec::ArrayVec;

use crate::color::Opa;

/// Radii above this are clamped (and a warning logged) rather than risking
/// an overrun of the scratch buffers below. LVGL's own default build caps
/// `cir_size` at 300 entries, which covers radii up to a little over 180;
/// 180 is kept here as the documented ceiling rather than inherited as an
/// unexplained buffer size.
pub const MAX_RADIUS: i32 = 180;

const MAX_CIRCLE_ENTRIES: usize = 512;
const MAX_ROWS: usize = MAX_RADIUS as usize + 2;

/// One row of the 4x-oversampled Bresenham circle, before the final
/// antialiasing correction is folded in.
struct CircPoint {
    x: i32,
    y: i32,
    tmp: i32,
}

impl CircPoint {
    fn init(radius: i32) -> Self {
        CircPoint {
            x: radius,
            y: 0,
            tmp: 1 - radius,
        }
    }

    fn cont(&self) -> bool {
        self.y <= self.x
    }

    fn next(&mut self) {
        if self.tmp <= 0 {
            self.tmp += 2 * self.y + 3;
        } else {
            self.tmp += 2 * (self.y - self.x) + 5;
            self.x -= 1;
        }
        self.y += 1;
    }
}

/// An antialiased quarter-circle edge, as a per-row opacity run plus the
/// leftmost column each row starts at.
#[derive(Clone, Debug)]
pub struct CircleTable {
    radius: i32,
    opa: ArrayVec<Opa, MAX_CIRCLE_ENTRIES>,
    x_start_on_y: ArrayVec<i32, MAX_ROWS>,
    /// Index into `opa` where each row begins; one extra trailing entry
    /// (equal to `opa.len()`) closes off the last row.
    opa_start_on_y: ArrayVec<u16, MAX_ROWS>,
}

impl CircleTable {
    /// Builds the quarter-circle descriptor for `radius`. `radius <= 0`
    /// yields an empty table (the straight-edge fast path never consults it).
    pub fn build(radius: i32) -> Self {
        let radius = if radius > MAX_RADIUS {
            log::warn!("radius {radius} exceeds the supported maximum {MAX_RADIUS}, clamping");
            MAX_RADIUS
        } else {
            radius
        };

        let mut table = CircleTable {
            radius,
            opa: ArrayVec::new(),
            x_start_on_y: ArrayVec::new(),
            opa_start_on_y: ArrayVec::new(),
        };

        if radius <= 0 {
            return table;
        }

        let mut cir_x: ArrayVec<i32, MAX_CIRCLE_ENTRIES> = ArrayVec::new();
        let mut cir_y: ArrayVec<i32, MAX_CIRCLE_ENTRIES> = ArrayVec::new();
        let mut opa_scratch: ArrayVec<i32, MAX_CIRCLE_ENTRIES> = ArrayVec::new();

        fn push(
            cir_x: &mut ArrayVec<i32, MAX_CIRCLE_ENTRIES>,
            cir_y: &mut ArrayVec<i32, MAX_CIRCLE_ENTRIES>,
            opa_scratch: &mut ArrayVec<i32, MAX_CIRCLE_ENTRIES>,
            radius: i32,
            x: i32,
            y: i32,
            o: i32,
        ) -> bool {
            if cir_x.try_push(x).is_err() {
                log::warn!("circle table for radius {radius} exceeded its scratch capacity");
                return false;
            }
            let _ = cir_y.try_push(y);
            let _ = opa_scratch.try_push(o);
            true
        }

        let mut cp = CircPoint::init(radius * 4);
        let mut y_8th_cnt = 0i32;
        let mut i_start = 1usize;
        let mut x_int = [cp.x >> 2, 0, 0, 0];
        let mut x_fract = [0i32; 4];

        'outer: while cp.cont() {
            let mut i = i_start;
            while i < 4 && cp.cont() {
                cp.next();
                x_int[i] = cp.x >> 2;
                x_fract[i] = cp.x & 0x3;
                i += 1;
            }
            if i != 4 {
                break;
            }

            let ok = if x_int[0] == x_int[3] {
                let o = x_fract[0]
                    + x_fract[1]
                    + x_fract[2]
                    + x_fract[3]
                    + (x_fract[0] - x_fract[1] + 1) / 2
                    + (x_fract[1] - x_fract[2] + 1) / 2
                    + (x_fract[2] - x_fract[3] + 1) / 2;
                push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, x_int[0], y_8th_cnt, o * 16)
            } else if x_int[0] != x_int[1] {
                let o0 = x_fract[0] * 16;
                let o1 = (4 + x_fract[1]
                    + x_fract[2]
                    + x_fract[3]
                    + (x_fract[1] - x_fract[2] + 1) / 2
                    + (x_fract[2] - x_fract[3] + 1) / 2)
                    * 16;
                push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, x_int[0], y_8th_cnt, o0)
                    && push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, x_int[0] - 1, y_8th_cnt, o1)
            } else if x_int[0] != x_int[2] {
                let o0 = (x_fract[0] + x_fract[1] + (x_fract[0] - x_fract[1] + 1) / 2) * 16;
                let o1 = (2 * 4 + x_fract[2] + x_fract[3] + (x_fract[2] - x_fract[3] + 1) / 2) * 16;
                push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, x_int[0], y_8th_cnt, o0)
                    && push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, x_int[0] - 1, y_8th_cnt, o1)
            } else {
                let o0 = (x_fract[0]
                    + x_fract[1]
                    + x_fract[2]
                    + (x_fract[0] - x_fract[1] + 1) / 2
                    + (x_fract[1] - x_fract[2] + 1) / 2)
                    * 16;
                let o1 = (3 * 4 + x_fract[3]) * 16;
                push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, x_int[0], y_8th_cnt, o0)
                    && push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, x_int[0] - 1, y_8th_cnt, o1)
            };
            if !ok {
                break 'outer;
            }

            y_8th_cnt += 1;
            i_start = 0;
        }

        let mid = radius * 723;
        let mid_int = mid >> 10;
        let last = cir_x.len().checked_sub(1);
        let needs_mid = match last {
            Some(i) => cir_x[i] != mid_int || cir_y[i] != mid_int,
            None => true,
        };
        if needs_mid {
            let frac = mid - (mid_int << 10);
            let extra = if frac <= 512 {
                (frac * frac * 2) >> (10 + 6)
            } else {
                let t = 1024 - frac;
                15 - ((t * t * 2) >> 16)
            };
            push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, mid_int, mid_int, extra * 16);
        }

        let cir_size = cir_x.len();
        if cir_size >= 2 {
            let i_start = cir_size - 2;
            for i in (0..=i_start).rev() {
                let (nx, ny, no) = (cir_y[i], cir_x[i], opa_scratch[i]);
                if !push(&mut cir_x, &mut cir_y, &mut opa_scratch, radius, nx, ny, no) {
                    break;
                }
            }
        }

        let cir_size = cir_x.len();
        let mut y = 0i32;
        let mut i = 0usize;
        while i < cir_size {
            if table.opa_start_on_y.try_push(i as u16).is_err() {
                log::warn!("circle table for radius {radius} exceeded its row capacity");
                break;
            }
            let mut xs = cir_x[i];
            while i < cir_size && cir_y[i] == y {
                xs = xs.min(cir_x[i]);
                i += 1;
            }
            let _ = table.x_start_on_y.try_push(xs);
            y += 1;
        }
        let _ = table.opa_start_on_y.try_push(cir_size as u16);

        for o in opa_scratch.iter() {
            if table.opa.try_push(*o as Opa).is_err() {
                log::warn!("circle table for radius {radius} exceeded its opacity capacity");
                break;
            }
        }

        table
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// The opacity run and leftmost column for row `cir_y` (0 at the arc's
    /// flattest point, increasing toward the 45° midpoint). Returns an
    /// empty run past the last row this table has data for.
    pub fn get_next_line(&self, cir_y: i32) -> (&[Opa], i32) {
        if cir_y < 0 || cir_y as usize + 1 >= self.opa_start_on_y.len() {
            return (&[], 0);
        }
        let y = cir_y as usize;
        let start = self.opa_start_on_y[y] as usize;
        let end = self.opa_start_on_y[y + 1] as usize;
        (&self.opa[start..end], self.x_start_on_y[y])
    }
}

/// A small LRU of [`CircleTable`]s, replacing the single static descriptor
/// slot the C original keeps. `radius_init` calls use this so that many
/// rounded rects sharing a radius only build the table once.
pub struct CircleTableCache<const N: usize> {
    entries: ArrayVec<CircleTable, N>,
}

impl<const N: usize> Default for CircleTableCache<N> {
    fn default() -> Self {
        CircleTableCache::new()
    }
}

impl<const N: usize> CircleTableCache<N> {
    pub fn new() -> Self {
        CircleTableCache {
            entries: ArrayVec::new(),
        }
    }

    /// Returns a clone of the table for `radius`, building and caching it
    /// first if it is not already present. The least recently fetched
    /// entry is evicted when the cache is full.
    pub fn get(&mut self, radius: i32) -> CircleTable {
        if let Some(pos) = self.entries.iter().position(|t| t.radius() == radius) {
            let table = self.entries.remove(pos);
            let clone = table.clone();
            self.entries.push(table);
            return clone;
        }

        let table = CircleTable::build(radius);
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(table.clone());
        table
    }
}

/// A [`CircleTableCache`] sized like the original's single-slot cache, with
/// enough headroom to avoid thrashing under a handful of distinct radii.
pub type DefaultCircleTableCache = CircleTableCache<8>;
