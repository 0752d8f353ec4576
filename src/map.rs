// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The map mask generator: multiplies the running mask by an externally
//! supplied opacity raster. Ported from `lv_draw_mask_map`.

use crate::color::{mask_mix, Opa};
use crate::geom::IntRect;
use crate::stack::MaskRes;

/// A mask backed by a caller-owned, row-major opacity raster covering `rect`.
///
/// The raw pointer the original carries becomes a borrow: a `MapParam`
/// cannot outlive the raster it was built from.
#[derive(Copy, Clone, Debug)]
pub struct MapParam<'a> {
    rect: IntRect,
    map: &'a [Opa],
}

impl<'a> MapParam<'a> {
    /// `map` must hold exactly `rect.width() * rect.height()` bytes, one
    /// opacity value per pixel of `rect`, in row-major order.
    pub fn new(rect: IntRect, map: &'a [Opa]) -> Self {
        debug_assert_eq!(map.len(), (rect.width() * rect.height()) as usize);
        MapParam { rect, map }
    }

    pub fn apply(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        if abs_y < self.rect.y1 || abs_y > self.rect.y2 {
            return MaskRes::FullCover;
        }
        if abs_x + len < self.rect.x1 || abs_x > self.rect.x2 {
            return MaskRes::FullCover;
        }

        let map_w = self.rect.width();
        let mut map_ofs = (abs_y - self.rect.y1) as usize * map_w as usize;

        let mut len = len;
        let mut buf_ofs = 0usize;

        if abs_x + len > self.rect.x2 {
            len -= abs_x + len - self.rect.x2 - 1;
        }

        if abs_x < self.rect.x1 {
            let x_ofs = self.rect.x1 - abs_x;
            len -= x_ofs;
            buf_ofs += x_ofs as usize;
        } else {
            map_ofs += (abs_x - self.rect.x1) as usize;
        }

        for i in 0..len as usize {
            let idx = buf_ofs + i;
            buf[idx] = mask_mix(buf[idx], self.map[map_ofs + i]);
        }

        MaskRes::Changed
    }
}
