// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The vertical fade mask generator: a linear opacity ramp between two
//! rows, flat above and below. Ported from `lv_draw_mask_fade`.

use crate::color::{mask_mix, Opa};
use crate::geom::IntRect;
use crate::stack::MaskRes;

/// A vertical linear opacity ramp.
#[derive(Copy, Clone, Debug)]
pub struct FadeParam {
    rect: IntRect,
    opa_top: Opa,
    opa_bottom: Opa,
    y_top: i32,
    y_bottom: i32,
}

impl FadeParam {
    /// `opa_top` holds above `y_top`, `opa_bottom` holds below `y_bottom`,
    /// and the two are linearly interpolated in between. Everything
    /// outside `rect` is left untouched.
    pub fn new(rect: IntRect, opa_top: Opa, opa_bottom: Opa, y_top: i32, y_bottom: i32) -> Self {
        FadeParam {
            rect,
            opa_top,
            opa_bottom,
            y_top,
            y_bottom,
        }
    }

    pub fn apply(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        if abs_y < self.rect.y1 || abs_y > self.rect.y2 {
            return MaskRes::FullCover;
        }
        if abs_x + len < self.rect.x1 || abs_x > self.rect.x2 {
            return MaskRes::FullCover;
        }

        let mut len = len;
        let mut buf_ofs = 0usize;

        if abs_x + len > self.rect.x2 {
            len -= abs_x + len - self.rect.x2 - 1;
        }

        let mut abs_x = abs_x;
        if abs_x < self.rect.x1 {
            let x_ofs = self.rect.x1 - abs_x;
            len -= x_ofs;
            buf_ofs += x_ofs as usize;
            abs_x = self.rect.x1;
        }
        let _ = abs_x;

        let span = &mut buf[buf_ofs..buf_ofs + len as usize];

        if abs_y <= self.y_top {
            for b in span.iter_mut() {
                *b = mask_mix(*b, self.opa_top);
            }
        } else if abs_y >= self.y_bottom {
            for b in span.iter_mut() {
                *b = mask_mix(*b, self.opa_bottom);
            }
        } else {
            let opa_diff = i32::from(self.opa_bottom) - i32::from(self.opa_top);
            let y_diff = self.y_bottom - self.y_top + 1;
            let term = ((abs_y - self.y_top) * opa_diff) / y_diff;
            let opa_act = (term as u8).wrapping_add(self.opa_top);
            for b in span.iter_mut() {
                *b = mask_mix(*b, opa_act);
            }
        }

        MaskRes::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_above_and_below() {
        let rect = IntRect::from_ltrb(0, 0, 9, 19).unwrap();
        let fade = FadeParam::new(rect, 255, 0, 5, 15);

        let mut buf = [0xFFu8; 10];
        fade.apply(&mut buf, 0, 2, 10);
        assert_eq!(buf, [255u8; 10]);

        let mut buf = [0xFFu8; 10];
        fade.apply(&mut buf, 0, 18, 10);
        assert_eq!(buf, [0u8; 10]);
    }

    #[test]
    fn midpoint_is_roughly_half() {
        let rect = IntRect::from_ltrb(0, 0, 9, 19).unwrap();
        let fade = FadeParam::new(rect, 255, 0, 5, 15);
        let mut buf = [0xFFu8; 10];
        fade.apply(&mut buf, 0, 10, 10);
        assert!((100..160).contains(&buf[0]));
    }

    #[test]
    fn outside_rect_is_untouched() {
        let rect = IntRect::from_ltrb(0, 0, 9, 19).unwrap();
        let fade = FadeParam::new(rect, 255, 0, 5, 15);
        let mut buf = [0xFFu8; 10];
        assert_eq!(fade.apply(&mut buf, 0, 25, 10), MaskRes::FullCover);
        assert_eq!(buf, [0xFFu8; 10]);
    }
}
