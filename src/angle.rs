// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The angular wedge mask generator: keeps only the pixels between two
//! rays from a vertex. Ported from `lv_draw_mask_angle_init` and
//! `lv_draw_mask_angle`.
//!
//! The wedge is built from two [`LineParam`] half-planes. Where they
//! straddle the vertex's own row in a way a single half-plane answer can't
//! resolve, the original first checks whether the row is entirely on one
//! side of a ray from the angle value alone (without ever calling into the
//! line generator) and only falls back to it otherwise; that three-way
//! decision is `Unknown4` below, kept private: whether a given row needed
//! the fallback is never something a caller needs to know.

use crate::color::Opa;
use crate::fixed22_10;
use crate::geom::{IntPoint, Side};
use crate::line::LineParam;
use crate::stack::MaskRes;

/// A wedge spanning `start_angle..end_angle` degrees (clockwise from +x,
/// screen-down), clamped to `0..=359`.
#[derive(Copy, Clone, Debug)]
pub struct AngleParam {
    vertex: IntPoint,
    start_angle: i32,
    end_angle: i32,
    delta_deg: i32,
    start_line: LineParam,
    end_line: LineParam,
}

impl AngleParam {
    pub fn new(vertex_x: i32, vertex_y: i32, start_angle: i32, end_angle: i32) -> Self {
        let start_angle = start_angle.clamp(0, 359);
        let end_angle = end_angle.clamp(0, 359);

        let delta_deg = if end_angle < start_angle {
            360 - start_angle + end_angle
        } else {
            (end_angle - start_angle).abs()
        };

        let start_side = if start_angle < 180 { Side::Left } else { Side::Right };
        let end_side = if end_angle < 180 { Side::Right } else { Side::Left };

        let start_line = LineParam::from_angle(vertex_x, vertex_y, start_angle, start_side);
        let end_line = LineParam::from_angle(vertex_x, vertex_y, end_angle, end_side);

        AngleParam {
            vertex: IntPoint::new(vertex_x, vertex_y),
            start_angle,
            end_angle,
            delta_deg,
            start_line,
            end_line,
        }
    }

    pub fn apply(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        let start_in_upper = self.start_angle < 180;
        let end_in_upper = self.end_angle < 180;

        if start_in_upper && end_in_upper && self.start_angle != 0 && self.end_angle != 0 && self.start_angle > self.end_angle {
            self.apply_upper_wraparound(buf, abs_x, abs_y, len)
        } else if !start_in_upper && !end_in_upper && self.start_angle > self.end_angle {
            self.apply_lower_wraparound(buf, abs_x, abs_y, len)
        } else {
            self.apply_general(buf, abs_x, abs_y, len)
        }
    }

    fn adjusted_start_angle_last(&self, mut start_angle_last: i32) -> i32 {
        if self.start_angle > 270 && self.start_angle <= 359 && start_angle_last < 0 {
            start_angle_last = 0;
        } else if self.start_angle > 0 && self.start_angle <= 90 && start_angle_last < 0 {
            start_angle_last = 0;
        } else if self.start_angle > 90 && self.start_angle < 270 && start_angle_last > 0 {
            start_angle_last = 0;
        }

        if self.end_angle > 270 && self.end_angle <= 359 && start_angle_last < 0 {
            start_angle_last = 0;
        } else if self.end_angle > 0 && self.end_angle <= 90 && start_angle_last < 0 {
            start_angle_last = 0;
        } else if self.end_angle > 90 && self.end_angle < 270 && start_angle_last > 0 {
            start_angle_last = 0;
        }

        start_angle_last
    }

    fn apply_upper_wraparound(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        if abs_y < self.vertex.y {
            return MaskRes::FullCover;
        }

        let rel_y = abs_y - self.vertex.y;
        let rel_x = abs_x - self.vertex.x;

        let end_angle_first = fixed22_10::mul_shift(self.end_line_xy_steep(), rel_y);
        let mut start_angle_last = fixed22_10::mul_shift(self.start_line_xy_steep(), rel_y + 1);
        start_angle_last = self.adjusted_start_angle_last(start_angle_last);

        let dist = (end_angle_first - start_angle_last) >> 1;
        let split = (start_angle_last + dist - rel_x).clamp(0, len);

        self.split_apply(buf, abs_x, abs_y, len, split, &self.start_line, &self.end_line)
    }

    fn apply_lower_wraparound(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        if abs_y > self.vertex.y {
            return MaskRes::FullCover;
        }

        let rel_y = abs_y - self.vertex.y;
        let rel_x = abs_x - self.vertex.x;

        let end_angle_first = fixed22_10::mul_shift(self.end_line_xy_steep(), rel_y);
        let mut start_angle_last = fixed22_10::mul_shift(self.start_line_xy_steep(), rel_y + 1);
        start_angle_last = self.adjusted_start_angle_last(start_angle_last);

        let dist = (end_angle_first - start_angle_last) >> 1;
        let split = (start_angle_last + dist - rel_x).clamp(0, len);

        // The start-angle mask only makes sense past where the end-angle
        // mask ends, so they run in the opposite order from the upper case.
        self.split_apply(buf, abs_x, abs_y, len, split, &self.end_line, &self.start_line)
    }

    fn split_apply(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32, split: i32, first: &LineParam, second: &LineParam) -> MaskRes {
        let mut res1 = MaskRes::FullCover;
        let mut res2 = MaskRes::FullCover;

        if split > 0 {
            res1 = first.apply(&mut buf[0..split as usize], abs_x, abs_y, split);
            if res1 == MaskRes::Transp {
                buf[0..split as usize].fill(0);
            }
        }

        let rest = len - split;
        if rest > 0 {
            res2 = second.apply(&mut buf[split as usize..len as usize], abs_x + split, abs_y, rest);
            if res2 == MaskRes::Transp {
                buf[split as usize..len as usize].fill(0);
            }
        }

        if res1 == MaskRes::Transp && res2 == MaskRes::Transp {
            MaskRes::Transp
        } else if res1 == MaskRes::FullCover && res2 == MaskRes::FullCover {
            MaskRes::FullCover
        } else {
            MaskRes::Changed
        }
    }

    fn apply_general(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        let below_vertex = abs_y < self.vertex.y;

        let res1 = if self.start_angle == 180 {
            if below_vertex {
                Unknown4::FullCover
            } else {
                Unknown4::Unknown
            }
        } else if self.start_angle == 0 {
            if below_vertex {
                Unknown4::Unknown
            } else {
                Unknown4::FullCover
            }
        } else if (self.start_angle < 180 && below_vertex) || (self.start_angle > 180 && !below_vertex) {
            Unknown4::Unknown
        } else {
            Unknown4::from(self.start_line.apply(buf, abs_x, abs_y, len))
        };

        let res2 = if self.end_angle == 180 {
            if below_vertex {
                Unknown4::Unknown
            } else {
                Unknown4::FullCover
            }
        } else if self.end_angle == 0 {
            if below_vertex {
                Unknown4::FullCover
            } else {
                Unknown4::Unknown
            }
        } else if (self.end_angle < 180 && below_vertex) || (self.end_angle > 180 && !below_vertex) {
            Unknown4::Unknown
        } else {
            Unknown4::from(self.end_line.apply(buf, abs_x, abs_y, len))
        };

        if res1 == Unknown4::Transp || res2 == Unknown4::Transp {
            MaskRes::Transp
        } else if res1 == Unknown4::Unknown && res2 == Unknown4::Unknown {
            MaskRes::Transp
        } else if res1 == Unknown4::FullCover && res2 == Unknown4::FullCover {
            MaskRes::FullCover
        } else {
            MaskRes::Changed
        }
    }

    fn start_line_xy_steep(&self) -> i32 {
        self.start_line.xy_steep()
    }

    fn end_line_xy_steep(&self) -> i32 {
        self.end_line.xy_steep()
    }

    pub fn delta_deg(&self) -> i32 {
        self.delta_deg
    }
}

/// A tri-state-plus-`Unknown` result, used only while combining the two
/// rays of a wedge; never surfaced past [`AngleParam::apply`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Unknown4 {
    Transp,
    FullCover,
    Changed,
    Unknown,
}

impl From<MaskRes> for Unknown4 {
    fn from(res: MaskRes) -> Self {
        match res {
            MaskRes::Transp => Unknown4::Transp,
            MaskRes::FullCover => Unknown4::FullCover,
            MaskRes::Changed => Unknown4::Changed,
        }
    }
}
