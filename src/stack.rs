// Copyright 2020 Evgeniy Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The mask stack: an ordered collection of mask generators folded together
//! scanline by scanline.
//!
//! Ported from `lv_draw_mask_add` / `lv_draw_mask_apply` /
//! `lv_draw_mask_remove_id` / `lv_draw_mask_remove_custom` /
//! `lv_draw_mask_get_cnt`. The original keeps one process-wide array of
//! `lv_draw_mask_saved_t` slots and relies on "no live slot follows a null
//! one" so that `apply` can stop at the first empty slot it meets; here the
//! stack is an owned, sized value and `apply` always walks every slot,
//! which removes that invariant rather than documenting it (spec.md §9).

use crate::angle::AngleParam;
use crate::color::Opa;
use crate::fade::FadeParam;
use crate::line::LineParam;
use crate::map::MapParam;
use crate::radius::RadiusParam;

/// The outcome of folding one mask (or the whole stack) over a scanline span.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MaskRes {
    /// The whole span is fully masked out; callers should skip drawing it.
    Transp,
    /// The whole span is left untouched; `buf` was not written to.
    FullCover,
    /// `buf` was modified and must be used as-is.
    Changed,
}

/// A slot's external identity, used by [`MaskStack::remove_custom`] to drop
/// every mask added on behalf of one caller (e.g. a widget being deleted)
/// without tracking individual slot indices.
pub type CustomId = u32;

/// A caller id meaning "not tied to any custom owner".
pub const NO_CUSTOM_ID: CustomId = 0;

/// One mask generator, dispatched to by [`MaskStack::apply`].
///
/// The C original stores a function pointer alongside a `void *` parameter
/// blob in each stack slot; an enum plays the same role here without the
/// unsafe downcast.
#[derive(Clone, Debug)]
pub enum MaskParam<'a> {
    Line(LineParam),
    Angle(AngleParam),
    Radius(RadiusParam),
    Fade(FadeParam),
    Map(MapParam<'a>),
}

impl<'a> MaskParam<'a> {
    /// Evaluates this one mask over `buf[0..len]`, whose pixels start at
    /// `(abs_x, abs_y)` in the same coordinate space the mask was built in.
    pub fn apply(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        match self {
            MaskParam::Line(p) => p.apply(buf, abs_x, abs_y, len),
            MaskParam::Angle(p) => p.apply(buf, abs_x, abs_y, len),
            MaskParam::Radius(p) => p.apply(buf, abs_x, abs_y, len),
            MaskParam::Fade(p) => p.apply(buf, abs_x, abs_y, len),
            MaskParam::Map(p) => p.apply(buf, abs_x, abs_y, len),
        }
    }
}

/// A fixed-capacity, insertion-ordered stack of mask generators.
///
/// `N` bounds how many masks can be active at once; [`DefaultMaskStack`]
/// picks 16, matching the original's `_LV_MASK_MAX_NUM`.
pub struct MaskStack<'a, const N: usize> {
    slots: [Option<(MaskParam<'a>, CustomId)>; N],
}

/// A [`MaskStack`] sized like the original LVGL build (16 concurrent masks).
pub type DefaultMaskStack<'a> = MaskStack<'a, 16>;

impl<'a, const N: usize> Default for MaskStack<'a, N> {
    fn default() -> Self {
        MaskStack::new()
    }
}

impl<'a, const N: usize> MaskStack<'a, N> {
    pub fn new() -> Self {
        MaskStack {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Adds a mask, returning the slot id it was assigned.
    ///
    /// Returns `None` and logs a warning if the stack is already full,
    /// mirroring the original's `LV_LOG_WARN("no place to add the mask")`.
    pub fn add(&mut self, param: MaskParam<'a>, custom_id: CustomId) -> Option<usize> {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some((param, custom_id));
                return Some(i);
            }
        }

        log::warn!("mask stack is full ({N} slots in use), dropping new mask");
        None
    }

    /// Removes the mask at `id`, if any, returning it.
    pub fn remove_id(&mut self, id: usize) -> Option<MaskParam<'a>> {
        self.slots.get_mut(id)?.take().map(|(p, _)| p)
    }

    /// Removes every mask tagged with `custom_id`, returning the last one
    /// removed (in slot order), if any.
    pub fn remove_custom(&mut self, custom_id: CustomId) -> Option<MaskParam<'a>> {
        let mut last = None;
        for slot in self.slots.iter_mut() {
            let hit = matches!(slot, Some((_, id)) if *id == custom_id);
            if hit {
                last = slot.take().map(|(p, _)| p);
            }
        }
        last
    }

    /// The number of masks currently on the stack.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Folds every active mask over one scanline span.
    ///
    /// Short-circuits to [`MaskRes::Transp`] the moment any mask reports
    /// the span is fully masked out; otherwise returns [`MaskRes::Changed`]
    /// if at least one mask touched `buf`, and [`MaskRes::FullCover`] if
    /// the stack is empty or every mask left it untouched.
    pub fn apply(&self, buf: &mut [Opa], abs_x: i32, abs_y: i32, len: i32) -> MaskRes {
        let mut changed = false;
        for slot in self.slots.iter() {
            if let Some((param, _)) = slot {
                match param.apply(buf, abs_x, abs_y, len) {
                    MaskRes::Transp => return MaskRes::Transp,
                    MaskRes::Changed => changed = true,
                    MaskRes::FullCover => {}
                }
            }
        }

        if changed {
            MaskRes::Changed
        } else {
            MaskRes::FullCover
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fade::FadeParam;
    use crate::geom::IntRect;

    fn dummy_fade() -> MaskParam<'static> {
        let rect = IntRect::from_ltrb(0, 0, 9, 9).unwrap();
        MaskParam::Fade(FadeParam::new(rect, 255, 0, 0, 9))
    }

    #[test]
    fn insertion_order_does_not_affect_the_result() {
        let mut a: MaskStack<4> = MaskStack::new();
        let ida = a.add(dummy_fade(), NO_CUSTOM_ID).unwrap();
        let _ = a.add(dummy_fade(), NO_CUSTOM_ID).unwrap();
        a.remove_id(ida);

        let mut b: MaskStack<4> = MaskStack::new();
        let _ = b.add(dummy_fade(), NO_CUSTOM_ID).unwrap();

        let mut buf_a = [0xFFu8; 10];
        let mut buf_b = [0xFFu8; 10];
        a.apply(&mut buf_a, 0, 5, 10);
        b.apply(&mut buf_b, 0, 5, 10);
        assert_eq!(buf_a, buf_b);
    }

    #[test]
    fn remove_custom_drops_every_tagged_slot_and_returns_the_last_one() {
        let mut s: MaskStack<4> = MaskStack::new();
        s.add(dummy_fade(), 7).unwrap();
        let id_last = s.add(dummy_fade(), 7).unwrap();
        s.add(dummy_fade(), 9).unwrap();
        let removed = s.remove_custom(7);
        assert!(matches!(removed, Some(MaskParam::Fade(_))));
        assert_eq!(s.count(), 1);
        assert!(s.remove_id(id_last).is_none(), "slot was already nulled by remove_custom");
    }

    #[test]
    fn full_stack_logs_and_refuses() {
        let mut s: MaskStack<1> = MaskStack::new();
        assert!(s.add(dummy_fade(), NO_CUSTOM_ID).is_some());
        assert!(s.add(dummy_fade(), NO_CUSTOM_ID).is_none());
    }

    #[test]
    fn empty_stack_is_full_cover() {
        let s: MaskStack<4> = MaskStack::new();
        let mut buf = [0xFFu8; 10];
        assert_eq!(s.apply(&mut buf, 0, 0, 10), MaskRes::FullCover);
    }
}
