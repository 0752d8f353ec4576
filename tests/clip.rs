//! Integration tests for the concrete scanline scenarios the mask
//! generators are specified against, exercised through their public API
//! the way a blitter would call them: `buf` pre-filled to `OPA_OPAQUE`,
//! one `apply()` per scanline.

use maskstack::{
    AngleParam, DefaultCircleTableCache, FadeParam, IntRect, LineParam, MapParam, MaskParam,
    MaskRes, MaskStack, RadiusParam, Side, OPA_OPAQUE,
};

#[test]
fn rect_mask_sharp_corners_clips_a_straight_row() {
    // S1: rect (0,0)-(9,9), r=0, inner; scanline x=-2, y=5, len=14.
    let mut cache = DefaultCircleTableCache::new();
    let rect = IntRect::from_ltrb(0, 0, 9, 9).unwrap();
    let radius = RadiusParam::new(rect, 0, false, &mut cache);

    let mut buf = [OPA_OPAQUE; 14];
    let res = radius.apply(&mut buf, -2, 5, 14);

    assert_eq!(res, MaskRes::Changed);
    assert_eq!(
        buf,
        [0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 0, 0]
    );
}

#[test]
fn rect_mask_rounded_corners_are_symmetric_and_partial_at_the_aa_band() {
    // S2: same rect with r=3, inner; scanline (x=0, y=0, len=10).
    let mut cache = DefaultCircleTableCache::new();
    let rect = IntRect::from_ltrb(0, 0, 9, 9).unwrap();
    let radius = RadiusParam::new(rect, 3, false, &mut cache);

    let mut buf = [OPA_OPAQUE; 10];
    let res = radius.apply(&mut buf, 0, 0, 10);

    assert_eq!(res, MaskRes::Changed);
    assert_eq!(buf[0], 0);
    assert_eq!(buf[9], 0);
    assert!((1..255).contains(&buf[1]));
    assert!((1..255).contains(&buf[8]));
    assert_eq!(buf[1], buf[8], "the left and right AA bands must be mirror images");
    assert_eq!(buf[4], 255, "pixel 4 is deep in the straight middle band");
    assert_eq!(buf[5], 255, "pixel 5 is deep in the straight middle band");
}

#[test]
fn horizontal_line_bottom_side_excludes_the_line_itself() {
    // S3: horizontal line (0,5)-(10,5), side=BOTTOM.
    let line = LineParam::from_points(0, 5, 10, 5, Side::Bottom);

    let mut buf = [OPA_OPAQUE; 10];
    assert_eq!(line.apply(&mut buf, 0, 4, 10), MaskRes::FullCover);

    let mut buf = [OPA_OPAQUE; 10];
    assert_eq!(line.apply(&mut buf, 0, 6, 10), MaskRes::Transp);

    let mut buf = [OPA_OPAQUE; 10];
    assert_eq!(line.apply(&mut buf, 0, 5, 10), MaskRes::Transp);
}

#[test]
fn diagonal_line_left_side_matches_the_specified_profile() {
    // S4: line (0,0)-(10,10), side=LEFT; scanline y=5, x=0, len=11.
    let line = LineParam::from_points(0, 0, 10, 10, Side::Left);

    let mut buf = [OPA_OPAQUE; 11];
    let res = line.apply(&mut buf, 0, 5, 11);

    assert_eq!(res, MaskRes::Changed);
    for i in 0..5 {
        assert_eq!(buf[i], 255, "pixel {i} is fully on the kept side");
    }
    assert!((112..=144).contains(&buf[5]), "pixel 5 straddles the line, got {}", buf[5]);
    for i in 6..11 {
        assert_eq!(buf[i], 0, "pixel {i} is fully on the excluded side");
    }
}

#[test]
fn fade_midpoint_is_half_opacity() {
    // S5: fade over (0,0)-(0,10), opa_top=0, opa_bottom=255, y_top=0, y_bottom=10.
    let rect = IntRect::from_ltrb(0, 0, 0, 10).unwrap();
    let fade = FadeParam::new(rect, 0, 255, 0, 10);

    let mut buf = [OPA_OPAQUE; 1];
    let res = fade.apply(&mut buf, 0, 5, 1);

    assert_eq!(res, MaskRes::Changed);
    assert!((120..=136).contains(&buf[0]), "got {}", buf[0]);
}

#[test]
fn wedge_clips_to_a_band_centered_on_the_bisector() {
    // S6: vertex (50,50), start=30deg, end=60deg; scanline y=80 (below the vertex).
    let angle = AngleParam::new(50, 50, 30, 60);

    let mut buf = [OPA_OPAQUE; 200];
    let res = angle.apply(&mut buf, 0, 80, 200);
    assert!(res == MaskRes::Changed || res == MaskRes::FullCover);

    // 30 rows below the vertex, the 30deg ray crosses at x=50+30*cot(30)=~102
    // and the 60deg ray at x=50+30*cot(60)=~67; everywhere well outside that
    // band must be fully masked out.
    assert_eq!(buf[0], 0, "far outside the wedge must be fully masked");
    assert_eq!(buf[199], 0, "far outside the wedge must be fully masked");
    assert!(buf[80] > 0, "x=80 lies inside the wedge band, got {}", buf[80]);
}

#[test]
fn map_mask_multiplies_in_the_external_raster() {
    let rect = IntRect::from_ltrb(0, 0, 3, 0).unwrap();
    let raster = [255u8, 128, 0, 64];
    let map = MapParam::new(rect, &raster);

    let mut buf = [OPA_OPAQUE; 4];
    assert_eq!(map.apply(&mut buf, 0, 0, 4), MaskRes::Changed);
    assert_eq!(buf, [255, 128, 0, 64]);
}

#[test]
fn stack_combines_a_rounded_rect_and_a_diagonal_line() {
    let mut cache = DefaultCircleTableCache::new();
    let rect = IntRect::from_ltrb(0, 0, 19, 19).unwrap();
    let radius = RadiusParam::new(rect, 4, false, &mut cache);
    let line = LineParam::from_points(0, 0, 20, 20, Side::Left);

    let mut stack: MaskStack<4> = MaskStack::new();
    stack.add(MaskParam::Radius(radius), 0);
    stack.add(MaskParam::Line(line), 0);
    assert_eq!(stack.count(), 2);

    let mut buf = [OPA_OPAQUE; 20];
    let res = stack.apply(&mut buf, 0, 10, 20);
    assert_eq!(res, MaskRes::Changed);

    // Past the diagonal line's kept side (upper-left), everything is masked
    // regardless of what the rounded-rect mask alone would have kept.
    assert_eq!(buf[19], 0);
}

#[test]
fn stack_short_circuits_to_transp_on_the_first_fully_masked_generator() {
    let rect = IntRect::from_ltrb(0, 0, 9, 9).unwrap();
    let mut cache = DefaultCircleTableCache::new();
    let radius = RadiusParam::new(rect, 0, false, &mut cache);

    let mut stack: MaskStack<2> = MaskStack::new();
    stack.add(MaskParam::Radius(radius), 0);

    // Entirely outside the rect's y band: the radius mask alone reports Transp.
    let mut buf = [OPA_OPAQUE; 10];
    assert_eq!(stack.apply(&mut buf, 0, 50, 10), MaskRes::Transp);
}

#[test]
fn empty_stack_is_identity() {
    let stack: MaskStack<4> = MaskStack::new();
    let mut buf = [OPA_OPAQUE; 16];
    assert_eq!(stack.apply(&mut buf, 0, 0, 16), MaskRes::FullCover);
    assert_eq!(buf, [OPA_OPAQUE; 16]);
}
