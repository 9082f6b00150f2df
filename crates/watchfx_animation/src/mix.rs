//! Color and border mixing
//!
//! Helpers for feeding an animation value in `[0, 1]` into widget properties.
//! Neither function clamps the fraction; values outside `[0, 1]` extrapolate.

const RED_MASK: u32 = 0xff0000;
const GREEN_MASK: u32 = 0x00ff00;
const BLUE_MASK: u32 = 0x0000ff;

/// Mix two packed `0xRRGGBB` colors
///
/// Each channel is interpolated in place (still shifted into its byte), floored,
/// and masked back into its slot. The fractional remainder of the upper
/// channels is truncated by the mask rather than rounded, so
/// `mix_color(0x000000, 0xffffff, 0.5)` yields `0x7f7f7f`.
pub fn mix_color(color1: u32, color2: u32, percentage: f64) -> u32 {
    mix_channel(color1, color2, RED_MASK, percentage)
        + mix_channel(color1, color2, GREEN_MASK, percentage)
        + mix_channel(color1, color2, BLUE_MASK, percentage)
}

fn mix_channel(color1: u32, color2: u32, mask: u32, percentage: f64) -> u32 {
    let c0 = (color1 & mask) as f64;
    let c1 = (color2 & mask) as f64;
    let mixed = ((c1 - c0) * percentage + c0).floor();
    // 32-bit two's complement wrap, so extrapolated negatives still mask cleanly
    to_int32(mixed) as u32 & mask
}

fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    (value.rem_euclid(4_294_967_296.0) as u64) as u32 as i32
}

/// Rectangle geometry with a corner radius
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Border {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub radius: f64,
}

impl Border {
    pub const fn new(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Self {
        Self { x, y, w, h, radius }
    }
}

/// Interpolate every component of two borders
pub fn mix_border(border1: &Border, border2: &Border, percentage: f64) -> Border {
    let lerp = |a: f64, b: f64| a + (b - a) * percentage;
    Border {
        x: lerp(border1.x, border2.x),
        y: lerp(border1.y, border2.y),
        w: lerp(border1.w, border2.w),
        h: lerp(border1.h, border2.h),
        radius: lerp(border1.radius, border2.radius),
    }
}
