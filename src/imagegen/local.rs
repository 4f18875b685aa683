//! Deterministic local icon renderer
//!
//! Output depends only on the item name and tier. It is the fallback when the
//! remote service is off or failing, and it doubles as the placeholder shown
//! while a drop's icon is still queued.

use crate::core::types::Color;
use crate::imagegen::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::imagegen::icon::Icon;
use crate::loot::table::ItemTier;
use image::{Rgba, RgbaImage};

pub const ICON_SIZE: u32 = 96;

const GRADIENT_CENTER: (f32, f32) = (44.0, 40.0);
const GRADIENT_INNER: f32 = 4.0;
const GRADIENT_OUTER: f32 = 60.0;
const GRADIENT_MID_STOP: f32 = 0.62;
const GRADIENT_EDGE: Color = Color::rgb(0x080808);

const LETTER_SCALE: u32 = 6;
const LETTER_CENTER: (u32, u32) = (48, 52);
const LETTER_ALPHA: f32 = 0.82;

const BAND_TOP: u32 = 71;
const BAND_HEIGHT: u32 = 18;
const BAND_INSET: u32 = 6;
const BAND_ALPHA: f32 = 0.42;
const LABEL_COLOR: Color = Color::rgb(0xf7eee3);
const LABEL_CENTER_Y: u32 = 80;

/// Three-color scheme per tier: gradient core, gradient body, border
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bright: Color,
    pub mid: Color,
    pub accent: Color,
}

pub fn palette(tier: ItemTier) -> Palette {
    match tier {
        ItemTier::Legendary => Palette {
            bright: Color::rgb(0xf8c15b),
            mid: Color::rgb(0x6e3b10),
            accent: Color::rgb(0xffd889),
        },
        ItemTier::Rare => Palette {
            bright: Color::rgb(0x7db8ff),
            mid: Color::rgb(0x1d3159),
            accent: Color::rgb(0xc8e1ff),
        },
        ItemTier::Magic => Palette {
            bright: Color::rgb(0x7de0bf),
            mid: Color::rgb(0x16443e),
            accent: Color::rgb(0xd5fff1),
        },
    }
}

/// Render the square icon for an item
pub fn render_local_icon(name: &str, tier: ItemTier) -> Icon {
    let colors = palette(tier);
    let mut image = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| gradient_at(&colors, x, y));

    draw_border(&mut image, colors.accent);

    let initial = name.trim().chars().next().unwrap_or('?');
    let letter_w = GLYPH_WIDTH * LETTER_SCALE;
    let letter_h = GLYPH_HEIGHT * LETTER_SCALE;
    draw_glyph(
        &mut image,
        initial,
        LETTER_CENTER.0 - letter_w / 2,
        LETTER_CENTER.1 - letter_h / 2,
        LETTER_SCALE,
        Color::rgb(0xffffff),
        LETTER_ALPHA,
    );

    fill_rect(
        &mut image,
        BAND_INSET,
        BAND_TOP,
        ICON_SIZE - 2 * BAND_INSET,
        BAND_HEIGHT,
        Color::rgb(0x000000),
        BAND_ALPHA,
    );
    draw_label(&mut image, &tier.as_str().to_ascii_uppercase());

    Icon::from_image(image)
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn lerp_color(a: Color, b: Color, t: f32) -> [u8; 3] {
    [
        lerp_channel(a.r(), b.r(), t),
        lerp_channel(a.g(), b.g(), t),
        lerp_channel(a.b(), b.b(), t),
    ]
}

fn gradient_at(colors: &Palette, x: u32, y: u32) -> Rgba<u8> {
    let dx = x as f32 + 0.5 - GRADIENT_CENTER.0;
    let dy = y as f32 + 0.5 - GRADIENT_CENTER.1;
    let dist = (dx * dx + dy * dy).sqrt();
    let t = ((dist - GRADIENT_INNER) / (GRADIENT_OUTER - GRADIENT_INNER)).clamp(0.0, 1.0);

    let [r, g, b] = if t < GRADIENT_MID_STOP {
        lerp_color(colors.bright, colors.mid, t / GRADIENT_MID_STOP)
    } else {
        let outer = (t - GRADIENT_MID_STOP) / (1.0 - GRADIENT_MID_STOP);
        lerp_color(colors.mid, GRADIENT_EDGE, outer)
    };
    Rgba([r, g, b, 255])
}

fn blend(pixel: &mut Rgba<u8>, color: Color, alpha: f32) {
    let src = [color.r(), color.g(), color.b()];
    for (channel, src) in pixel.0.iter_mut().take(3).zip(src) {
        *channel = lerp_channel(*channel, src, alpha);
    }
}

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Color, alpha: f32) {
    for py in y..(y + h).min(image.height()) {
        for px in x..(x + w).min(image.width()) {
            blend(image.get_pixel_mut(px, py), color, alpha);
        }
    }
}

/// Three-pixel frame inset two pixels from the edge
fn draw_border(image: &mut RgbaImage, color: Color) {
    let (outer_min, outer_max) = (2, ICON_SIZE - 3);
    let (inner_min, inner_max) = (5, ICON_SIZE - 6);
    for y in outer_min..=outer_max {
        for x in outer_min..=outer_max {
            let inside = x >= inner_min && x <= inner_max && y >= inner_min && y <= inner_max;
            if !inside {
                blend(image.get_pixel_mut(x, y), color, 1.0);
            }
        }
    }
}

fn draw_glyph(
    image: &mut RgbaImage,
    c: char,
    left: u32,
    top: u32,
    scale: u32,
    color: Color,
    alpha: f32,
) {
    for row in 0..GLYPH_HEIGHT {
        for col in 0..GLYPH_WIDTH {
            if glyphs::is_set(c, col, row) {
                let (x, y) = (left + col * scale, top + row * scale);
                fill_rect(image, x, y, scale, scale, color, alpha);
            }
        }
    }
}

fn draw_label(image: &mut RgbaImage, text: &str) {
    let advance = GLYPH_WIDTH + 1;
    let width = (text.chars().count() as u32 * advance).saturating_sub(1);
    let left = (ICON_SIZE / 2).saturating_sub(width / 2);
    let top = LABEL_CENTER_Y - GLYPH_HEIGHT / 2;
    for (i, c) in text.chars().enumerate() {
        let x = left + i as u32 * advance;
        draw_glyph(image, c, x, top, 1, LABEL_COLOR, 1.0);
    }
}
