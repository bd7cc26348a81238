//! Value conversions between window-side and imgui-side conventions.

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, `255` is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque white, the neutral image tint.
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// Fully transparent black. Used as "no border" / "no background".
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Build a color from its four channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalize to the `[0.0, 1.0]` vector imgui takes for colors.
    #[must_use]
    pub fn to_vec4(self) -> [f32; 4] {
        color_to_vec4(self)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// An integer rectangle in texture pixel space, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl IntRect {
    /// Build a rectangle from its position and extent.
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The rectangle covering a whole texture of `size` pixels.
    #[must_use]
    pub fn covering([width, height]: [u32; 2]) -> Self {
        Self::new(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }
}

/// Convert an 8-bit color to a normalized four-component vector.
#[must_use]
pub fn color_to_vec4(color: Color) -> [f32; 4] {
    [
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        f32::from(color.a) / 255.0,
    ]
}

/// Normalized `(uv0, uv1)` corners of `rect` inside a texture of
/// `texture_size` pixels.
///
/// A zero texture dimension produces non-finite coordinates; callers must not
/// pass one.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn texture_rect_uvs(rect: IntRect, texture_size: [u32; 2]) -> ([f32; 2], [f32; 2]) {
    let [w, h] = texture_size.map(|v| v as f32);
    let uv0 = [rect.left as f32 / w, rect.top as f32 / h];
    let uv1 = [
        (rect.left as f32 + rect.width as f32) / w,
        (rect.top as f32 + rect.height as f32) / h,
    ];
    (uv0, uv1)
}

/// On-screen size of a sprite: its texture's size scaled per axis.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn sprite_draw_size(texture_size: [u32; 2], scale: [f32; 2]) -> [f32; 2] {
    [
        texture_size[0] as f32 * scale[0],
        texture_size[1] as f32 * scale[1],
    ]
}
