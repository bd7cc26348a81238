//! Image widgets for [`Texture`]s and [`Sprite`]s.
//!
//! Call these between `new_frame` and `render`, like any other imgui widget.

use crate::conv::{texture_rect_uvs, Color, IntRect};
use crate::texture::{Sprite, Texture};

/// Draw `texture_rect` of `texture` as an image of `size` logical pixels.
pub fn image_texture(
    ui: &imgui::Ui,
    texture: &Texture,
    size: [f32; 2],
    texture_rect: IntRect,
    tint: Color,
    border: Color,
) {
    let (uv0, uv1) = texture_rect_uvs(texture_rect, texture.size());
    imgui::Image::new(texture.id(), size)
        .uv0(uv0)
        .uv1(uv1)
        .tint_col(tint.to_vec4())
        .border_col(border.to_vec4())
        .build(ui);
}

/// Draw a sprite at its scaled texture size.
pub fn image(ui: &imgui::Ui, sprite: &Sprite<'_>, tint: Color, border: Color) {
    image_texture(
        ui,
        sprite.texture(),
        sprite.draw_size(),
        sprite.texture_rect(),
        tint,
        border,
    );
}

/// Draw `texture_rect` of `texture` as a button. Returns true when clicked.
///
/// `id` must be unique within the current imgui id scope.
pub fn image_button_texture(
    ui: &imgui::Ui,
    id: &str,
    texture: &Texture,
    size: [f32; 2],
    texture_rect: IntRect,
    background: Color,
    tint: Color,
) -> bool {
    let (uv0, uv1) = texture_rect_uvs(texture_rect, texture.size());
    ui.image_button_config(id, texture.id(), size)
        .uv0(uv0)
        .uv1(uv1)
        .background_col(background.to_vec4())
        .tint_col(tint.to_vec4())
        .build()
}

/// Draw a sprite as a button at its scaled texture size.
pub fn image_button(
    ui: &imgui::Ui,
    id: &str,
    sprite: &Sprite<'_>,
    background: Color,
    tint: Color,
) -> bool {
    image_button_texture(
        ui,
        id,
        sprite.texture(),
        sprite.draw_size(),
        sprite.texture_rect(),
        background,
        tint,
    )
}
