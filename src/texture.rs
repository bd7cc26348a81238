//! GPU textures addressable from imgui draw commands.

use imgui::TextureId;

use crate::conv::{sprite_draw_size, IntRect};
use crate::error::TextureError;
use crate::render::RenderBackend;

/// An RGBA8 texture living on the GPU.
///
/// This is a plain handle: it does not release the texture on drop. Call
/// [`delete`](Self::delete) with the backend that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    id: TextureId,
    size: [u32; 2],
}

impl Texture {
    /// Upload `rgba` as a new texture of exactly `size` pixels.
    ///
    /// # Errors
    ///
    /// [`TextureError::SizeMismatch`] if `rgba` is not `width * height * 4`
    /// bytes long, or whatever the backend reports for texture creation.
    pub fn from_rgba<B: RenderBackend + ?Sized>(
        backend: &mut B,
        size: [u32; 2],
        rgba: &[u8],
    ) -> Result<Self, TextureError> {
        check_len(size, rgba)?;
        let id = backend.create_texture(size, rgba)?;
        log::debug!("created {}x{} texture {}", size[0], size[1], id.id());
        Ok(Self { id, size })
    }

    /// Decode an encoded image (PNG or JPEG) and upload it.
    ///
    /// # Errors
    ///
    /// [`TextureError::Decode`] if the bytes are not a supported image, or
    /// any error from [`from_rgba`](Self::from_rgba).
    pub fn from_image_bytes<B: RenderBackend + ?Sized>(
        backend: &mut B,
        bytes: &[u8],
    ) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let size = [img.width(), img.height()];
        Self::from_rgba(backend, size, img.as_raw())
    }

    /// Overwrite the `size` region at `origin` with `rgba`.
    ///
    /// # Errors
    ///
    /// [`TextureError::OutOfBounds`] if the region leaves the texture,
    /// [`TextureError::SizeMismatch`] if `rgba` does not cover the region.
    pub fn update_from_pixels<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        rgba: &[u8],
        size: [u32; 2],
        origin: [u32; 2],
    ) -> Result<(), TextureError> {
        let fits = |axis: usize| {
            origin[axis]
                .checked_add(size[axis])
                .is_some_and(|end| end <= self.size[axis])
        };
        if !fits(0) || !fits(1) {
            return Err(TextureError::OutOfBounds {
                x: origin[0],
                y: origin[1],
                width: size[0],
                height: size[1],
            });
        }
        check_len(size, rgba)?;
        backend.update_texture(self.id, origin, size, rgba)
    }

    /// Release the GPU texture.
    pub fn delete<B: RenderBackend + ?Sized>(self, backend: &mut B) {
        backend.delete_texture(self.id);
    }

    /// The id imgui draw commands use to reference this texture.
    #[must_use]
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// The driver's texture name.
    #[must_use]
    pub fn native_handle(&self) -> usize {
        self.id.id()
    }

    /// Size in pixels.
    #[must_use]
    pub fn size(&self) -> [u32; 2] {
        self.size
    }
}

fn check_len(size: [u32; 2], rgba: &[u8]) -> Result<(), TextureError> {
    let expected = (size[0] as usize)
        .saturating_mul(size[1] as usize)
        .saturating_mul(4);
    if rgba.len() == expected {
        Ok(())
    } else {
        Err(TextureError::SizeMismatch {
            width: size[0],
            height: size[1],
            expected,
            actual: rgba.len(),
        })
    }
}

/// A drawable view of a texture: a sub-rectangle and a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite<'a> {
    texture: &'a Texture,
    texture_rect: IntRect,
    scale: [f32; 2],
}

impl<'a> Sprite<'a> {
    /// The whole texture at unit scale.
    #[must_use]
    pub fn new(texture: &'a Texture) -> Self {
        Self {
            texture,
            texture_rect: IntRect::covering(texture.size()),
            scale: [1.0, 1.0],
        }
    }

    /// Show only `rect` of the texture.
    #[must_use]
    pub fn with_texture_rect(mut self, rect: IntRect) -> Self {
        self.texture_rect = rect;
        self
    }

    /// Scale per axis.
    #[must_use]
    pub fn with_scale(mut self, scale: [f32; 2]) -> Self {
        self.scale = scale;
        self
    }

    /// The underlying texture.
    #[must_use]
    pub fn texture(&self) -> &'a Texture {
        self.texture
    }

    /// The visible part of the texture.
    #[must_use]
    pub fn texture_rect(&self) -> IntRect {
        self.texture_rect
    }

    /// Scale per axis.
    #[must_use]
    pub fn scale(&self) -> [f32; 2] {
        self.scale
    }

    /// On-screen size: the texture's size times the scale.
    #[must_use]
    pub fn draw_size(&self) -> [f32; 2] {
        sprite_draw_size(self.texture.size(), self.scale)
    }
}
