//! Error types for backend initialization and texture creation.
//!
//! Everything else in the crate (event bridging, frame preparation, drawing)
//! is infallible.

/// Failure while setting up the GPU side of the platform.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// A shader stage failed to compile. Carries the driver's info log.
    #[error("shader compile error: {0}")]
    Compile(String),

    /// The shader program failed to link. Carries the driver's info log.
    #[error("program link error: {0}")]
    Link(String),

    /// The driver refused to create a buffer, vertex array or program object.
    #[error("failed to create GL object: {0}")]
    CreateObject(String),

    /// A uniform the renderer needs is absent from the linked program.
    #[error("uniform `{0}` missing from imgui shader")]
    MissingUniform(&'static str),

    /// A vertex attribute the renderer needs is absent from the linked program.
    #[error("attribute `{0}` missing from imgui shader")]
    MissingAttribute(&'static str),
}

/// Failure while creating or updating a [`Texture`](crate::Texture).
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The driver refused to create the texture object.
    #[error("failed to create texture: {0}")]
    Create(String),

    /// The pixel buffer does not hold `width * height` RGBA8 pixels.
    #[error("expected {expected} bytes of RGBA8 data for a {width}x{height} texture, got {actual}")]
    SizeMismatch {
        /// Texture width in pixels.
        width: u32,
        /// Texture height in pixels.
        height: u32,
        /// Required buffer length.
        expected: usize,
        /// Supplied buffer length.
        actual: usize,
    },

    /// A dimension or offset does not fit the driver's signed size type.
    #[error("texture dimension {0} exceeds i32::MAX")]
    TooLarge(u32),

    /// The region passed to an update lies outside the texture.
    #[error("update region {width}x{height} at ({x}, {y}) exceeds texture bounds")]
    OutOfBounds {
        /// Left edge of the region.
        x: u32,
        /// Top edge of the region.
        y: u32,
        /// Region width.
        width: u32,
        /// Region height.
        height: u32,
    },

    /// The encoded image could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}
