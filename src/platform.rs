//! The integration facade: one value owning input state, the renderer and
//! the font texture for a single imgui context and window.

use std::time::Duration;

use imgui::TextureId;
use winit::event::WindowEvent;

use crate::clipboard::ClipboardSupport;
use crate::draw::FrameData;
use crate::event::Event;
use crate::frame::{self, framebuffer_scale};
use crate::input::InputBridge;
use crate::io::GuiIo;
use crate::render::{RenderBackend, Renderer};
use crate::texture::Texture;
use crate::window::{Window, WinitWindow};

/// Options for [`ImguiPlatform::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Upload the font atlas during `init`. Defaults to `true`.
    pub create_default_font: bool,
    /// Install the system clipboard as imgui's clipboard backend. Defaults
    /// to `true`.
    pub clipboard: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            create_default_font: true,
            clipboard: true,
        }
    }
}

impl PlatformConfig {
    /// Set [`create_default_font`](Self::create_default_font).
    #[must_use]
    pub fn with_default_font(mut self, create_default_font: bool) -> Self {
        self.create_default_font = create_default_font;
        self
    }

    /// Set [`clipboard`](Self::clipboard).
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: bool) -> Self {
        self.clipboard = clipboard;
        self
    }
}

/// Drives one imgui context against one window.
///
/// A frame runs as: feed every window event to
/// [`handle_event`](Self::handle_event), call [`new_frame`](Self::new_frame),
/// build widgets, then [`render`](Self::render).
pub struct ImguiPlatform<B: RenderBackend> {
    input: InputBridge,
    renderer: Renderer<B>,
    font_texture: Option<Texture>,
}

impl<B: RenderBackend> ImguiPlatform<B> {
    fn with_backend(backend: B, has_focus: bool) -> Self {
        Self {
            input: InputBridge::new(has_focus),
            renderer: Renderer::new(backend),
            font_texture: None,
        }
    }

    /// Bind `ctx` to `window`, drawing through `backend`.
    ///
    /// # Panics
    ///
    /// Panics if `config.create_default_font` is set and the font texture
    /// cannot be created.
    pub fn init<W: Window + ?Sized>(
        ctx: &mut imgui::Context,
        backend: B,
        window: &W,
        config: &PlatformConfig,
    ) -> Self {
        if config.clipboard {
            if let Some(clipboard) = ClipboardSupport::new() {
                ctx.set_clipboard_backend(clipboard);
            }
        }

        let size = window.size();
        ctx.io_mut()
            .set_display_size(size, framebuffer_scale(size, window.framebuffer_size()));

        let mut platform = Self::with_backend(backend, window.has_focus());
        if config.create_default_font {
            platform.update_font_texture(ctx);
        }

        log::debug!(
            "imgui platform initialized at {}x{} (focused: {})",
            size[0],
            size[1],
            platform.input.has_focus()
        );
        platform
    }

    /// Feed one window event to imgui.
    pub fn handle_event<I: GuiIo + ?Sized>(&mut self, io: &mut I, event: &Event) {
        self.input.handle_event(io, event);
    }

    /// Track `event` on `window` and feed its translations to imgui.
    pub fn handle_winit_event<I: GuiIo + ?Sized>(
        &mut self,
        io: &mut I,
        window: &mut WinitWindow,
        event: &WindowEvent,
    ) {
        window.observe(event);
        for event in Event::from_winit(event, window.scale_factor()) {
            self.input.handle_event(io, &event);
        }
    }

    /// Push this frame's window state into `io` without starting the frame.
    pub fn prepare_frame<I, W>(&self, io: &mut I, window: &W, delta: Duration)
    where
        I: GuiIo + ?Sized,
        W: Window + ?Sized,
    {
        frame::prepare_frame(io, window, &self.input, delta);
    }

    /// Push window state, then begin an imgui frame.
    pub fn new_frame<'a, W: Window + ?Sized>(
        &self,
        ctx: &'a mut imgui::Context,
        window: &W,
        delta: Duration,
    ) -> &'a mut imgui::Ui {
        self.prepare_frame(ctx.io_mut(), window, delta);
        ctx.new_frame()
    }

    /// End the imgui frame and draw it into `window`.
    pub fn render<W: Window + ?Sized>(&mut self, ctx: &mut imgui::Context, window: &W) {
        let draw_data = ctx.render();
        self.render_frame(&FrameData::from(&*draw_data), window);
    }

    /// Draw an already translated frame into `window`.
    pub fn render_frame<W: Window + ?Sized>(&mut self, frame: &FrameData<'_>, window: &W) {
        window.set_active();
        self.renderer.render(frame, window.framebuffer_size());
    }

    /// Rebuild the font atlas and upload it, replacing any previous font
    /// texture.
    ///
    /// # Panics
    ///
    /// Panics if the texture cannot be created.
    pub fn update_font_texture(&mut self, ctx: &mut imgui::Context) {
        let fonts = ctx.fonts();
        let atlas = fonts.build_rgba32_texture();
        let id = self.install_font_texture([atlas.width, atlas.height], atlas.data);
        fonts.tex_id = id;
    }

    fn install_font_texture(&mut self, size: [u32; 2], rgba: &[u8]) -> TextureId {
        let backend = self.renderer.backend_mut();
        let texture = match Texture::from_rgba(backend, size, rgba) {
            Ok(texture) => texture,
            Err(e) => panic!("failed to create the imgui font texture: {e}"),
        };
        if let Some(old) = self.font_texture.replace(texture) {
            old.delete(backend);
        }
        log::debug!(
            "font atlas uploaded as texture {} ({}x{})",
            texture.native_handle(),
            size[0],
            size[1]
        );
        texture.id()
    }

    /// The current font texture, if one was uploaded.
    #[must_use]
    pub fn font_texture(&self) -> Option<&Texture> {
        self.font_texture.as_ref()
    }

    /// Focus and mouse state collected from events.
    #[must_use]
    pub fn input(&self) -> &InputBridge {
        &self.input
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    /// The renderer, mutably. User textures are created through its backend.
    pub fn renderer_mut(&mut self) -> &mut Renderer<B> {
        &mut self.renderer
    }

    /// Release the font texture and hand the backend back.
    pub fn shutdown(mut self) -> B {
        if let Some(texture) = self.font_texture.take() {
            texture.delete(self.renderer.backend_mut());
        }
        self.renderer.into_backend()
    }
}

#[cfg(feature = "glow")]
impl ImguiPlatform<crate::backend::GlowBackend> {
    /// [`init`](Self::init) with a [`GlowBackend`](crate::GlowBackend) on
    /// `gl`.
    ///
    /// # Safety
    ///
    /// Same contract as [`GlowBackend::new`](crate::GlowBackend::new).
    ///
    /// # Errors
    ///
    /// Returns an [`InitError`](crate::InitError) if the GL program cannot
    /// be built.
    ///
    /// # Panics
    ///
    /// Panics if the font texture cannot be created.
    pub unsafe fn init_glow<W: Window + ?Sized>(
        ctx: &mut imgui::Context,
        gl: std::sync::Arc<glow::Context>,
        window: &W,
        config: &PlatformConfig,
    ) -> Result<Self, crate::InitError> {
        let backend = unsafe { crate::backend::GlowBackend::new(gl)? };
        Ok(Self::init(ctx, backend, window, config))
    }

    /// Release the font texture and every GL object the backend owns.
    ///
    /// # Safety
    ///
    /// The GL context must be current.
    pub unsafe fn destroy(self) {
        let backend = self.shutdown();
        unsafe { backend.destroy() };
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::draw::{Command, CommandList, DrawCommand};
    use crate::testing::{vertices, with_imgui, Call, FakeWindow, RecordingBackend, RecordingIo};

    fn platform() -> ImguiPlatform<RecordingBackend> {
        ImguiPlatform::with_backend(RecordingBackend::default(), true)
    }

    #[test]
    fn config_defaults_enable_everything() {
        let config = PlatformConfig::default();
        assert!(config.create_default_font);
        assert!(config.clipboard);

        let config = config.with_default_font(false).with_clipboard(false);
        assert!(!config.create_default_font);
        assert!(!config.clipboard);
    }

    #[test]
    fn font_texture_matches_atlas_size() {
        let mut platform = platform();
        let id = platform.install_font_texture([4, 2], &[255; 32]);

        let texture = platform.font_texture().unwrap();
        assert_eq!(texture.id(), id);
        assert_eq!(texture.size(), [4, 2]);
        assert_eq!(
            platform.renderer().backend().calls,
            [Call::CreateTexture {
                size: [4, 2],
                bytes: 32
            }]
        );
    }

    #[test]
    fn replacing_the_font_texture_releases_the_old_one() {
        let mut platform = platform();
        let first = platform.install_font_texture([1, 1], &[0; 4]);
        let second = platform.install_font_texture([2, 1], &[0; 8]);

        assert_ne!(first, second);
        assert_eq!(platform.font_texture().unwrap().id(), second);
        assert_eq!(
            platform.renderer().backend().calls.last(),
            Some(&Call::DeleteTexture(first))
        );
    }

    #[test]
    #[should_panic(expected = "font texture")]
    fn font_texture_failure_is_fatal() {
        let mut backend = RecordingBackend::default();
        backend.fail_texture_creation = true;
        let mut platform = ImguiPlatform::with_backend(backend, true);
        platform.install_font_texture([1, 1], &[0; 4]);
    }

    #[test]
    fn shutdown_releases_the_font_texture() {
        let mut platform = platform();
        let id = platform.install_font_texture([1, 1], &[0; 4]);
        let backend = platform.shutdown();
        assert_eq!(backend.calls.last(), Some(&Call::DeleteTexture(id)));
    }

    #[test]
    fn events_are_gated_on_focus() {
        let mut platform = ImguiPlatform::with_backend(RecordingBackend::default(), false);
        let mut io = RecordingIo::default();

        platform.handle_event(&mut io, &Event::MouseWheelMoved(1.0));
        assert!(io.is_untouched());

        platform.handle_event(&mut io, &Event::GainedFocus);
        platform.handle_event(&mut io, &Event::MouseWheelMoved(1.0));
        assert_eq!(io.wheel, 1.0);
        assert!(platform.input().has_focus());
    }

    #[test]
    fn prepare_frame_reports_pressed_buttons() {
        let mut platform = platform();
        let mut io = RecordingIo::default();
        platform.handle_event(&mut io, &Event::MouseButtonPressed(1));

        let window = FakeWindow {
            size: [100.0, 50.0],
            framebuffer: [200, 100],
            focused: true,
            ..FakeWindow::default()
        };
        platform.prepare_frame(&mut io, &window, Duration::from_millis(16));

        assert_eq!(io.display_size, Some(([100.0, 50.0], [2.0, 2.0])));
        assert!(io.mouse_buttons.contains(&(1, true)));
        assert_eq!(io.delta_time, Some(0.016));
    }

    #[test]
    fn render_frame_activates_the_window_first() {
        let mut platform = platform();
        let window = FakeWindow {
            size: [100.0, 100.0],
            framebuffer: [100, 100],
            ..FakeWindow::default()
        };
        let (verts, indices) = vertices(3);
        let frame = FrameData::new([100.0, 100.0]).with(CommandList::new(&verts, &indices).with(
            Command::Draw(DrawCommand {
                clip_rect: [0.0, 0.0, 100.0, 100.0],
                element_count: 3,
                texture_id: TextureId::new(1),
            }),
        ));

        platform.render_frame(&frame, &window);

        assert_eq!(window.activations.get(), 1);
        let calls = &platform.renderer().backend().calls;
        assert_eq!(calls.first(), Some(&Call::SaveState));
        assert!(calls.contains(&Call::DrawElements {
            count: 3,
            offset: 0
        }));
        assert_eq!(calls.last(), Some(&Call::RestoreState));
    }

    #[test]
    fn font_atlas_carries_the_uploaded_texture_id() {
        with_imgui(|ctx| {
            let mut platform = platform();
            platform.update_font_texture(ctx);

            let texture = *platform.font_texture().unwrap();
            assert_eq!(ctx.fonts().tex_id, texture.id());
            let [width, height] = texture.size();
            assert!(width > 0 && height > 0);
            assert_eq!(
                platform.renderer().backend().calls,
                [Call::CreateTexture {
                    size: [width, height],
                    bytes: width as usize * height as usize * 4,
                }]
            );

            platform.update_font_texture(ctx);
            assert_ne!(ctx.fonts().tex_id, texture.id());
            assert_eq!(ctx.fonts().tex_id, platform.font_texture().unwrap().id());
        });
    }

    #[test]
    fn init_takes_size_and_focus_from_the_window() {
        with_imgui(|ctx| {
            let window = FakeWindow {
                size: [640.0, 480.0],
                framebuffer: [1280, 960],
                focused: false,
                ..FakeWindow::default()
            };
            let config = PlatformConfig::default().with_clipboard(false);
            let platform = ImguiPlatform::init(ctx, RecordingBackend::default(), &window, &config);

            assert_eq!(ctx.io().display_size, [640.0, 480.0]);
            assert_eq!(ctx.io().display_framebuffer_scale, [2.0, 2.0]);
            assert!(!platform.input().has_focus());
            assert_eq!(
                ctx.fonts().tex_id,
                platform.font_texture().unwrap().id()
            );
        });
    }

    #[test]
    fn init_can_skip_the_font_texture() {
        with_imgui(|ctx| {
            let window = FakeWindow {
                size: [10.0, 10.0],
                framebuffer: [10, 10],
                focused: true,
                ..FakeWindow::default()
            };
            let config = PlatformConfig::default()
                .with_clipboard(false)
                .with_default_font(false);
            let platform = ImguiPlatform::init(ctx, RecordingBackend::default(), &window, &config);

            assert!(platform.font_texture().is_none());
            assert!(platform.input().has_focus());
            assert!(platform.renderer().backend().calls.is_empty());
        });
    }

    #[test]
    fn renders_a_text_frame_with_the_font_texture() {
        with_imgui(|ctx| {
            let mut platform = platform();
            platform.update_font_texture(ctx);
            let font = platform.font_texture().unwrap().id();

            let window = FakeWindow {
                size: [200.0, 100.0],
                framebuffer: [400, 200],
                focused: true,
                ..FakeWindow::default()
            };
            let ui = platform.new_frame(ctx, &window, Duration::from_millis(16));
            ui.text("hello");
            platform.render(ctx, &window);

            assert_eq!(ctx.io().display_framebuffer_scale, [2.0, 2.0]);
            assert_eq!(window.activations.get(), 1);

            let calls = &platform.renderer().backend().calls;
            assert_eq!(calls.get(1), Some(&Call::SaveState));
            assert_eq!(
                calls.get(2),
                Some(&Call::Setup {
                    framebuffer_size: [400, 200],
                    projection: crate::render::orthographic_projection([200.0, 100.0]),
                })
            );
            assert!(calls.contains(&Call::BindTexture(font)));
            assert!(calls
                .iter()
                .any(|call| matches!(call, Call::DrawElements { count, .. } if *count > 0)));
            assert_eq!(calls.last(), Some(&Call::RestoreState));
        });
    }
}
