//! One frame of imgui output, borrowed and in draw order.
//!
//! [`FrameData`] is what the renderer walks. It is normally built from
//! [`imgui::DrawData`] but can be put together by hand.

use imgui::internal::RawWrapper;
use imgui::{DrawCmd, DrawCmdParams, DrawIdx, DrawVert, TextureId};

/// A user callback standing in for a draw. Receives the list it belongs to.
pub type Callback<'a> = Box<dyn Fn(&CommandList<'a>) + 'a>;

/// A single indexed triangle draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// `[x0, y0, x1, y1]` in logical pixels, top-left origin.
    pub clip_rect: [f32; 4],
    /// Number of indices consumed from the list's index buffer.
    pub element_count: usize,
    /// Texture sampled by the draw.
    pub texture_id: TextureId,
}

/// One entry of a command list.
pub enum Command<'a> {
    /// Draw the next `element_count` indices.
    Draw(DrawCommand),
    /// Re-apply the renderer's GL state before continuing.
    ResetRenderState,
    /// Run user code instead of drawing.
    Callback(Callback<'a>),
}

/// Vertex and index data plus the commands drawing from them.
pub struct CommandList<'a> {
    /// Interleaved vertices.
    pub vertices: &'a [DrawVert],
    /// Indices into [`vertices`](Self::vertices), consumed front to back.
    pub indices: &'a [DrawIdx],
    /// Commands in draw order.
    pub commands: Vec<Command<'a>>,
}

impl<'a> CommandList<'a> {
    /// A list without commands.
    #[must_use]
    pub fn new(vertices: &'a [DrawVert], indices: &'a [DrawIdx]) -> Self {
        Self {
            vertices,
            indices,
            commands: Vec::new(),
        }
    }

    /// Append a command, builder style.
    #[must_use]
    pub fn with(mut self, command: Command<'a>) -> Self {
        self.commands.push(command);
        self
    }
}

/// Everything to draw for one frame.
pub struct FrameData<'a> {
    /// Logical size the clip rects and vertex positions are expressed in.
    pub display_size: [f32; 2],
    /// Lists in back-to-front order.
    pub lists: Vec<CommandList<'a>>,
}

impl<'a> FrameData<'a> {
    /// A frame with no lists.
    #[must_use]
    pub fn new(display_size: [f32; 2]) -> Self {
        Self {
            display_size,
            lists: Vec::new(),
        }
    }

    /// Append a list, builder style.
    #[must_use]
    pub fn with(mut self, list: CommandList<'a>) -> Self {
        self.lists.push(list);
        self
    }

    /// Total number of commands across all lists.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.lists.iter().map(|l| l.commands.len()).sum()
    }
}

impl<'a> From<&'a imgui::DrawData> for FrameData<'a> {
    fn from(draw_data: &'a imgui::DrawData) -> Self {
        Self {
            display_size: draw_data.display_size,
            lists: draw_data.draw_lists().map(CommandList::from).collect(),
        }
    }
}

impl<'a> From<&'a imgui::DrawList> for CommandList<'a> {
    fn from(list: &'a imgui::DrawList) -> Self {
        let commands = list
            .commands()
            .map(|command| match command {
                DrawCmd::Elements {
                    count,
                    cmd_params:
                        DrawCmdParams {
                            clip_rect,
                            texture_id,
                            ..
                        },
                } => Command::Draw(DrawCommand {
                    clip_rect,
                    element_count: count,
                    texture_id,
                }),
                DrawCmd::ResetRenderState => Command::ResetRenderState,
                DrawCmd::RawCallback { callback, raw_cmd } => {
                    // SAFETY: the raw list outlives the frame this command
                    // belongs to, and imgui expects exactly these arguments.
                    let raw_list: *const imgui::sys::ImDrawList = unsafe { list.raw() };
                    Command::Callback(Box::new(move |_| unsafe { callback(raw_list, raw_cmd) }))
                }
            })
            .collect();

        Self {
            vertices: list.vtx_buffer(),
            indices: list.idx_buffer(),
            commands,
        }
    }
}
