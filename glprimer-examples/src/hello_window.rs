//! Open a window and clear it with a solid color every frame.
//!
//! No shader, no geometry: this is the smallest program that shows a rendering loop.

use crate::shared::CLEAR_COLOR;
use crate::{wants_to_quit, Example, ExampleError, InputAction, LoopFeedback, PlatformServices};
use glprimer::backend::Backend;
use glprimer::context::GraphicsContext;
use glprimer::pipeline::PipelineState;

pub struct LocalExample;

impl<B> Example<B> for LocalExample
where
  B: Backend,
{
  const TITLE: &'static str = "My Game Window";

  fn bootstrap(
    _platform: &mut impl PlatformServices,
    _context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, ExampleError> {
    Ok(LocalExample)
  }

  fn render_frame(
    self,
    _: f32,
    size: [u32; 2],
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> LoopFeedback<Self> {
    if wants_to_quit(actions) {
      return LoopFeedback::Exit;
    }

    let state = PipelineState::default()
      .set_clear_color(CLEAR_COLOR)
      .set_viewport_size(size);

    context.new_pipeline_gate().pipeline(&state, |_| ());

    LoopFeedback::Continue(self)
  }
}
