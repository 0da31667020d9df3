//! Draw a quad made of two triangles sharing vertices through an index buffer.
//!
//! The quad is drawn as a wireframe so that both triangles can be seen, unless the platform asks
//! for filled polygons.

use crate::shared::{build_program, PositionVertex, CLEAR_COLOR, QUAD_INDICES};
use crate::{wants_to_quit, Example, ExampleError, InputAction, LoopFeedback, PlatformServices};
use glprimer::backend::Backend;
use glprimer::context::GraphicsContext;
use glprimer::pipeline::{PipelineState, PolygonMode};
use glprimer::shader::Program;
use glprimer::tess::{Mode, Tess};

/// Vertex shader source.
pub const VS: &str = "#version 330 core

layout (location = 0) in vec3 pos;

void main() {
  gl_Position = vec4(pos.xyz, 1.0);
}
";

/// Fragment shader source.
pub const FS: &str = "#version 330 core

out vec4 frag_color;

void main() {
  frag_color = vec4(1.0, 0.5, 0.2, 1.0);
}
";

const VERTICES: [PositionVertex; 4] = [
  PositionVertex {
    pos: [0.5, 0.5, 0.],
  },
  PositionVertex {
    pos: [0.5, -0.5, 0.],
  },
  PositionVertex {
    pos: [-0.5, -0.5, 0.],
  },
  PositionVertex {
    pos: [-0.5, 0.5, 0.],
  },
];

pub struct LocalExample<B>
where
  B: Backend,
{
  program: Option<Program<B>>,
  quad: Tess<B>,
  polygon_mode: PolygonMode,
}

impl<B> Example<B> for LocalExample<B>
where
  B: Backend,
{
  const TITLE: &'static str = "Hello Triangle";

  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, ExampleError> {
    let program = build_program(context, VS, FS);
    let quad = context
      .new_tess()
      .set_vertices(&VERTICES[..])
      .set_indices(&QUAD_INDICES[..])
      .set_mode(Mode::Triangle)
      .build()?;

    let polygon_mode = if platform.fill_polygons() {
      PolygonMode::Fill
    } else {
      PolygonMode::Line
    };

    Ok(LocalExample {
      program,
      quad,
      polygon_mode,
    })
  }

  fn render_frame(
    mut self,
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
      .set_viewport_size(size)
      .set_polygon_mode(self.polygon_mode);
    let program = self.program.as_mut();
    let quad = &self.quad;

    context.new_pipeline_gate().pipeline(&state, |mut pipeline| {
      if let Some(program) = program {
        pipeline.shade(program, |mut iface| iface.render(quad));
      }
    });

    LoopFeedback::Continue(self)
  }
}
