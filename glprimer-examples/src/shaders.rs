//! Feed a shader with two vertex attributes (position and color) and a uniform updated every frame.
//!
//! The colors are interpolated across the triangle by the rasterizer; the `color` uniform pulses
//! its green channel over time and is blended with them.

use crate::shared::{build_program, ColorVertex, CLEAR_COLOR};
use crate::{wants_to_quit, Example, ExampleError, InputAction, LoopFeedback, PlatformServices};
use glprimer::backend::Backend;
use glprimer::context::GraphicsContext;
use glprimer::pipeline::PipelineState;
use glprimer::shader::{Program, Uniform};
use glprimer::tess::{Mode, Tess};

/// Vertex shader source.
pub const VS: &str = "#version 330 core

layout (location = 0) in vec3 pos;
layout (location = 1) in vec3 color;

out vec3 vertex_color;

void main() {
  gl_Position = vec4(pos.xyz, 1.0);
  vertex_color = color;
}
";

/// Fragment shader source.
pub const FS: &str = "#version 330 core

uniform vec4 color;

in vec3 vertex_color;

out vec4 frag_color;

void main() {
  frag_color = vec4(mix(vertex_color, color.rgb, 0.5), color.a);
}
";

const VERTICES: [ColorVertex; 3] = [
  // bottom right
  ColorVertex {
    pos: [0.5, -0.5, 0.],
    rgb: [1., 0., 0.],
  },
  // bottom left
  ColorVertex {
    pos: [-0.5, -0.5, 0.],
    rgb: [0., 1., 0.],
  },
  // top
  ColorVertex {
    pos: [0., 0.5, 0.],
    rgb: [0., 0., 1.],
  },
];

/// Intensity of the green channel at a given time, in seconds; always within *[0; 1]*.
pub fn pulse(t: f32) -> f32 {
  t.sin() / 2. + 0.5
}

/// Value of the `color` uniform at a given time, in seconds.
pub fn pulse_color(t: f32) -> [f32; 4] {
  [0., pulse(t), 0., 1.]
}

struct ShaderInterface<B>
where
  B: Backend,
{
  program: Program<B>,
  color: Uniform<[f32; 4]>,
}

pub struct LocalExample<B>
where
  B: Backend,
{
  shader: Option<ShaderInterface<B>>,
  triangle: Tess<B>,
}

impl<B> Example<B> for LocalExample<B>
where
  B: Backend,
{
  const TITLE: &'static str = "Shaders";

  fn bootstrap(
    _platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, ExampleError> {
    match context.query().max_vertex_attribs() {
      Ok(max) => log::info!("maximum of vertex attributes supported: {}", max),
      Err(e) => log::warn!("cannot query the maximum of vertex attributes: {}", e),
    }

    let shader = build_program(context, VS, FS).map(|program| {
      let color = program.uniform_or_unbound::<[f32; 4]>("color");
      ShaderInterface { program, color }
    });

    let triangle = context
      .new_tess()
      .set_vertices(&VERTICES[..])
      .set_mode(Mode::Triangle)
      .build()?;

    Ok(LocalExample { shader, triangle })
  }

  fn render_frame(
    mut self,
    t: f32,
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
    let shader = self.shader.as_mut();
    let triangle = &self.triangle;

    context.new_pipeline_gate().pipeline(&state, |mut pipeline| {
      if let Some(ShaderInterface { program, color }) = shader {
        pipeline.shade(program, |mut iface| {
          iface.set(color, pulse_color(t));
          iface.render(triangle);
        });
      }
    });

    LoopFeedback::Continue(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::f32::consts::PI;

  #[test]
  fn pulse_is_normalized() {
    for i in 0..100 {
      let p = pulse(i as f32 * 0.37);
      assert!((0. ..=1.).contains(&p), "pulse out of range: {}", p);
    }
  }

  #[test]
  fn pulse_changes_over_time() {
    assert!((pulse(0.) - 0.5).abs() < 1e-6);
    assert!((pulse(PI / 2.) - 1.).abs() < 1e-6);
    assert!(pulse(3. * PI / 2.).abs() < 1e-6);
    assert_ne!(pulse_color(0.), pulse_color(PI / 2.));
  }
}
