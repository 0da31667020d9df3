//! Rendering frames.
//!
//! A frame is rendered by entering a pipeline through a [`PipelineGate`]. Entering it applies a
//! [`PipelineState`] (viewport, polygon mode, clear color) and hands a [`Pipeline`] to a closure.
//! From there, textures are bound to texture units and programs are used to *shade* tessellations:
//!
//! ```ignore
//! context
//!   .new_pipeline_gate()
//!   .pipeline(&PipelineState::default(), |mut pipeline| {
//!     let tex = pipeline.bind_texture(0, &texture);
//!
//!     pipeline.shade(&mut program, |mut iface| {
//!       iface.set(&sampler_uniform, tex);
//!       iface.render(&quad);
//!     });
//!   });
//! ```

use crate::backend::pipeline::Pipeline as PipelineBackend;
use crate::backend::shader::Uniformable;
use crate::context::GraphicsContext;
use crate::shader::{Program, TextureBinding, Uniform};
use crate::tess::Tess;
use crate::texture::Texture;

/// How polygons are rasterized.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PolygonMode {
  /// Filled polygons.
  Fill,
  /// Only the edges (wireframe).
  Line,
  /// Only the vertices.
  Point,
}

/// Region of the framebuffer rendered to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Viewport {
  /// Keep whatever viewport is currently set.
  Whole,
  /// Render to a specific area.
  Specific {
    /// Lower-left x coordinate.
    x: u32,
    /// Lower-left y coordinate.
    y: u32,
    /// Width of the area.
    width: u32,
    /// Height of the area.
    height: u32,
  },
}

/// State applied when entering a pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineState {
  /// Color to clear the color buffer with; `None` keeps the previous content.
  pub clear_color: Option<[f32; 4]>,
  /// Viewport to render to.
  pub viewport: Viewport,
  /// Polygon rasterization mode.
  pub polygon_mode: PolygonMode,
}

impl Default for PipelineState {
  /// Defaults:
  ///
  /// - `clear_color` set to opaque black.
  /// - `viewport` set to [`Viewport::Whole`].
  /// - `polygon_mode` set to [`PolygonMode::Fill`].
  fn default() -> Self {
    PipelineState {
      clear_color: Some([0., 0., 0., 1.]),
      viewport: Viewport::Whole,
      polygon_mode: PolygonMode::Fill,
    }
  }
}

impl PipelineState {
  /// Set the clear color.
  pub fn set_clear_color(self, clear_color: impl Into<Option<[f32; 4]>>) -> Self {
    PipelineState {
      clear_color: clear_color.into(),
      ..self
    }
  }

  /// Set the viewport.
  pub fn set_viewport(self, viewport: Viewport) -> Self {
    PipelineState { viewport, ..self }
  }

  /// Set the viewport to cover a whole framebuffer of the given size.
  pub fn set_viewport_size(self, [width, height]: [u32; 2]) -> Self {
    self.set_viewport(Viewport::Specific {
      x: 0,
      y: 0,
      width,
      height,
    })
  }

  /// Set the polygon mode.
  pub fn set_polygon_mode(self, polygon_mode: PolygonMode) -> Self {
    PipelineState {
      polygon_mode,
      ..self
    }
  }
}

/// Entry point of frame rendering.
///
/// Obtained with [`GraphicsContext::new_pipeline_gate`].
pub struct PipelineGate<'a, C> {
  ctx: &'a mut C,
}

impl<'a, C> PipelineGate<'a, C>
where
  C: GraphicsContext,
  C::Backend: PipelineBackend,
{
  /// Create a new pipeline gate.
  pub fn new(ctx: &'a mut C) -> Self {
    PipelineGate { ctx }
  }

  /// Apply the state and run the closure with a [`Pipeline`].
  pub fn pipeline<F, R>(&mut self, state: &PipelineState, f: F) -> R
  where
    F: FnOnce(Pipeline<C::Backend>) -> R,
  {
    let backend = self.ctx.backend();

    unsafe { backend.start_pipeline(state) };

    f(Pipeline { backend })
  }
}

/// A pipeline in use: textures can be bound and programs used.
pub struct Pipeline<'a, B> {
  backend: &'a mut B,
}

impl<'a, B> Pipeline<'a, B>
where
  B: PipelineBackend,
{
  /// Bind a texture to a texture unit.
  ///
  /// The returned binding is meant to be sent to a `sampler2D` uniform.
  pub fn bind_texture(&mut self, unit: u32, texture: &Texture<B>) -> TextureBinding {
    unsafe { self.backend.bind_texture(unit, &texture.repr) };
    TextureBinding::new(unit)
  }

  /// Use a program and run the closure with its [`ProgramInterface`].
  pub fn shade<F, R>(&mut self, program: &mut Program<B>, f: F) -> R
  where
    F: FnOnce(ProgramInterface<B>) -> R,
  {
    unsafe { self.backend.use_program(&program.repr) };

    f(ProgramInterface {
      backend: self.backend,
      program: &mut program.repr,
    })
  }
}

/// A program in use: uniforms can be set and tessellations drawn.
pub struct ProgramInterface<'a, B>
where
  B: PipelineBackend,
{
  backend: &'a mut B,
  program: &'a mut B::ProgramRepr,
}

impl<'a, B> ProgramInterface<'a, B>
where
  B: PipelineBackend,
{
  /// Set a uniform value.
  pub fn set<T>(&mut self, uniform: &Uniform<T>, value: T)
  where
    B: Uniformable<T>,
  {
    unsafe { B::update(self.program, uniform, value) }
  }

  /// Draw a tessellation.
  pub fn render(&mut self, tess: &Tess<B>) {
    unsafe { self.backend.render(&tess.repr) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::backend::headless::{Call, HeadlessContext, UniformValue};
  use crate::tess::Mode;
  use crate::texture::{GenMipmaps, Sampler};
  use crate::vertex::{Vertex, VertexAttribDesc, VertexAttribDim, VertexDesc};

  #[repr(C)]
  #[derive(Clone, Copy, Debug)]
  struct Pos([f32; 2]);

  unsafe impl Vertex for Pos {
    fn vertex_desc() -> VertexDesc {
      VertexDesc::new::<Self>(vec![VertexAttribDesc::new(
        0,
        "pos",
        VertexAttribDim::Dim2,
        0,
      )])
    }
  }

  const VS: &str = "layout (location = 0) in vec2 pos;\nvoid main() {\n  gl_Position = vec4(pos, 0., 1.);\n}\n";
  const FS: &str = "uniform sampler2D tex;\nuniform float alpha;\nout vec4 frag;\nvoid main() {\n  frag = vec4(texture(tex, vec2(0.)).rgb, alpha);\n}\n";

  #[test]
  fn state_builders() {
    let state = PipelineState::default()
      .set_clear_color([0.2, 0.3, 0.3, 1.])
      .set_viewport_size([960, 540])
      .set_polygon_mode(PolygonMode::Line);

    assert_eq!(state.clear_color, Some([0.2, 0.3, 0.3, 1.]));
    assert_eq!(
      state.viewport,
      Viewport::Specific {
        x: 0,
        y: 0,
        width: 960,
        height: 540
      }
    );
    assert_eq!(state.polygon_mode, PolygonMode::Line);
    assert_eq!(state.set_clear_color(None).clear_color, None);
  }

  #[test]
  fn render_frame() {
    let mut ctx = HeadlessContext::new();
    let mut program = ctx.new_shader_program().from_strings(VS, FS).unwrap();
    let tex_uni = program.uniform::<TextureBinding>("tex").unwrap();
    let alpha_uni = program.uniform::<f32>("alpha").unwrap();
    let tess = ctx
      .new_tess()
      .set_vertices(&[Pos([0., 0.]), Pos([1., 0.]), Pos([0., 1.])][..])
      .build()
      .unwrap();
    let texture = ctx
      .new_texture([1, 1], Sampler::default(), GenMipmaps::No, &[255, 0, 0])
      .unwrap();
    ctx.clear_journal();

    let state = PipelineState::default();
    ctx.new_pipeline_gate().pipeline(&state, |mut pipeline| {
      let bound = pipeline.bind_texture(1, &texture);

      pipeline.shade(&mut program, |mut iface| {
        iface.set(&tex_uni, bound);
        iface.set(&alpha_uni, 0.5);
        iface.render(&tess);
      });
    });

    assert_eq!(
      ctx.journal(),
      vec![
        Call::StartPipeline(state),
        Call::BindTexture { unit: 1, handle: 5 },
        Call::UseProgram(3),
        Call::SetUniform {
          location: tex_uni.index(),
          value: UniformValue::Sampler(1)
        },
        Call::SetUniform {
          location: alpha_uni.index(),
          value: UniformValue::Float(0.5)
        },
        Call::Render {
          handle: 4,
          mode: Mode::Triangle,
          count: 3,
          indexed: false
        },
      ]
    );
  }

  #[test]
  fn unbound_uniform_is_ignored() {
    let mut ctx = HeadlessContext::new();
    let mut program = ctx.new_shader_program().from_strings(VS, FS).unwrap();
    let missing = program.uniform_or_unbound::<f32>("missing");
    ctx.clear_journal();

    ctx
      .new_pipeline_gate()
      .pipeline(&PipelineState::default(), |mut pipeline| {
        pipeline.shade(&mut program, |mut iface| iface.set(&missing, 1.));
      });

    let journal = ctx.journal();
    assert!(!journal
      .iter()
      .any(|c| matches!(c, Call::SetUniform { .. })));
  }
}
