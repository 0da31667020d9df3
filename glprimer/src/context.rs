//! Graphics context.
//!
//! A graphics context is an object that abstracts all the low-level operations that happen on a
//! graphics device. This crate doesn’t provide you with creating such contexts; windowing crates
//! (for instance `glprimer-sdl2`) do it for you.
//!
//! # On context and threads
//!
//!   - An object which type implements `GraphicsContext` must be `!Send` and `!Sync`: it cannot be
//!     moved nor shared between threads.
//!   - You can only create a single context per thread.

use crate::backend::pipeline::Pipeline;
use crate::backend::query::Query as QueryBackend;
use crate::backend::shader::Shader;
use crate::backend::tess::Tess as TessBackend;
use crate::backend::texture::Texture as TextureBackend;
use crate::pipeline::PipelineGate;
use crate::query::Query;
use crate::shader::{ProgramBuilder, Stage, StageError, StageType};
use crate::tess::TessBuilder;
use crate::texture::{GenMipmaps, Sampler, Texture, TextureError};

/// Class of graphics context.
///
/// # Safety
///
/// The backend returned by [`GraphicsContext::backend`] must be bound to a context current on the
/// calling thread.
pub unsafe trait GraphicsContext: Sized {
  /// Backend type.
  type Backend;

  /// Access the underlying backend.
  fn backend(&mut self) -> &mut Self::Backend;

  /// Create a new shader stage.
  fn new_shader_stage(
    &mut self,
    ty: StageType,
    src: &str,
  ) -> Result<Stage<Self::Backend>, StageError>
  where
    Self::Backend: Shader,
  {
    Stage::new(self, ty, src)
  }

  /// Create a new shader program builder.
  fn new_shader_program(&mut self) -> ProgramBuilder<Self>
  where
    Self::Backend: Shader,
  {
    ProgramBuilder::new(self)
  }

  /// Create a new tessellation builder.
  fn new_tess<V>(&mut self) -> TessBuilder<Self, V>
  where
    Self::Backend: TessBackend,
  {
    TessBuilder::new(self)
  }

  /// Create a new 2D RGB texture from its texels.
  fn new_texture(
    &mut self,
    size: [u32; 2],
    sampler: Sampler,
    mipmaps: GenMipmaps,
    texels: &[u8],
  ) -> Result<Texture<Self::Backend>, TextureError>
  where
    Self::Backend: TextureBackend,
  {
    Texture::new(self, size, sampler, mipmaps, texels)
  }

  /// Create a new pipeline gate, used to render frames.
  fn new_pipeline_gate(&mut self) -> PipelineGate<Self>
  where
    Self::Backend: Pipeline,
  {
    PipelineGate::new(self)
  }

  /// Query information about the backend.
  fn query(&mut self) -> Query<Self::Backend>
  where
    Self::Backend: QueryBackend,
  {
    Query::new(self.backend())
  }
}
