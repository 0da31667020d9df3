//! Pipeline backend.

use crate::backend::shader::Shader;
use crate::backend::tess::Tess;
use crate::backend::texture::Texture;
use crate::pipeline::PipelineState;

/// Per-frame rendering commands.
pub unsafe trait Pipeline: Shader + Tess + Texture {
  /// Apply the pipeline state: viewport, polygon mode, then clear the color buffer if asked.
  unsafe fn start_pipeline(&mut self, state: &PipelineState);

  /// Make the program the current one.
  unsafe fn use_program(&mut self, program: &Self::ProgramRepr);

  /// Bind a texture to a texture unit.
  unsafe fn bind_texture(&mut self, unit: u32, texture: &Self::TextureRepr);
}
