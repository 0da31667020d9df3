//! Texture backend.

use crate::texture::{GenMipmaps, Sampler, TextureError};

/// 2D RGB textures.
pub unsafe trait Texture {
  /// Backend representation of a texture.
  ///
  /// Dropping it must release the texture.
  type TextureRepr;

  /// Create a texture and upload its base level.
  ///
  /// `texels` holds exactly `size[0] * size[1]` tightly packed RGB8 texels, bottom row first.
  unsafe fn new_texture(
    &mut self,
    size: [u32; 2],
    sampler: &Sampler,
    mipmaps: GenMipmaps,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError>;
}
