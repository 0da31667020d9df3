//! GPU textures.
//!
//! Textures here are 2D images with three 8-bit normalized channels (RGB), which is what decoded
//! JPEG and PNG files get converted to. They are created once with all their texels and are
//! immutable afterwards, except for the optional mipmap generation happening at creation.

use crate::backend::texture::Texture as TextureBackend;
use crate::context::GraphicsContext;
use std::error;
use std::fmt;

/// How to wrap texture coordinates while sampling textures.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Wrap {
  /// If textures coordinates lay outside of *[0;1]*, they will be clamped to either *0* or *1* for
  /// every components.
  ClampToEdge,
  /// Textures coordinates are repeated if they lay outside of *[0;1]*.
  Repeat,
  /// Same as `Repeat` but it will alternatively repeat between *[0;1]* and *[1;0]*.
  MirroredRepeat,
}

/// Minification filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MinFilter {
  /// Nearest interpolation.
  Nearest,
  /// Linear interpolation between surrounding pixels.
  Linear,
  /// Nearest texel of the nearest mipmap.
  NearestMipmapNearest,
  /// Nearest texel, linearly interpolated between the two nearest mipmaps.
  NearestMipmapLinear,
  /// Linear interpolation in the nearest mipmap.
  LinearMipmapNearest,
  /// Linear interpolation, linearly interpolated between the two nearest mipmaps.
  LinearMipmapLinear,
}

/// Magnification filter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MagFilter {
  /// Nearest interpolation.
  Nearest,
  /// Linear interpolation between surrounding pixels.
  Linear,
}

/// A sampler configures how a texture is read in shaders.
///
/// The default sampler matches the default state of an OpenGL texture: repeat on both axes,
/// nearest-mipmap-linear minification and linear magnification.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sampler {
  /// How should we wrap around the *s* sampling coordinate?
  pub wrap_s: Wrap,
  /// How should we wrap around the *t* sampling coordinate?
  pub wrap_t: Wrap,
  /// Minification filter.
  pub min_filter: MinFilter,
  /// Magnification filter.
  pub mag_filter: MagFilter,
}

impl Default for Sampler {
  fn default() -> Self {
    Sampler {
      wrap_s: Wrap::Repeat,
      wrap_t: Wrap::Repeat,
      min_filter: MinFilter::NearestMipmapLinear,
      mag_filter: MagFilter::Linear,
    }
  }
}

/// Whether mipmaps are generated when the texture is created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GenMipmaps {
  /// Generate the whole mipmap chain.
  Yes,
  /// Only the base level exists.
  No,
}

/// Errors that might happen when working with textures.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextureError {
  /// A texture’s storage failed to be created.
  TextureStorageCreationFailed(String),
  /// One of the dimensions is zero.
  EmptySize([u32; 2]),
  /// Not the expected number of texel bytes: expected then provided.
  NotEnoughPixels(usize, usize),
}

impl fmt::Display for TextureError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      TextureError::TextureStorageCreationFailed(ref e) => {
        write!(f, "texture storage creation failed: {}", e)
      }
      TextureError::EmptySize([w, h]) => write!(f, "empty texture size: {}×{}", w, h),
      TextureError::NotEnoughPixels(expected, provided) => write!(
        f,
        "not enough texels provided: expected {} bytes, provided {}",
        expected, provided
      ),
    }
  }
}

impl error::Error for TextureError {}

/// Number of bytes a single RGB8 texel takes.
pub const TEXEL_BYTES: usize = 3;

/// A 2D RGB texture.
pub struct Texture<B>
where
  B: TextureBackend,
{
  pub(crate) repr: B::TextureRepr,
  size: [u32; 2],
}

impl<B> Texture<B>
where
  B: TextureBackend,
{
  /// Create a texture from tightly packed RGB8 texels, bottom row first.
  pub fn new<C>(
    ctx: &mut C,
    size: [u32; 2],
    sampler: Sampler,
    mipmaps: GenMipmaps,
    texels: &[u8],
  ) -> Result<Self, TextureError>
  where
    C: GraphicsContext<Backend = B>,
  {
    if size[0] == 0 || size[1] == 0 {
      return Err(TextureError::EmptySize(size));
    }

    let expected = size[0] as usize * size[1] as usize * TEXEL_BYTES;
    if texels.len() != expected {
      return Err(TextureError::NotEnoughPixels(expected, texels.len()));
    }

    let repr = unsafe {
      ctx
        .backend()
        .new_texture(size, &sampler, mipmaps, texels)?
    };

    Ok(Texture { repr, size })
  }

  /// Size of the texture.
  pub fn size(&self) -> [u32; 2] {
    self.size
  }
}
