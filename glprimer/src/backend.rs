//! Backend interfaces.
//!
//! A backend is a type implementing every trait of this module. The public API of the crate only
//! speaks to backends through those traits, which are `unsafe` to implement and to call: they
//! perform raw graphics API calls and assume a context is current on the calling thread.

pub mod pipeline;
pub mod query;
pub mod shader;
pub mod tess;
pub mod texture;

#[cfg(any(test, feature = "headless"))]
pub mod headless;

use crate::shader::TextureBinding;

/// Everything a backend must support to run the example programs.
///
/// This trait is automatically implemented for every type implementing all the required backend
/// traits; you never implement it by hand.
pub trait Backend:
  shader::Shader
  + shader::Uniformable<f32>
  + shader::Uniformable<[f32; 4]>
  + shader::Uniformable<TextureBinding>
  + tess::Tess
  + texture::Texture
  + pipeline::Pipeline
  + query::Query
{
}

impl<B> Backend for B where
  B: shader::Shader
    + shader::Uniformable<f32>
    + shader::Uniformable<[f32; 4]>
    + shader::Uniformable<TextureBinding>
    + tess::Tess
    + texture::Texture
    + pipeline::Pipeline
    + query::Query
{
}
