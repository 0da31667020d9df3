//! Vertex types and helpers shared by the examples.

use crate::PlatformServices;
use glprimer::backend::Backend;
use glprimer::context::GraphicsContext;
use glprimer::shader::Program;
use glprimer::texture::{GenMipmaps, Sampler, Texture};
use glprimer::vertex::{Vertex, VertexAttribDesc, VertexAttribDim, VertexDesc};
use std::mem;

/// Color the framebuffer is cleared with at the start of every frame.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

// attribute locations, matching the `layout (location = …)` qualifiers of the vertex shaders
const POSITION_LOC: u32 = 0;
const COLOR_LOC: u32 = 1;
const TEXCOORD_LOC: u32 = 2;

/// A vertex holding only a position.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionVertex {
  pub pos: [f32; 3],
}

unsafe impl Vertex for PositionVertex {
  fn vertex_desc() -> VertexDesc {
    VertexDesc::new::<Self>(vec![VertexAttribDesc::new(
      POSITION_LOC,
      "pos",
      VertexAttribDim::Dim3,
      0,
    )])
  }
}

/// A vertex with a position and a color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorVertex {
  pub pos: [f32; 3],
  pub rgb: [f32; 3],
}

unsafe impl Vertex for ColorVertex {
  fn vertex_desc() -> VertexDesc {
    VertexDesc::new::<Self>(vec![
      VertexAttribDesc::new(POSITION_LOC, "pos", VertexAttribDim::Dim3, 0),
      VertexAttribDesc::new(
        COLOR_LOC,
        "color",
        VertexAttribDim::Dim3,
        mem::size_of::<[f32; 3]>(),
      ),
    ])
  }
}

/// A vertex with a position, a color and texture coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexturedVertex {
  pub pos: [f32; 3],
  pub rgb: [f32; 3],
  pub uv: [f32; 2],
}

unsafe impl Vertex for TexturedVertex {
  fn vertex_desc() -> VertexDesc {
    VertexDesc::new::<Self>(vec![
      VertexAttribDesc::new(POSITION_LOC, "pos", VertexAttribDim::Dim3, 0),
      VertexAttribDesc::new(
        COLOR_LOC,
        "color",
        VertexAttribDim::Dim3,
        mem::size_of::<[f32; 3]>(),
      ),
      VertexAttribDesc::new(
        TEXCOORD_LOC,
        "texcoord",
        VertexAttribDim::Dim2,
        2 * mem::size_of::<[f32; 3]>(),
      ),
    ])
  }
}

/// Indices of a quad made of four vertices (top right, bottom right, bottom left, top left).
pub const QUAD_INDICES: [u32; 6] = [
  0, 1, 3, // first triangle
  1, 2, 3, // second triangle
];

/// Compile and link a program, logging the failure if any.
pub fn build_program<B>(
  context: &mut impl GraphicsContext<Backend = B>,
  vs: &str,
  fs: &str,
) -> Option<Program<B>>
where
  B: Backend,
{
  context
    .new_shader_program()
    .from_strings(vs, fs)
    .map_err(|e| log::error!("cannot build shader program: {}", e))
    .ok()
}

/// Fetch an image from the platform and upload it as a mipmapped texture.
pub fn load_texture<B>(
  context: &mut impl GraphicsContext<Backend = B>,
  platform: &mut impl PlatformServices,
  name: impl AsRef<str>,
) -> Option<Texture<B>>
where
  B: Backend,
{
  let name = name.as_ref();
  let img = platform
    .fetch_texture(name)
    .map_err(|e| log::error!("error while loading image {}: {}", name, e))
    .ok()?;
  let (width, height) = img.dimensions();
  let texels = img.as_raw();

  context
    .new_texture(
      [width, height],
      Sampler::default(),
      GenMipmaps::Yes,
      texels,
    )
    .map_err(|e| log::error!("error while creating texture {}: {}", name, e))
    .ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vertex_layouts() {
    assert_eq!(PositionVertex::vertex_desc().stride, 12);
    assert_eq!(ColorVertex::vertex_desc().stride, 24);

    let textured = TexturedVertex::vertex_desc();
    assert_eq!(textured.stride, 32);
    assert!(textured.is_coherent());
    assert_eq!(
      textured.attribs.iter().map(|a| a.offset).collect::<Vec<_>>(),
      vec![0, 12, 24]
    );
  }
}
