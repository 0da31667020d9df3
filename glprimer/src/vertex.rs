//! Vertex formats.
//!
//! Vertices are plain `#[repr(C)]` structs made of `f32` fields (scalars or arrays of up to four
//! components). Their memory layout is described to the backend with a [`VertexDesc`], provided by
//! implementing [`Vertex`].
//!
//! ```ignore
//! #[repr(C)]
//! #[derive(Clone, Copy, Debug)]
//! struct ColorVertex {
//!   pos: [f32; 3],
//!   rgb: [f32; 3],
//! }
//!
//! unsafe impl Vertex for ColorVertex {
//!   fn vertex_desc() -> VertexDesc {
//!     VertexDesc::new::<Self>(vec![
//!       VertexAttribDesc::new(0, "pos", VertexAttribDim::Dim3, 0),
//!       VertexAttribDesc::new(1, "color", VertexAttribDim::Dim3, 3 * 4),
//!     ])
//!   }
//! }
//! ```

use std::mem;

/// Number of `f32` components of a vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VertexAttribDim {
  /// Scalar.
  Dim1,
  /// 2D vector.
  Dim2,
  /// 3D vector.
  Dim3,
  /// 4D vector.
  Dim4,
}

impl VertexAttribDim {
  /// Number of components.
  pub fn components(self) -> usize {
    match self {
      VertexAttribDim::Dim1 => 1,
      VertexAttribDim::Dim2 => 2,
      VertexAttribDim::Dim3 => 3,
      VertexAttribDim::Dim4 => 4,
    }
  }

  /// Size in bytes.
  pub fn bytes(self) -> usize {
    self.components() * mem::size_of::<f32>()
  }
}

/// Description of a single vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttribDesc {
  /// Attribute location in the vertex shader (`layout (location = …)`).
  pub index: u32,
  /// Name of the attribute, for diagnostics.
  pub name: &'static str,
  /// Number of components.
  pub dim: VertexAttribDim,
  /// Offset in bytes from the start of the vertex.
  pub offset: usize,
}

impl VertexAttribDesc {
  /// Describe an attribute.
  pub const fn new(index: u32, name: &'static str, dim: VertexAttribDim, offset: usize) -> Self {
    VertexAttribDesc {
      index,
      name,
      dim,
      offset,
    }
  }
}

/// Memory layout of a vertex type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VertexDesc {
  /// Size in bytes of a whole vertex.
  pub stride: usize,
  /// Attributes, in any order.
  pub attribs: Vec<VertexAttribDesc>,
}

impl VertexDesc {
  /// Describe the vertex type `V` by its attributes; the stride is the size of `V`.
  pub fn new<V>(attribs: Vec<VertexAttribDesc>) -> Self {
    VertexDesc {
      stride: mem::size_of::<V>(),
      attribs,
    }
  }

  /// Check that every attribute fits in the stride.
  pub fn is_coherent(&self) -> bool {
    self
      .attribs
      .iter()
      .all(|a| a.offset + a.dim.bytes() <= self.stride)
  }
}

/// Vertex types.
///
/// # Safety
///
/// The type must be `#[repr(C)]`, only contain `f32` data and the returned description must match
/// its layout exactly: its bytes are sent as-is to the GPU.
pub unsafe trait Vertex: Copy {
  /// Layout of the vertex.
  fn vertex_desc() -> VertexDesc;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[repr(C)]
  #[derive(Clone, Copy, Debug)]
  struct Textured {
    pos: [f32; 3],
    rgb: [f32; 3],
    uv: [f32; 2],
  }

  unsafe impl Vertex for Textured {
    fn vertex_desc() -> VertexDesc {
      VertexDesc::new::<Self>(vec![
        VertexAttribDesc::new(0, "pos", VertexAttribDim::Dim3, 0),
        VertexAttribDesc::new(1, "color", VertexAttribDim::Dim3, 12),
        VertexAttribDesc::new(2, "texcoord", VertexAttribDim::Dim2, 24),
      ])
    }
  }

  #[test]
  fn stride_is_vertex_size() {
    let desc = Textured::vertex_desc();

    assert_eq!(desc.stride, 8 * 4);
    assert!(desc.is_coherent());
  }

  #[test]
  fn overflowing_attribute_is_incoherent() {
    let desc = VertexDesc::new::<[f32; 3]>(vec![VertexAttribDesc::new(
      0,
      "pos",
      VertexAttribDim::Dim4,
      0,
    )]);

    assert!(!desc.is_coherent());
  }
}
