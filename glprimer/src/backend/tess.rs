//! Tessellation backend.

use crate::tess::{Mode, TessError};
use crate::vertex::VertexDesc;

/// Vertex and index buffers bundled with their layout.
pub unsafe trait Tess {
  /// Backend representation of a tessellation.
  ///
  /// Dropping it must release every buffer it owns.
  type TessRepr;

  /// Upload vertex bytes (and optionally indices) and describe their layout.
  ///
  /// `vertices` holds `vert_nb` vertices laid out as described by `desc`.
  unsafe fn build(
    &mut self,
    desc: &VertexDesc,
    vertices: &[u8],
    vert_nb: usize,
    indices: Option<&[u32]>,
    mode: Mode,
  ) -> Result<Self::TessRepr, TessError>;

  /// Draw the tessellation with the currently used program.
  ///
  /// Indexed tessellations draw their indices, the other ones draw their vertices in order.
  unsafe fn render(&mut self, tess: &Self::TessRepr);
}
