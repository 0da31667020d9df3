//! Vertex sets.
//!
//! A [`Tess`] (short for tessellation) gathers vertices, optional indices and a primitive
//! [`Mode`]. It is built once with a [`TessBuilder`] and is immutable afterwards.
//!
//! - Without indices, vertices are drawn in order.
//! - With indices, the vertices are drawn in the order given by the indices, allowing to reuse
//!   them (a quad is four vertices and six indices).

use crate::backend::tess::Tess as TessBackend;
use crate::context::GraphicsContext;
use crate::vertex::Vertex;
use std::error;
use std::fmt;
use std::mem;
use std::slice;

/// Vertices can be connected via several modes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
  /// A single point.
  Point,
  /// A line, defined by two points.
  Line,
  /// A strip line, defined by at least two points.
  LineStrip,
  /// A triangle, defined by three points.
  Triangle,
  /// A triangle fan: every new vertex forms a triangle with the first one and the previous one.
  TriangleFan,
  /// A triangle strip: every new vertex forms a triangle with the two previous ones.
  TriangleStrip,
}

/// Error that can occur while building a [`Tess`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TessError {
  /// No vertex was provided, or an empty index set was.
  NoData,
  /// The vertex description does not fit in the vertex type.
  IncoherentVertexDesc,
  /// An index refers to a vertex that doesn’t exist.
  IndexOutOfBounds {
    /// The faulty index.
    index: u32,
    /// Number of vertices.
    vert_nb: usize,
  },
  /// The backend failed to create the buffers.
  CannotCreate(String),
}

impl fmt::Display for TessError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      TessError::NoData => f.write_str("no data provided"),
      TessError::IncoherentVertexDesc => f.write_str("vertex description overflows the vertex"),
      TessError::IndexOutOfBounds { index, vert_nb } => write!(
        f,
        "index {} out of bounds (only {} vertices)",
        index, vert_nb
      ),
      TessError::CannotCreate(ref e) => write!(f, "cannot create tessellation: {}", e),
    }
  }
}

impl error::Error for TessError {}

/// [`Tess`] builder.
///
/// Obtained with [`GraphicsContext::new_tess`].
pub struct TessBuilder<'a, C, V> {
  ctx: &'a mut C,
  vertices: &'a [V],
  indices: Option<&'a [u32]>,
  mode: Mode,
}

impl<'a, C, V> TessBuilder<'a, C, V>
where
  C: GraphicsContext,
  C::Backend: TessBackend,
{
  /// Create a new builder. The default mode is [`Mode::Triangle`].
  pub fn new(ctx: &'a mut C) -> Self {
    TessBuilder {
      ctx,
      vertices: &[],
      indices: None,
      mode: Mode::Triangle,
    }
  }

  /// Set the vertices.
  pub fn set_vertices(mut self, vertices: &'a [V]) -> Self {
    self.vertices = vertices;
    self
  }

  /// Set the indices. Without them, the vertices are drawn in order.
  pub fn set_indices(mut self, indices: &'a [u32]) -> Self {
    self.indices = Some(indices);
    self
  }

  /// Set the primitive mode.
  pub fn set_mode(mut self, mode: Mode) -> Self {
    self.mode = mode;
    self
  }
}

impl<'a, C, V> TessBuilder<'a, C, V>
where
  C: GraphicsContext,
  C::Backend: TessBackend,
  V: Vertex,
{
  /// Upload the data and build the [`Tess`].
  pub fn build(self) -> Result<Tess<C::Backend>, TessError> {
    let vert_nb = self.vertices.len();

    if vert_nb == 0 {
      return Err(TessError::NoData);
    }

    let desc = V::vertex_desc();
    if !desc.is_coherent() {
      return Err(TessError::IncoherentVertexDesc);
    }

    if let Some(indices) = self.indices {
      if indices.is_empty() {
        return Err(TessError::NoData);
      }

      if let Some(&index) = indices.iter().find(|&&i| i as usize >= vert_nb) {
        return Err(TessError::IndexOutOfBounds { index, vert_nb });
      }
    }

    // vertices are plain f32 data (see the safety contract of Vertex)
    let bytes = unsafe {
      slice::from_raw_parts(
        self.vertices.as_ptr() as *const u8,
        mem::size_of_val(self.vertices),
      )
    };

    let repr = unsafe {
      self
        .ctx
        .backend()
        .build(&desc, bytes, vert_nb, self.indices, self.mode)?
    };

    Ok(Tess {
      repr,
      vert_nb,
      idx_nb: self.indices.map(<[u32]>::len),
      mode: self.mode,
    })
  }
}

/// A GPU vertex set.
pub struct Tess<B>
where
  B: TessBackend,
{
  pub(crate) repr: B::TessRepr,
  vert_nb: usize,
  idx_nb: Option<usize>,
  mode: Mode,
}

impl<B> Tess<B>
where
  B: TessBackend,
{
  /// Number of vertices.
  pub fn vert_nb(&self) -> usize {
    self.vert_nb
  }

  /// Number of indices, if indexed.
  pub fn idx_nb(&self) -> Option<usize> {
    self.idx_nb
  }

  /// Number of elements a render call draws.
  pub fn render_nb(&self) -> usize {
    self.idx_nb.unwrap_or(self.vert_nb)
  }

  /// Whether the tessellation is drawn through indices.
  pub fn is_indexed(&self) -> bool {
    self.idx_nb.is_some()
  }

  /// Primitive mode.
  pub fn mode(&self) -> Mode {
    self.mode
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::backend::headless::{Call, HeadlessContext};
  use crate::vertex::{VertexAttribDesc, VertexAttribDim, VertexDesc};

  #[repr(C)]
  #[derive(Clone, Copy, Debug)]
  struct Pos([f32; 3]);

  unsafe impl Vertex for Pos {
    fn vertex_desc() -> VertexDesc {
      VertexDesc::new::<Self>(vec![VertexAttribDesc::new(
        0,
        "pos",
        VertexAttribDim::Dim3,
        0,
      )])
    }
  }

  const QUAD: [Pos; 4] = [
    Pos([0.5, 0.5, 0.]),
    Pos([0.5, -0.5, 0.]),
    Pos([-0.5, -0.5, 0.]),
    Pos([-0.5, 0.5, 0.]),
  ];

  #[test]
  fn no_data() {
    let mut ctx = HeadlessContext::new();
    let tess = ctx.new_tess::<Pos>().build();

    assert_eq!(tess.err(), Some(TessError::NoData));
    assert!(ctx.journal().is_empty());
  }

  #[test]
  fn empty_indices() {
    let mut ctx = HeadlessContext::new();
    let tess = ctx
      .new_tess()
      .set_vertices(&QUAD[..])
      .set_indices(&[])
      .build();

    assert_eq!(tess.err(), Some(TessError::NoData));
  }

  #[test]
  fn index_out_of_bounds() {
    let mut ctx = HeadlessContext::new();
    let tess = ctx
      .new_tess()
      .set_vertices(&QUAD[..])
      .set_indices(&[0, 1, 4])
      .build();

    assert_eq!(
      tess.err(),
      Some(TessError::IndexOutOfBounds {
        index: 4,
        vert_nb: 4
      })
    );
  }

  #[test]
  fn indexed_quad() {
    let mut ctx = HeadlessContext::new();
    let tess = ctx
      .new_tess()
      .set_vertices(&QUAD[..])
      .set_indices(&[0, 1, 3, 1, 2, 3])
      .build()
      .unwrap();

    assert_eq!(tess.vert_nb(), 4);
    assert_eq!(tess.render_nb(), 6);
    assert!(tess.is_indexed());
    assert_eq!(
      ctx.journal(),
      vec![Call::BuildTess {
        handle: 1,
        bytes: 4 * 12,
        vert_nb: 4,
        idx_nb: Some(6),
        mode: Mode::Triangle,
      }]
    );
  }

  #[test]
  fn unindexed_triangle() {
    let mut ctx = HeadlessContext::new();
    let tess = ctx
      .new_tess()
      .set_vertices(&QUAD[..3])
      .set_mode(Mode::Triangle)
      .build()
      .unwrap();

    assert!(!tess.is_indexed());
    assert_eq!(tess.render_nb(), 3);
  }
}
