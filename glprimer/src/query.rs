//! GPU queries.
//!
//! Obtained with [`GraphicsContext::query`](crate::context::GraphicsContext::query).

use crate::backend::query::{Query as QueryBackend, QueryError};

/// Query interface.
#[derive(Debug)]
pub struct Query<'a, B>
where
  B: ?Sized,
{
  backend: &'a B,
}

impl<'a, B> Query<'a, B>
where
  B: ?Sized + QueryBackend,
{
  /// Create a new query interface.
  pub fn new(backend: &'a B) -> Self {
    Self { backend }
  }

  /// Get the backend author.
  pub fn backend_author(&self) -> Result<String, QueryError> {
    self.backend.backend_author()
  }

  /// Get the backend name.
  pub fn backend_name(&self) -> Result<String, QueryError> {
    self.backend.backend_name()
  }

  /// Get the backend version.
  pub fn backend_version(&self) -> Result<String, QueryError> {
    self.backend.backend_version()
  }

  /// Get the backend shading language version.
  pub fn backend_shading_lang_version(&self) -> Result<String, QueryError> {
    self.backend.backend_shading_lang_version()
  }

  /// Get the maximum number of vertex attributes.
  pub fn max_vertex_attribs(&self) -> Result<usize, QueryError> {
    self.backend.max_vertex_attribs()
  }
}
