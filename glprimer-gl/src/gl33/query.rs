use crate::gl33::GL33;
use glprimer::backend::query::{Query, QueryError};

unsafe impl Query for GL33 {
  fn backend_author(&self) -> Result<String, QueryError> {
    self
      .state
      .borrow()
      .get_vendor_name()
      .ok_or(QueryError::NoBackendAuthor)
  }

  fn backend_name(&self) -> Result<String, QueryError> {
    self
      .state
      .borrow()
      .get_renderer_name()
      .ok_or(QueryError::NoBackendName)
  }

  fn backend_version(&self) -> Result<String, QueryError> {
    self
      .state
      .borrow()
      .get_gl_version()
      .ok_or(QueryError::NoBackendVersion)
  }

  fn backend_shading_lang_version(&self) -> Result<String, QueryError> {
    self
      .state
      .borrow()
      .get_glsl_version()
      .ok_or(QueryError::NoBackendShadingLanguageVersion)
  }

  fn max_vertex_attribs(&self) -> Result<usize, QueryError> {
    self
      .state
      .borrow()
      .get_max_vertex_attribs()
      .ok_or(QueryError::NoMaxVertexAttribs)
  }
}
