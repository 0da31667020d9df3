use crate::gl33::state::{Bind, GLState};
use crate::gl33::GL33;
use gl::types::*;
use glprimer::backend::tess::Tess as TessBackend;
use glprimer::tess::{Mode, TessError};
use glprimer::vertex::{VertexAttribDesc, VertexDesc};
use std::cell::RefCell;
use std::mem;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

/// A vertex array object with its vertex buffer and optional element buffer.
#[derive(Debug)]
pub struct Tess {
  vao: GLuint,
  vbo: GLuint,
  ebo: Option<GLuint>,
  vert_nb: usize,
  idx_nb: Option<usize>,
  mode: GLenum,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Tess {
  fn drop(&mut self) {
    let mut state = self.state.borrow_mut();

    unsafe {
      state.forget_vertex_array(self.vao);
      gl::DeleteVertexArrays(1, &self.vao);

      state.unbind_buffer(self.vbo);
      gl::DeleteBuffers(1, &self.vbo);

      if let Some(ebo) = self.ebo {
        state.unbind_buffer(ebo);
        gl::DeleteBuffers(1, &ebo);
      }
    }
  }
}

unsafe impl TessBackend for GL33 {
  type TessRepr = Tess;

  unsafe fn build(
    &mut self,
    desc: &VertexDesc,
    vertices: &[u8],
    vert_nb: usize,
    indices: Option<&[u32]>,
    mode: Mode,
  ) -> Result<Self::TessRepr, TessError> {
    let mut state = self.state.borrow_mut();

    let mut vao: GLuint = 0;
    gl::GenVertexArrays(1, &mut vao);

    if vao == 0 {
      return Err(TessError::CannotCreate(
        "unable to create vertex array".to_owned(),
      ));
    }

    state.bind_vertex_array(vao, Bind::Forced);

    let vbo = upload_buffer(&mut state, gl::ARRAY_BUFFER, vertices);
    set_vertex_pointers(desc);

    // the element buffer binding is recorded by the vertex array while it’s bound
    let ebo = indices.map(|indices| {
      let bytes = std::slice::from_raw_parts(
        indices.as_ptr() as *const u8,
        mem::size_of_val(indices),
      );
      upload_buffer(&mut state, gl::ELEMENT_ARRAY_BUFFER, bytes)
    });

    state.unbind_vertex_array();

    Ok(Tess {
      vao,
      vbo,
      ebo,
      vert_nb,
      idx_nb: indices.map(<[u32]>::len),
      mode: opengl_mode(mode),
      state: self.state.clone(),
    })
  }

  unsafe fn render(&mut self, tess: &Self::TessRepr) {
    self
      .state
      .borrow_mut()
      .bind_vertex_array(tess.vao, Bind::Cached);

    match tess.idx_nb {
      Some(idx_nb) => gl::DrawElements(
        tess.mode,
        idx_nb as GLsizei,
        gl::UNSIGNED_INT,
        ptr::null(),
      ),

      None => gl::DrawArrays(tess.mode, 0, tess.vert_nb as GLsizei),
    }
  }
}

unsafe fn upload_buffer(state: &mut GLState, target: GLenum, bytes: &[u8]) -> GLuint {
  let mut handle: GLuint = 0;
  gl::GenBuffers(1, &mut handle);

  if target == gl::ELEMENT_ARRAY_BUFFER {
    state.bind_element_array_buffer(handle, Bind::Forced);
  } else {
    state.bind_array_buffer(handle, Bind::Forced);
  }

  gl::BufferData(
    target,
    bytes.len() as GLsizeiptr,
    bytes.as_ptr() as *const c_void,
    gl::STATIC_DRAW,
  );

  handle
}

// Set the vertex attribute pointers of the currently bound array buffer.
unsafe fn set_vertex_pointers(desc: &VertexDesc) {
  let stride = desc.stride as GLsizei;

  for attrib in &desc.attribs {
    set_component_format(stride, attrib);
  }
}

unsafe fn set_component_format(stride: GLsizei, attrib: &VertexAttribDesc) {
  let index = attrib.index as GLuint;

  gl::VertexAttribPointer(
    index,
    attrib.dim.components() as GLint,
    gl::FLOAT,
    gl::FALSE,
    stride,
    ptr::null::<c_void>().add(attrib.offset),
  );
  gl::EnableVertexAttribArray(index);
}

fn opengl_mode(mode: Mode) -> GLenum {
  match mode {
    Mode::Point => gl::POINTS,
    Mode::Line => gl::LINES,
    Mode::LineStrip => gl::LINE_STRIP,
    Mode::Triangle => gl::TRIANGLES,
    Mode::TriangleFan => gl::TRIANGLE_FAN,
    Mode::TriangleStrip => gl::TRIANGLE_STRIP,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn primitive_modes() {
    assert_eq!(opengl_mode(Mode::Point), gl::POINTS);
    assert_eq!(opengl_mode(Mode::Line), gl::LINES);
    assert_eq!(opengl_mode(Mode::LineStrip), gl::LINE_STRIP);
    assert_eq!(opengl_mode(Mode::Triangle), gl::TRIANGLES);
    assert_eq!(opengl_mode(Mode::TriangleFan), gl::TRIANGLE_FAN);
    assert_eq!(opengl_mode(Mode::TriangleStrip), gl::TRIANGLE_STRIP);
  }
}
