//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for glprimer. The backend type is [`GL33`].

mod pipeline;
mod query;
mod shader;
mod state;
mod tess;
mod texture;

pub use self::shader::{Program, Stage, MAX_INFO_LOG_LEN};
pub use self::state::{GLState, StateQueryError};
pub use self::tess::Tess;
pub use self::texture::Texture;
use gl::types::GLenum;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// This type is to be used as a glprimer backend type. It implements the whole public API.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// Fails if a backend was already created on the current thread.
  pub fn new() -> Result<Self, StateQueryError> {
    let state = GLState::new()?;
    log::debug!("OpenGL 3.3 backend acquired the graphics state");

    Ok(GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Internal access to the backend state.
  ///
  /// # Safety
  ///
  /// This method is **highly unsafe** as it exposes the internals of the backend. Playing with it
  /// should be done with extreme caution.
  pub unsafe fn state(&self) -> &Rc<RefCell<GLState>> {
    &self.state
  }

  /// Pop the oldest error flag raised by the driver, if any.
  pub fn pop_error(&self) -> Option<GLenum> {
    let error = unsafe { gl::GetError() };

    if error == gl::NO_ERROR {
      None
    } else {
      Some(error)
    }
  }
}
