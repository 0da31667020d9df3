//! Graphics state.

use gl::types::*;
use glprimer::pipeline::PolygonMode;
use std::cell::RefCell;
use std::error;
use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

// Take the graphics state token of the current thread; only the first call on a thread succeeds.
fn acquire_thread_state() -> bool {
  TLS_ACQUIRE_GFX_STATE.with(|rc| rc.borrow_mut().take().is_some())
}

/// Cached value.
///
/// A cached value is used to prevent issuing costly GPU commands if we know the target value is
/// already set to what the command tries to set. For instance, if you ask to use a program `3`
/// once, that value will be set on the GPU and cached on our side. Later, if no other program has
/// been used, asking to use the program `3` again doesn’t perform anything GPU-wise.
#[derive(Debug)]
struct Cached<T>(T)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  /// Cache a value.
  fn new(initial: T) -> Self {
    Cached(initial)
  }

  fn set(&mut self, value: T) {
    self.0 = value;
  }

  /// Check if the cached value differs from a value ([`PartialEq`]).
  fn is_invalid(&self, new_val: &T) -> bool {
    self.0 != *new_val
  }
}

/// The graphics state.
///
/// This type represents the current state of a given graphics context. It acts as a forward-gate
/// to the low-level API and adds a small cache layer over it to prevent from issuing the same API
/// call (with the same parameters) twice.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  // viewport
  viewport: Cached<[GLint; 4]>,

  // clear buffers
  clear_color: Cached<[GLfloat; 4]>,

  // rasterization
  polygon_mode: Cached<PolygonMode>,

  // texture
  current_texture_unit: Cached<GLenum>,
  bound_textures: Vec<GLuint>,

  // array buffer
  bound_array_buffer: GLuint,

  // element buffer
  bound_element_array_buffer: GLuint,

  // vertex array
  bound_vertex_array: GLuint,

  // shader program
  current_program: GLuint,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    if acquire_thread_state() {
      Self::get_from_context()
    } else {
      Err(StateQueryError::UnavailableGLState)
    }
  }

  /// Get a `GLState` from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let viewport = Cached::new(get_ctx_viewport()?);
      let clear_color = Cached::new(get_ctx_clear_color()?);
      let polygon_mode = Cached::new(PolygonMode::Fill);
      let current_texture_unit = Cached::new(get_ctx_current_texture_unit()?);
      let bound_textures = vec![0; 16]; // 16 is the platform minimal requirement
      let bound_vertex_array = get_ctx_bound_vertex_array()?;
      let current_program = get_ctx_current_program()?;

      Ok(GLState {
        _a: PhantomData,
        viewport,
        clear_color,
        polygon_mode,
        current_texture_unit,
        bound_textures,
        bound_array_buffer: 0,
        bound_element_array_buffer: 0,
        bound_vertex_array,
        current_program,
      })
    }
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.is_invalid(&viewport) {
      gl::Viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
      self.viewport.set(viewport);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn set_polygon_mode(&mut self, mode: PolygonMode) {
    if self.polygon_mode.is_invalid(&mode) {
      gl::PolygonMode(gl::FRONT_AND_BACK, opengl_polygon_mode(mode));
      self.polygon_mode.set(mode);
    }
  }

  pub(crate) unsafe fn set_texture_unit(&mut self, unit: u32) {
    let unit = gl::TEXTURE0 + unit;

    if self.current_texture_unit.is_invalid(&unit) {
      gl::ActiveTexture(unit);
      self.current_texture_unit.set(unit);
    }
  }

  pub(crate) unsafe fn bind_texture(&mut self, handle: GLuint) {
    let unit = (self.current_texture_unit.0 - gl::TEXTURE0) as usize;

    match self.bound_textures.get(unit).cloned() {
      Some(handle_) if handle != handle_ => {
        gl::BindTexture(gl::TEXTURE_2D, handle);
        self.bound_textures[unit] = handle;
      }

      None => {
        gl::BindTexture(gl::TEXTURE_2D, handle);

        // not enough registered texture units; let’s grow a bit more
        self.bound_textures.resize(unit + 1, 0);
        self.bound_textures[unit] = handle;
      }

      _ => (), // cached
    }
  }

  /// Forget a texture that is about to be deleted.
  pub(crate) fn unbind_texture(&mut self, handle: GLuint) {
    for t in self.bound_textures.iter_mut().filter(|t| **t == handle) {
      *t = 0;
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer = handle;
    }
  }

  pub(crate) unsafe fn bind_element_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_element_array_buffer != handle {
      gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, handle);
      self.bound_element_array_buffer = handle;
    }
  }

  /// Forget a buffer that is about to be deleted.
  pub(crate) fn unbind_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bound_array_buffer = 0;
    }

    if self.bound_element_array_buffer == handle {
      self.bound_element_array_buffer = 0;
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;

      // the element buffer binding is part of the vertex array state
      self.bound_element_array_buffer = 0;
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self) {
    self.bind_vertex_array(0, Bind::Cached)
  }

  /// Forget a vertex array that is about to be deleted.
  pub(crate) fn forget_vertex_array(&mut self, handle: GLuint) {
    if self.bound_vertex_array == handle {
      self.bound_vertex_array = 0;
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    }
  }

  /// Forget a program that is about to be deleted.
  pub(crate) fn forget_program(&mut self, handle: GLuint) {
    if self.current_program == handle {
      self.current_program = 0;
    }
  }

  pub(crate) fn get_vendor_name(&self) -> Option<String> {
    unsafe { get_string(gl::VENDOR) }
  }

  pub(crate) fn get_renderer_name(&self) -> Option<String> {
    unsafe { get_string(gl::RENDERER) }
  }

  pub(crate) fn get_gl_version(&self) -> Option<String> {
    unsafe { get_string(gl::VERSION) }
  }

  pub(crate) fn get_glsl_version(&self) -> Option<String> {
    unsafe { get_string(gl::SHADING_LANGUAGE_VERSION) }
  }

  pub(crate) fn get_max_vertex_attribs(&self) -> Option<usize> {
    let mut max = -1;

    unsafe {
      gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut max);

      if gl::GetError() != gl::NO_ERROR {
        return None;
      }
    }

    vertex_attribs_limit(max)
  }
}

/// Should the binding be cached or forced to the provided value?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

// GL 3.3 guarantees at least 16 attributes; anything not positive is a broken answer.
fn vertex_attribs_limit(raw: GLint) -> Option<usize> {
  if raw > 0 {
    Some(raw as usize)
  } else {
    None
  }
}

#[inline]
pub(crate) fn opengl_polygon_mode(mode: PolygonMode) -> GLenum {
  match mode {
    PolygonMode::Fill => gl::FILL,
    PolygonMode::Line => gl::LINE,
    PolygonMode::Point => gl::POINT,
  }
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
  /// Corrupted active texture unit.
  UnknownTextureUnit(GLint),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::UnknownTextureUnit(ref u) => write!(f, "unknown texture unit: {}", u),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_string(name: GLenum) -> Option<String> {
  let s = gl::GetString(name);

  if s.is_null() {
    None
  } else {
    Some(
      CStr::from_ptr(s as *const _)
        .to_string_lossy()
        .into_owned(),
    )
  }
}

unsafe fn get_ctx_viewport() -> Result<[GLint; 4], StateQueryError> {
  let mut data = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, data.as_mut_ptr());
  Ok(data)
}

unsafe fn get_ctx_clear_color() -> Result<[GLfloat; 4], StateQueryError> {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  Ok(data)
}

unsafe fn get_ctx_current_texture_unit() -> Result<GLenum, StateQueryError> {
  let mut active_texture = gl::TEXTURE0 as GLint;
  gl::GetIntegerv(gl::ACTIVE_TEXTURE, &mut active_texture);

  if active_texture < gl::TEXTURE0 as GLint {
    Err(StateQueryError::UnknownTextureUnit(active_texture))
  } else {
    Ok(active_texture as GLenum)
  }
}

unsafe fn get_ctx_bound_vertex_array() -> Result<GLuint, StateQueryError> {
  let mut bound = 0 as GLint;
  gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut bound);
  Ok(bound as GLuint)
}

unsafe fn get_ctx_current_program() -> Result<GLuint, StateQueryError> {
  let mut used = 0 as GLint;
  gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut used);
  Ok(used as GLuint)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_value() {
    let mut cached = Cached::new(3);

    assert!(!cached.is_invalid(&3));
    assert!(cached.is_invalid(&4));

    cached.set(4);
    assert!(!cached.is_invalid(&4));
    assert!(cached.is_invalid(&3));
  }

  // a state that never talks to the driver; only the bookkeeping paths are exercised
  fn detached_state() -> GLState {
    GLState {
      _a: PhantomData,
      viewport: Cached::new([0; 4]),
      clear_color: Cached::new([0.; 4]),
      polygon_mode: Cached::new(PolygonMode::Fill),
      current_texture_unit: Cached::new(gl::TEXTURE0),
      bound_textures: vec![0; 16],
      bound_array_buffer: 0,
      bound_element_array_buffer: 0,
      bound_vertex_array: 0,
      current_program: 0,
    }
  }

  #[test]
  fn deleted_program_is_forgotten() {
    let mut state = detached_state();
    state.current_program = 3;

    state.forget_program(4);
    assert_eq!(state.current_program, 3);

    state.forget_program(3);
    assert_eq!(state.current_program, 0);
  }

  #[test]
  fn deleted_objects_are_forgotten() {
    let mut state = detached_state();
    state.bound_textures[0] = 5;
    state.bound_textures[1] = 6;
    state.bound_array_buffer = 7;
    state.bound_element_array_buffer = 8;
    state.bound_vertex_array = 9;

    state.unbind_texture(5);
    state.unbind_buffer(7);
    state.unbind_buffer(8);
    state.forget_vertex_array(9);

    assert_eq!(&state.bound_textures[..2], &[0, 6]);
    assert_eq!(state.bound_array_buffer, 0);
    assert_eq!(state.bound_element_array_buffer, 0);
    assert_eq!(state.bound_vertex_array, 0);
  }

  #[test]
  fn vertex_attribs_limits() {
    assert_eq!(vertex_attribs_limit(16), Some(16));
    assert_eq!(vertex_attribs_limit(0), None);
    assert_eq!(vertex_attribs_limit(-1), None);
  }

  #[test]
  fn one_state_per_thread() {
    // every test runs on its own thread
    assert!(acquire_thread_state());
    assert!(!acquire_thread_state());

    let other = std::thread::spawn(acquire_thread_state).join().unwrap();
    assert!(other);
  }

  #[test]
  fn polygon_modes() {
    assert_eq!(opengl_polygon_mode(PolygonMode::Fill), gl::FILL);
    assert_eq!(opengl_polygon_mode(PolygonMode::Line), gl::LINE);
    assert_eq!(opengl_polygon_mode(PolygonMode::Point), gl::POINT);
  }
}
