//! glprimer examples.
//!
//! This project provides the introductory programs: opening a window, drawing a first shape,
//! feeding shaders with vertex attributes and uniforms, and sampling textures. The examples are
//! made platform-agnostic on purpose, so that the code running them (the desktop runner, or a
//! recording backend in tests) is written once for the whole set of examples.
//!
//! # Example architecture
//!
//! Examples are simple modules exposed from this crate. They do not depend on any
//! platform-specific concepts, such as system events or system window capacities. For that reason,
//! whenever an example requires user interaction or resources, an abstract type is used from this
//! crate, which is exposed by the platform code running the example.
//!
//! Examples are responsible for allocating the GPU resources and implementing their loop with the
//! [`Example`] trait.
//!
//! # Error handling
//!
//! - A shader program that fails to build is logged; the example keeps running and draws nothing.
//! - A texture that cannot be fetched or created is logged and left unbound.
//! - Geometry that cannot be uploaded stops the example before its first frame.

use glprimer::backend::Backend;
use glprimer::context::GraphicsContext;
use glprimer::tess::TessError;
use std::error;
use std::fmt;

pub mod hello_triangle;
pub mod hello_window;
pub mod shaders;
pub mod shared;
pub mod textures;

/// Example interface.
pub trait Example<B>: Sized
where
  B: Backend,
{
  /// Title of the window the example runs in.
  const TITLE: &'static str;

  /// Features the example needs from the platform.
  fn features() -> Features {
    Features::none()
  }

  /// Bootstrap the example.
  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, ExampleError>;

  /// Render a frame of the example.
  ///
  /// `time` is the number of seconds elapsed since the example started and `size` the size of the
  /// framebuffer.
  fn render_frame(
    self,
    time: f32,
    size: [u32; 2],
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> LoopFeedback<Self>;
}

/// A type used to pass “inputs” to examples.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,
}

/// Whether the loop should carry on with the example or stop.
#[derive(Debug)]
pub enum LoopFeedback<T> {
  /// Keep rendering frames.
  Continue(T),
  /// Stop right away.
  Exit,
}

impl<T> LoopFeedback<T> {
  /// Whether the loop stops.
  pub fn is_exit(&self) -> bool {
    matches!(self, LoopFeedback::Exit)
  }
}

/// Features the platform must provide before an example starts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Features {
  textures: Vec<String>,
}

impl Features {
  /// No feature.
  pub fn none() -> Self {
    Features::default()
  }

  /// Require a texture, by name.
  pub fn texture(mut self, name: impl Into<String>) -> Self {
    self.textures.push(name.into());
    self
  }

  /// Textures required, by name.
  pub fn textures(&self) -> &[String] {
    &self.textures
  }
}

/// Services provided by the platform running the examples.
pub trait PlatformServices {
  /// Error returned when a resource cannot be fetched.
  type FetchError: error::Error;

  /// Fetch a decoded RGB image by name.
  ///
  /// The first row of the image is its bottom row.
  fn fetch_texture(&mut self, name: impl AsRef<str>) -> Result<&image::RgbImage, Self::FetchError>;

  /// Whether polygons should be filled instead of drawn as wireframes, where an example gives the
  /// choice.
  fn fill_polygons(&self) -> bool {
    false
  }
}

/// Errors that prevent an example from starting.
#[non_exhaustive]
#[derive(Debug)]
pub enum ExampleError {
  /// Static geometry cannot be uploaded.
  Tess(TessError),
}

impl fmt::Display for ExampleError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      ExampleError::Tess(ref e) => write!(f, "cannot upload geometry: {}", e),
    }
  }
}

impl error::Error for ExampleError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ExampleError::Tess(e) => Some(e),
    }
  }
}

impl From<TessError> for ExampleError {
  fn from(e: TessError) -> Self {
    ExampleError::Tess(e)
  }
}

/// Whether the batch of actions asks to quit.
///
/// The whole batch is drained.
pub fn wants_to_quit(actions: impl Iterator<Item = InputAction>) -> bool {
  actions.fold(false, |quit, action| quit || action == InputAction::Quit)
}
