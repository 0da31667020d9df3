//! [SDL2](https://crates.io/crates/sdl2) backend for glprimer and glprimer-windowing.
//!
//! The surface opens a window with an OpenGL 3.3 Core, forward-compatible context, makes it current
//! on the calling thread, loads the OpenGL function pointers and acquires the [`GL33`] backend.

#![deny(missing_docs)]

use glprimer::context::GraphicsContext;
pub use glprimer_gl::gl33::StateQueryError;
use glprimer_gl::GL33;
use glprimer_windowing::{WindowDim, WindowOpt};
pub use sdl2;
use sdl2::video::SwapInterval;
use std::error;
use std::fmt;
use std::os::raw::c_void;

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum Sdl2SurfaceError {
  /// Initialization of the surface went wrong.
  InitError(String),
  /// Window creation failed.
  WindowCreationFailed(sdl2::video::WindowBuildError),
  /// Failed to create an OpenGL context.
  GlContextInitFailed(String),
  /// No available video mode.
  VideoInitError(String),
  /// The event pump cannot be obtained.
  EventPumpError(String),
  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
  /// SDL2 cannot request that many samples per pixel.
  UnsupportedSampleCount(u32),
}

impl fmt::Display for Sdl2SurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      Sdl2SurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      Sdl2SurfaceError::WindowCreationFailed(ref e) => write!(f, "failed to create window: {}", e),
      Sdl2SurfaceError::GlContextInitFailed(ref e) => {
        write!(f, "failed to create OpenGL context: {}", e)
      }
      Sdl2SurfaceError::VideoInitError(ref e) => {
        write!(f, "failed to initialize video system: {}", e)
      }
      Sdl2SurfaceError::EventPumpError(ref e) => write!(f, "failed to get event pump: {}", e),
      Sdl2SurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
      Sdl2SurfaceError::UnsupportedSampleCount(samples) => {
        write!(f, "unsupported number of samples per pixel: {}", samples)
      }
    }
  }
}

impl error::Error for Sdl2SurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Sdl2SurfaceError::WindowCreationFailed(e) => Some(e),
      Sdl2SurfaceError::GraphicsStateError(e) => Some(e),
      _ => None,
    }
  }
}

/// A glprimer [`GraphicsContext`] backed by SDL2 and OpenGL 3.3 Core.
///
/// ```ignore
/// use glprimer_sdl2::GL33Surface;
/// use glprimer_windowing::WindowOpt;
///
/// let surface = GL33Surface::new("My Game Window", WindowOpt::default())?;
/// ```
///
/// Every GPU object created through the surface must be dropped before the surface.
pub struct GL33Surface {
  // fields are dropped in declaration order: the backend and the context go before the window
  gl: GL33,
  _gl_context: sdl2::video::GLContext,
  window: sdl2::video::Window,
  video: sdl2::VideoSubsystem,
  sdl: sdl2::Sdl,
}

impl GL33Surface {
  /// Create a new surface with a title and window options.
  pub fn new(title: &str, win_opt: WindowOpt) -> Result<Self, Sdl2SurfaceError> {
    let samples = win_opt
      .num_samples()
      .map(multisample_samples)
      .transpose()?;

    let surface = Self::build_with(|video| {
      let gl_attr = video.gl_attr();

      if let Some(samples) = samples {
        gl_attr.set_multisample_buffers(1);
        gl_attr.set_multisample_samples(samples);
      }

      let [width, height] = win_opt.dim().size();
      let mut builder = video.window(title, width, height);

      match win_opt.dim() {
        WindowDim::Windowed(..) => {
          builder.position_centered();
        }

        WindowDim::Fullscreen => {
          builder.fullscreen_desktop();
        }

        WindowDim::FullscreenRestricted(..) => {
          builder.fullscreen();
        }
      }

      builder
    })?;

    let interval = if win_opt.vsync() {
      SwapInterval::VSync
    } else {
      SwapInterval::Immediate
    };

    // not every driver lets the swap interval be changed; keep going with its default
    if let Err(e) = surface.video.gl_set_swap_interval(interval) {
      log::warn!("cannot set swap interval (vsync: {}): {}", win_opt.vsync(), e);
    }

    Ok(surface)
  }

  /// Create a new [`GL33Surface`] from a [`sdl2::video::WindowBuilder`].
  ///
  /// The callback is passed a reference to [`sdl2::VideoSubsystem`].
  /// This is your chance to change GL attributes before creating the window with your preferred
  /// settings.
  ///
  /// ```ignore
  /// use glprimer_sdl2::GL33Surface;
  ///
  /// let surface = GL33Surface::build_with(|video| {
  ///     let gl_attr = video.gl_attr();
  ///     gl_attr.set_multisample_buffers(1);
  ///     gl_attr.set_multisample_samples(4);
  ///
  ///     let mut builder = video.window("My app", 800, 600);
  ///     builder.fullscreen_desktop();
  ///     builder
  /// })?;
  /// ```
  pub fn build_with<WB>(window_builder: WB) -> Result<Self, Sdl2SurfaceError>
  where
    WB: FnOnce(&sdl2::VideoSubsystem) -> sdl2::video::WindowBuilder,
  {
    let sdl = sdl2::init().map_err(Sdl2SurfaceError::InitError)?;

    let video = sdl.video().map_err(Sdl2SurfaceError::VideoInitError)?;

    let gl_attr = video.gl_attr();

    gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
    gl_attr.set_context_flags().forward_compatible().set();
    gl_attr.set_context_major_version(3);
    gl_attr.set_context_minor_version(3);

    let window = window_builder(&video)
      .opengl()
      .build()
      .map_err(Sdl2SurfaceError::WindowCreationFailed)?;

    let _gl_context = window
      .gl_create_context()
      .map_err(Sdl2SurfaceError::GlContextInitFailed)?;

    gl::load_with(|s| video.gl_get_proc_address(s) as *const c_void);

    let gl = GL33::new().map_err(Sdl2SurfaceError::GraphicsStateError)?;

    let (w, h) = window.drawable_size();
    log::debug!("SDL2 surface created with a {}×{} drawable", w, h);

    let surface = GL33Surface {
      gl,
      _gl_context,
      window,
      video,
      sdl,
    };

    Ok(surface)
  }

  /// The entry point to most of the SDL2 API.
  pub fn sdl(&self) -> &sdl2::Sdl {
    &self.sdl
  }

  /// Borrow the underlying SDL2 window of this surface.
  pub fn window(&self) -> &sdl2::video::Window {
    &self.window
  }

  /// Mutably borrow the underlying SDL2 window of this surface.
  pub fn window_mut(&mut self) -> &mut sdl2::video::Window {
    &mut self.window
  }

  /// Get the event pump of the surface.
  ///
  /// SDL2 only allows one event pump alive at a time.
  pub fn event_pump(&self) -> Result<sdl2::EventPump, Sdl2SurfaceError> {
    self.sdl.event_pump().map_err(Sdl2SurfaceError::EventPumpError)
  }

  /// Size of the framebuffer, in pixels.
  ///
  /// It might differ from the window size on high-DPI displays.
  pub fn drawable_size(&self) -> [u32; 2] {
    let (w, h) = self.window.drawable_size();
    [w, h]
  }

  /// Swap the back and front buffers.
  pub fn swap_buffers(&mut self) {
    self.window.gl_swap_window();
  }
}

// SDL2 takes the sample count as an 8-bit attribute.
fn multisample_samples(samples: u32) -> Result<u8, Sdl2SurfaceError> {
  u8::try_from(samples).map_err(|_| Sdl2SurfaceError::UnsupportedSampleCount(samples))
}

unsafe impl GraphicsContext for GL33Surface {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_display() {
    assert_eq!(
      Sdl2SurfaceError::GlContextInitFailed("no GLX".to_owned()).to_string(),
      "failed to create OpenGL context: no GLX"
    );
    assert_eq!(
      Sdl2SurfaceError::GraphicsStateError(StateQueryError::UnavailableGLState).to_string(),
      "failed to get graphics state: unavailable graphics state"
    );
  }

  #[test]
  fn sample_counts() {
    assert_eq!(multisample_samples(4).ok(), Some(4));
    assert_eq!(multisample_samples(255).ok(), Some(255));
    assert!(matches!(
      multisample_samples(256),
      Err(Sdl2SurfaceError::UnsupportedSampleCount(256))
    ));
  }
}
