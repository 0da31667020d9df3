//! # glprimer windowing
//!
//! This is the base, abstract crate for windowing common types in glprimer. The `glprimer` crate
//! abstracts over OpenGL, but it doesn’t give you a way to create an OpenGL context: that is
//! tightly related to the windowing library in use. Crates such as `glprimer-sdl2` open a window
//! and a context, and they all read their settings from the types of this crate.
//!
//! # What’s included
//!
//! - `WindowDim`: abstraction over the dimension of a window and its mode (windowed, fullscreen,
//!   fullscreen restricted).
//! - `WindowOpt`: hints to customize the window integration, such as its dimension or whether
//!   buffer swaps are synchronized with the display.

#![deny(missing_docs)]

/// Default width of a window, in pixels.
pub const DEFAULT_WIDTH: u32 = 960;

/// Default height of a window, in pixels.
pub const DEFAULT_HEIGHT: u32 = 540;

/// Dimension metrics.
///
///   - `Windowed(width, height)` opens in windowed mode with the wished resolution.
///   - `Fullscreen` opens in fullscreen mode by using the primary monitor resolution.
///   - `FullscreenRestricted(width, height)` is a mix between `Windowed(width, height)` and
///     `Fullscreen`. It opens in fullscreen mode by using the wished resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode.
  Windowed(u32, u32),
  /// Fullscreen mode (adapt to your screen).
  Fullscreen,
  /// Fullscreen mode with restricted viewport dimension.
  FullscreenRestricted(u32, u32),
}

impl WindowDim {
  /// Size requested for the window.
  ///
  /// `Fullscreen` has no size of its own; the default size is used to create the window before
  /// it is switched to the monitor resolution.
  pub fn size(&self) -> [u32; 2] {
    match *self {
      WindowDim::Windowed(w, h) | WindowDim::FullscreenRestricted(w, h) => [w, h],
      WindowDim::Fullscreen => [DEFAULT_WIDTH, DEFAULT_HEIGHT],
    }
  }
}

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to
/// start with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  num_samples: Option<u32>,
  vsync: bool,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to `WindowDim::Windowed(960, 540)`.
  /// - `num_samples` set to `None`.
  /// - `vsync` set to `true`.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed(DEFAULT_WIDTH, DEFAULT_HEIGHT),
      num_samples: None,
      vsync: true,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> WindowDim {
    self.dim
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }

  /// Synchronize buffer swaps with the display refresh rate.
  #[inline]
  pub fn set_vsync(self, vsync: bool) -> Self {
    WindowOpt { vsync, ..self }
  }

  /// Whether buffer swaps are synchronized with the display.
  #[inline]
  pub fn vsync(&self) -> bool {
    self.vsync
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let opt = WindowOpt::default();

    assert_eq!(opt.dim(), WindowDim::Windowed(960, 540));
    assert_eq!(opt.num_samples(), None);
    assert!(opt.vsync());
  }

  #[test]
  fn builders() {
    let opt = WindowOpt::default()
      .set_dim(WindowDim::FullscreenRestricted(800, 600))
      .set_num_samples(4)
      .set_vsync(false);

    assert_eq!(opt.dim().size(), [800, 600]);
    assert_eq!(opt.num_samples(), Some(4));
    assert!(!opt.vsync());
    assert_eq!(opt.set_num_samples(None).num_samples(), None);
  }

  #[test]
  fn fullscreen_size() {
    assert_eq!(
      WindowDim::Fullscreen.size(),
      [DEFAULT_WIDTH, DEFAULT_HEIGHT]
    );
  }
}
