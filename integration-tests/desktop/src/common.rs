//! Pieces shared by the fixtures.

use glprimer_examples::{Example, InputAction, LoopFeedback, PlatformServices};
use glprimer_gl::GL33;
use glprimer_sdl2::GL33Surface;
use glprimer_windowing::WindowOpt;
use std::error;
use std::fmt;
use std::iter;

pub const VS: &str = "#version 330 core

layout (location = 0) in vec3 pos;

void main() {
  gl_Position = vec4(pos, 1.0);
}
";

pub fn surface(title: &str) -> GL33Surface {
  GL33Surface::new(title, WindowOpt::default().set_vsync(false)).unwrap()
}

/// Panic if the driver raised an error flag.
pub fn assert_no_gl_error(surface: &mut GL33Surface) {
  use glprimer::context::GraphicsContext as _;

  if let Some(error) = surface.backend().pop_error() {
    panic!("OpenGL error: 0x{:x}", error);
  }
}

/// Platform without any asset.
pub struct NoAssets;

#[derive(Debug)]
pub struct MissingAsset(String);

impl fmt::Display for MissingAsset {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "no asset named {}", self.0)
  }
}

impl error::Error for MissingAsset {}

impl PlatformServices for NoAssets {
  type FetchError = MissingAsset;

  fn fetch_texture(&mut self, name: impl AsRef<str>) -> Result<&image::RgbImage, Self::FetchError> {
    Err(MissingAsset(name.as_ref().to_owned()))
  }
}

/// Bootstrap an example and render a few frames, checking the error flag after each of them.
pub fn run_frames<E>(surface: &mut GL33Surface)
where
  E: Example<GL33>,
{
  let mut example = E::bootstrap(&mut NoAssets, surface).unwrap();
  assert_no_gl_error(surface);

  for &t in &[0., 0.5, 1., 1.5] {
    let size = surface.drawable_size();

    example = match example.render_frame(t, size, iter::empty::<InputAction>(), surface) {
      LoopFeedback::Continue(example) => example,
      LoopFeedback::Exit => panic!("{} exited without being asked to", E::TITLE),
    };

    assert_no_gl_error(surface);
    surface.swap_buffers();
  }
}
