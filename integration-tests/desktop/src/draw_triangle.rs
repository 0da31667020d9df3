use crate::common::{assert_no_gl_error, run_frames, surface};
use glprimer::context::GraphicsContext as _;
use glprimer_examples::hello_triangle::{LocalExample, FS, VS};
use glprimer_gl::GL33;

pub fn fixture() {
  let mut surface = surface("Draw triangle");

  // the example only draws when its program builds
  surface
    .new_shader_program()
    .from_strings(VS, FS)
    .unwrap();
  assert_no_gl_error(&mut surface);

  run_frames::<LocalExample<GL33>>(&mut surface);
}
