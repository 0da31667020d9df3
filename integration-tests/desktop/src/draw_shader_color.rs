use crate::common::{assert_no_gl_error, run_frames, surface};
use glprimer::context::GraphicsContext as _;
use glprimer_examples::shaders::{LocalExample, FS, VS};
use glprimer_gl::GL33;

pub fn fixture() {
  let mut surface = surface("Draw shader color");

  // the example only draws when its program builds
  let program = surface
    .new_shader_program()
    .from_strings(VS, FS)
    .unwrap();

  program.uniform::<[f32; 4]>("color").unwrap();

  // a uniform of the wrong type is reported and not bound
  assert!(program.uniform::<f32>("color").is_err());
  assert_no_gl_error(&mut surface);

  run_frames::<LocalExample<GL33>>(&mut surface);
}
