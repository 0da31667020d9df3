use crate::common::{surface, VS};
use glprimer::context::GraphicsContext as _;
use glprimer::shader::StageType;

const FS: &str = "#version 330 core

out vec4 frag;

void main() {
  frag = vec4(1.0, 0.5, 0.2, 1.0);
}
";

pub fn fixture() {
  let mut surface = surface("Compile valid");

  let vs = surface
    .new_shader_stage(StageType::VertexShader, VS)
    .unwrap();
  let fs = surface
    .new_shader_stage(StageType::FragmentShader, FS)
    .unwrap();

  assert_eq!(vs.stage_type(), StageType::VertexShader);
  assert_eq!(fs.stage_type(), StageType::FragmentShader);

  surface
    .new_shader_program()
    .from_stages(&vs, &fs)
    .unwrap();
}
