use crate::common::{surface, VS};
use glprimer::context::GraphicsContext as _;
use glprimer::shader::{ProgramError, StageError, StageType};

const FS: &str = "#version 330 core

out vec4 frag;

void main() {
  frag = vec4(1.0, 0.5, 0.2 1.0);
}
";

pub fn fixture() {
  let mut surface = surface("Compile invalid");
  let program = surface.new_shader_program().from_strings(VS, FS);

  match program {
    Err(ProgramError::StageError(StageError::CompilationFailed(ty, ref log))) => {
      assert_eq!(ty, StageType::FragmentShader);
      assert!(!log.is_empty());
      println!("driver log:\n{}", log);
    }

    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("a broken fragment shader was accepted"),
  }
}
