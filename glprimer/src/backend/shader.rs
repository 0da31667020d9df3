//! Shader backend.

use crate::shader::{ProgramError, StageError, StageType, Uniform, UniformType, UniformWarning};

/// Shader stages and programs.
pub unsafe trait Shader {
  /// Backend representation of a compiled shader stage.
  ///
  /// Dropping it must release the stage on the GPU.
  type StageRepr;

  /// Backend representation of a linked shader program.
  ///
  /// Dropping it must release the program on the GPU.
  type ProgramRepr;

  /// Compile a new shader stage of the given type.
  ///
  /// On failure, the diagnostic log must be read from the object that failed to compile before it
  /// is released.
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Create a program, attach both stages and link it.
  ///
  /// On failure, the diagnostic log must be read from the program that failed to link before it is
  /// released.
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Look up a uniform by name.
  unsafe fn ask_uniform<T>(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform<T>, UniformWarning>
  where
    Self: Uniformable<T>;
}

/// Types that can be sent to a shader program as uniform values.
pub unsafe trait Uniformable<T>: Shader {
  /// Type of the uniform on the GLSL side.
  const TY: UniformType;

  /// Update the uniform with a new value.
  ///
  /// The program must be in use. Unbound uniforms must be ignored.
  unsafe fn update(program: &mut Self::ProgramRepr, uniform: &Uniform<T>, value: T);
}
