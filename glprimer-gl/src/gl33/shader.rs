use crate::gl33::state::GLState;
use crate::gl33::GL33;
use gl::types::*;
use glprimer::backend::shader::{Shader, Uniformable};
use glprimer::shader::{
  ProgramError, StageError, StageType, TextureBinding, Uniform, UniformType, UniformWarning,
};
use std::cell::RefCell;
use std::ffi::CString;
use std::ptr::{null, null_mut};
use std::rc::Rc;

/// Maximum number of bytes read from a compilation or link log.
pub const MAX_INFO_LOG_LEN: usize = 512;

#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Stage {
  /// Type of the stage.
  pub fn stage_type(&self) -> StageType {
    self.ty
  }
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    self.state.borrow_mut().forget_program(self.handle);

    unsafe {
      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log = vec![0u8; bounded_log_len(log_len)];
        let mut written: GLsizei = 0;
        gl::GetProgramInfoLog(
          handle,
          log.len() as GLsizei,
          &mut written,
          log.as_mut_ptr() as *mut GLchar,
        );

        Err(ProgramError::link_failed(log_to_string(log, written)))
      }
    }
  }
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let c_src = CString::new(src.as_bytes()).map_err(|_| StageError::InvalidSource(ty))?;
    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::compilation_failed(
        ty,
        "unable to create shader stage",
      ));
    }

    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(Stage { handle, ty })
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log = vec![0u8; bounded_log_len(log_len)];
      let mut written: GLsizei = 0;
      gl::GetShaderInfoLog(
        handle,
        log.len() as GLsizei,
        &mut written,
        log.as_mut_ptr() as *mut GLchar,
      );

      gl::DeleteShader(handle);

      Err(StageError::compilation_failed(
        ty,
        log_to_string(log, written),
      ))
    }
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    if handle == 0 {
      return Err(ProgramError::link_failed("unable to create shader program"));
    }

    gl::AttachShader(handle, vertex.handle);
    gl::AttachShader(handle, fragment.handle);

    // the program is released on drop if linking fails
    let program = Program {
      handle,
      state: self.state.clone(),
    };
    let linked = program.link();

    gl::DetachShader(handle, vertex.handle);
    gl::DetachShader(handle, fragment.handle);

    linked.map(move |_| program)
  }

  unsafe fn ask_uniform<T>(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform<T>, UniformWarning>
  where
    Self: Uniformable<T>,
  {
    let c_name = CString::new(name.as_bytes()).map_err(|_| UniformWarning::inactive(name))?;
    let location = gl::GetUniformLocation(program.handle, c_name.as_ptr() as *const GLchar);

    // ensure the location smells good
    if location < 0 {
      return Err(UniformWarning::inactive(name));
    }

    // ensure the type is correct regarding what we have in the type-system
    uniform_type_match(program.handle, &c_name, name, <Self as Uniformable<T>>::TY)?;

    Ok(Uniform::new(location))
  }
}

unsafe impl Uniformable<f32> for GL33 {
  const TY: UniformType = UniformType::Float;

  unsafe fn update(_: &mut Self::ProgramRepr, uniform: &Uniform<f32>, value: f32) {
    if !uniform.is_unbound() {
      gl::Uniform1f(uniform.index(), value);
    }
  }
}

unsafe impl Uniformable<[f32; 4]> for GL33 {
  const TY: UniformType = UniformType::Vec4;

  unsafe fn update(_: &mut Self::ProgramRepr, uniform: &Uniform<[f32; 4]>, value: [f32; 4]) {
    if !uniform.is_unbound() {
      gl::Uniform4fv(uniform.index(), 1, value.as_ptr());
    }
  }
}

unsafe impl Uniformable<TextureBinding> for GL33 {
  const TY: UniformType = UniformType::Sampler2D;

  unsafe fn update(
    _: &mut Self::ProgramRepr,
    uniform: &Uniform<TextureBinding>,
    value: TextureBinding,
  ) {
    if !uniform.is_unbound() {
      gl::Uniform1i(uniform.index(), value.unit() as GLint);
    }
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

/// Number of bytes to allocate for a log the driver reports as `reported` bytes long.
fn bounded_log_len(reported: GLint) -> usize {
  (reported.max(1) as usize).min(MAX_INFO_LOG_LEN)
}

/// Turn the bytes written by the driver into a log, dropping the trailing NUL.
fn log_to_string(mut log: Vec<u8>, written: GLsizei) -> String {
  let written = (written.max(0) as usize).min(log.len());
  log.truncate(written);

  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).into_owned()
}

unsafe fn uniform_type_match(
  program: GLuint,
  c_name: &CString,
  name: &str,
  ty: UniformType,
) -> Result<(), UniformWarning> {
  let mut glty: GLenum = 0;
  let mut found_size: GLint = 0;

  // get the max length of the returned names
  let mut max_len = 0;
  gl::GetProgramiv(program, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_len);

  // get the index of the uniform
  let mut index = 0;
  gl::GetUniformIndices(
    program,
    1,
    [c_name.as_ptr() as *const GLchar].as_ptr(),
    &mut index,
  );

  if index == gl::INVALID_INDEX {
    return Err(UniformWarning::inactive(name));
  }

  // get its size and type
  let mut name_ = vec![0 as GLchar; max_len.max(1) as usize];
  gl::GetActiveUniform(
    program,
    index,
    name_.len() as GLsizei,
    null_mut(),
    &mut found_size,
    &mut glty,
    name_.as_mut_ptr(),
  );

  if glsl_type_matches(ty, glty) {
    Ok(())
  } else {
    Err(UniformWarning::type_mismatch(name, ty))
  }
}

fn glsl_type_matches(ty: UniformType, glty: GLenum) -> bool {
  match ty {
    UniformType::Int => glty == gl::INT,
    UniformType::Float => glty == gl::FLOAT,
    UniformType::Vec4 => glty == gl::FLOAT_VEC4,
    UniformType::Sampler2D => glty == gl::SAMPLER_2D,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn log_length_is_bounded() {
    assert_eq!(bounded_log_len(0), 1);
    assert_eq!(bounded_log_len(-3), 1);
    assert_eq!(bounded_log_len(64), 64);
    assert_eq!(bounded_log_len(4096), MAX_INFO_LOG_LEN);
  }

  #[test]
  fn log_conversion() {
    let mut raw = b"0:1(1): error: syntax error".to_vec();
    let len = raw.len() as GLsizei;
    raw.extend_from_slice(&[0, 0, 0]);

    assert_eq!(log_to_string(raw.clone(), len), "0:1(1): error: syntax error");
    assert_eq!(log_to_string(raw, len + 3), "0:1(1): error: syntax error");
    assert_eq!(log_to_string(vec![0; 8], 0), "");
    assert_eq!(log_to_string(b"abc".to_vec(), 42), "abc");
  }

  #[test]
  fn uniform_types() {
    assert!(glsl_type_matches(UniformType::Float, gl::FLOAT));
    assert!(glsl_type_matches(UniformType::Vec4, gl::FLOAT_VEC4));
    assert!(glsl_type_matches(UniformType::Sampler2D, gl::SAMPLER_2D));
    assert!(glsl_type_matches(UniformType::Int, gl::INT));

    assert!(!glsl_type_matches(UniformType::Float, gl::FLOAT_VEC4));
    assert!(!glsl_type_matches(UniformType::Int, gl::SAMPLER_2D));
  }

  #[test]
  fn shader_types() {
    assert_eq!(opengl_shader_type(StageType::VertexShader), gl::VERTEX_SHADER);
    assert_eq!(
      opengl_shader_type(StageType::FragmentShader),
      gl::FRAGMENT_SHADER
    );
  }
}
