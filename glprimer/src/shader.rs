//! Shader stages, programs and uniforms.
//!
//! A shader [`Program`] is built from two shader [`Stage`]s: a vertex stage and a fragment stage.
//! The usual way to get one is to go through a [`ProgramBuilder`], obtained with
//! [`GraphicsContext::new_shader_program`]:
//!
//! ```ignore
//! let program = context
//!   .new_shader_program()
//!   .from_strings(VS, FS)?;
//! ```
//!
//! Building is fail-fast: if the vertex stage does not compile, the fragment stage is never
//! compiled, and if either stage fails, linking is never attempted. Stages are released as soon as
//! the program is linked (or failed to link); only the program stays alive.

use crate::backend::shader::{Shader, Uniformable};
use crate::context::GraphicsContext;
use std::error;
use std::fmt;
use std::marker::PhantomData;

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile. Carries the compilation log.
  CompilationFailed(StageType, String),
  /// The source code cannot be handed to the driver (it contains a NUL byte).
  InvalidSource(StageType),
}

impl StageError {
  /// Occurs when a shader fails to compile.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }

  /// Type of the stage that caused the error.
  pub fn stage_type(&self) -> StageType {
    match *self {
      StageError::CompilationFailed(ty, _) | StageError::InvalidSource(ty) => ty,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
      StageError::InvalidSource(ref ty) => write!(f, "{} source contains a NUL byte", ty),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a program can emit while being built.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// Program link failed. Carries the link log.
  LinkFailed(String),
}

impl ProgramError {
  /// Program link failed.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// GLSL-side type of a uniform.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UniformType {
  /// 32-bit signed integer.
  Int,
  /// 32-bit floating-point number.
  Float,
  /// 4D floating-point vector.
  Vec4,
  /// 2D texture sampler.
  Sampler2D,
}

impl fmt::Display for UniformType {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      UniformType::Int => f.write_str("int"),
      UniformType::Float => f.write_str("float"),
      UniformType::Vec4 => f.write_str("vec4"),
      UniformType::Sampler2D => f.write_str("sampler2D"),
    }
  }
}

/// Warnings emitted when looking up uniforms.
///
/// They are warnings and not errors: a program missing a uniform can still be used to render.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UniformWarning {
  /// The uniform does not exist or was optimized away by the driver.
  Inactive(String),
  /// The uniform exists but its GLSL type does not match the Rust one.
  TypeMismatch(String, UniformType),
}

impl UniformWarning {
  /// Create an inactive uniform warning.
  pub fn inactive(name: impl Into<String>) -> Self {
    UniformWarning::Inactive(name.into())
  }

  /// Create a type mismatch warning.
  pub fn type_mismatch(name: impl Into<String>, ty: UniformType) -> Self {
    UniformWarning::TypeMismatch(name.into(), ty)
  }
}

impl fmt::Display for UniformWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      UniformWarning::Inactive(ref s) => write!(f, "inactive {} uniform", s),
      UniformWarning::TypeMismatch(ref n, ref t) => {
        write!(f, "type mismatch for uniform {}: expected {}", n, t)
      }
    }
  }
}

impl error::Error for UniformWarning {}

/// A typed uniform location.
///
/// An *unbound* uniform has no location: updating it is a no-op. Use it as a fallback when a
/// lookup returned a [`UniformWarning`].
#[derive(Debug)]
pub struct Uniform<T> {
  index: i32,
  _t: PhantomData<*const T>,
}

impl<T> Uniform<T> {
  /// Create a new uniform from its location.
  ///
  /// # Safety
  ///
  /// The location must come from the backend the uniform is used with.
  pub unsafe fn new(index: i32) -> Self {
    Uniform {
      index,
      _t: PhantomData,
    }
  }

  /// A uniform that is never sent anywhere.
  pub fn unbound() -> Self {
    Uniform {
      index: -1,
      _t: PhantomData,
    }
  }

  /// Location of the uniform.
  pub fn index(&self) -> i32 {
    self.index
  }

  /// Whether this uniform has no location.
  pub fn is_unbound(&self) -> bool {
    self.index < 0
  }
}

/// Texture unit a texture has been bound to, usable as a `sampler2D` uniform value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TextureBinding {
  unit: u32,
}

impl TextureBinding {
  /// Binding for a given texture unit.
  pub fn new(unit: u32) -> Self {
    TextureBinding { unit }
  }

  /// The texture unit.
  pub fn unit(&self) -> u32 {
    self.unit
  }
}

/// A compiled shader stage.
pub struct Stage<B>
where
  B: Shader,
{
  repr: B::StageRepr,
  ty: StageType,
}

impl<B> Stage<B>
where
  B: Shader,
{
  /// Compile a new shader stage.
  pub fn new<C>(ctx: &mut C, ty: StageType, src: &str) -> Result<Self, StageError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let repr = unsafe { ctx.backend().new_stage(ty, src)? };
    log::debug!("{} compiled", ty);

    Ok(Stage { repr, ty })
  }

  /// Type of this stage.
  pub fn stage_type(&self) -> StageType {
    self.ty
  }
}

/// A linked shader program.
pub struct Program<B>
where
  B: Shader,
{
  pub(crate) repr: B::ProgramRepr,
}

impl<B> Program<B>
where
  B: Shader,
{
  /// Look up a uniform by name.
  pub fn uniform<T>(&self, name: &str) -> Result<Uniform<T>, UniformWarning>
  where
    B: Uniformable<T>,
  {
    unsafe { B::ask_uniform(&self.repr, name) }
  }

  /// Look up a uniform by name, falling back to an unbound uniform and logging a warning if it
  /// cannot be found.
  pub fn uniform_or_unbound<T>(&self, name: &str) -> Uniform<T>
  where
    B: Uniformable<T>,
  {
    self.uniform(name).unwrap_or_else(|warning| {
      log::warn!("{}", warning);
      Uniform::unbound()
    })
  }
}

/// Program builder.
///
/// Obtained with [`GraphicsContext::new_shader_program`].
pub struct ProgramBuilder<'a, C> {
  ctx: &'a mut C,
}

impl<'a, C> ProgramBuilder<'a, C>
where
  C: GraphicsContext,
  C::Backend: Shader,
{
  /// Create a new program builder.
  pub fn new(ctx: &'a mut C) -> Self {
    ProgramBuilder { ctx }
  }

  /// Link already compiled stages into a program.
  pub fn from_stages(
    &mut self,
    vertex: &Stage<C::Backend>,
    fragment: &Stage<C::Backend>,
  ) -> Result<Program<C::Backend>, ProgramError> {
    let repr = unsafe {
      self
        .ctx
        .backend()
        .new_program(&vertex.repr, &fragment.repr)?
    };
    log::debug!("shader program linked");

    Ok(Program { repr })
  }

  /// Compile both stages from their source code and link them into a program.
  ///
  /// The fragment stage is only compiled if the vertex stage compiled, and linking only happens if
  /// both stages compiled. The stages are released before returning, whatever the outcome.
  pub fn from_strings(
    &mut self,
    vertex: &str,
    fragment: &str,
  ) -> Result<Program<C::Backend>, ProgramError> {
    let vs = Stage::new(self.ctx, StageType::VertexShader, vertex)?;
    let fs = Stage::new(self.ctx, StageType::FragmentShader, fragment)?;

    self.from_stages(&vs, &fs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::backend::headless::{Call, HeadlessContext};

  const VS: &str = "#version 330 core\nlayout (location = 0) in vec3 pos;\nvoid main() {\n  gl_Position = vec4(pos, 1.0);\n}\n";
  const FS: &str = "#version 330 core\nuniform vec4 color;\nout vec4 frag;\nvoid main() {\n  frag = color;\n}\n";
  const BROKEN: &str = "#version 330 core\nvoid main( {\n";

  #[test]
  fn valid_stages_compile() {
    let mut ctx = HeadlessContext::new();

    let vs = Stage::new(&mut ctx, StageType::VertexShader, VS).unwrap();
    let fs = Stage::new(&mut ctx, StageType::FragmentShader, FS).unwrap();

    assert_eq!(vs.stage_type(), StageType::VertexShader);
    assert_eq!(fs.stage_type(), StageType::FragmentShader);
  }

  #[test]
  fn broken_stage_reports_its_own_log() {
    let mut ctx = HeadlessContext::new();

    let err = Stage::new(&mut ctx, StageType::FragmentShader, BROKEN)
      .err()
      .unwrap();

    match err {
      StageError::CompilationFailed(StageType::FragmentShader, log) => {
        // the failed object is the first one created by this context
        assert!(log.starts_with("shader 1:"), "unexpected log: {}", log);
      }
      e => panic!("unexpected error: {:?}", e),
    }

    // the failed stage is released right away
    assert_eq!(
      ctx.journal(),
      vec![
        Call::NewStage(1, StageType::FragmentShader),
        Call::DeleteStage(1)
      ]
    );
  }

  #[test]
  fn nul_byte_is_rejected() {
    let mut ctx = HeadlessContext::new();
    let err = Stage::new(&mut ctx, StageType::VertexShader, "void main() {}\0")
      .err()
      .unwrap();

    assert_eq!(err, StageError::InvalidSource(StageType::VertexShader));
  }

  #[test]
  fn program_links_and_releases_stages() {
    let mut ctx = HeadlessContext::new();
    let program = ctx.new_shader_program().from_strings(VS, FS);

    assert!(program.is_ok());
    assert_eq!(
      ctx.journal(),
      vec![
        Call::NewStage(1, StageType::VertexShader),
        Call::NewStage(2, StageType::FragmentShader),
        Call::LinkProgram(3),
        Call::DeleteStage(2),
        Call::DeleteStage(1),
      ]
    );
  }

  #[test]
  fn broken_vertex_stage_skips_everything_else() {
    let mut ctx = HeadlessContext::new();
    let err = ctx
      .new_shader_program()
      .from_strings(BROKEN, FS)
      .err()
      .unwrap();

    assert!(matches!(
      err,
      ProgramError::StageError(StageError::CompilationFailed(StageType::VertexShader, _))
    ));
    assert_eq!(
      ctx.journal(),
      vec![Call::NewStage(1, StageType::VertexShader), Call::DeleteStage(1)]
    );
  }

  #[test]
  fn broken_fragment_stage_skips_link() {
    let mut ctx = HeadlessContext::new();
    let err = ctx
      .new_shader_program()
      .from_strings(VS, BROKEN)
      .err()
      .unwrap();

    assert!(matches!(
      err,
      ProgramError::StageError(StageError::CompilationFailed(StageType::FragmentShader, _))
    ));

    let journal = ctx.journal();
    assert!(!journal.iter().any(|c| matches!(c, Call::LinkProgram(_))));
    assert_eq!(journal.last(), Some(&Call::DeleteStage(1)));
  }

  #[test]
  fn link_failure_reports_program_log() {
    let mut ctx = HeadlessContext::new();
    ctx.backend().fail_links(true);

    let err = ctx
      .new_shader_program()
      .from_strings(VS, FS)
      .err()
      .unwrap();

    assert_eq!(
      err,
      ProgramError::LinkFailed("program 3: link error".to_owned())
    );
    assert_eq!(
      ctx.journal(),
      vec![
        Call::NewStage(1, StageType::VertexShader),
        Call::NewStage(2, StageType::FragmentShader),
        Call::LinkProgram(3),
        Call::DeleteProgram(3),
        Call::DeleteStage(2),
        Call::DeleteStage(1),
      ]
    );
  }

  #[test]
  fn uniform_lookup() {
    let mut ctx = HeadlessContext::new();
    let program = ctx.new_shader_program().from_strings(VS, FS).unwrap();

    let color = program.uniform::<[f32; 4]>("color").unwrap();
    assert!(!color.is_unbound());

    assert_eq!(
      program.uniform::<f32>("color").err(),
      Some(UniformWarning::type_mismatch("color", UniformType::Float))
    );
    assert_eq!(
      program.uniform::<f32>("nope").err(),
      Some(UniformWarning::inactive("nope"))
    );
    assert!(program.uniform_or_unbound::<f32>("nope").is_unbound());
  }

  #[test]
  fn error_display() {
    let e = ProgramError::from(StageError::compilation_failed(
      StageType::VertexShader,
      "0:1: syntax error",
    ));

    assert_eq!(
      e.to_string(),
      "shader program has stage error: vertex shader compilation error: 0:1: syntax error"
    );
  }
}
