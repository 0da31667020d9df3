//! A backend that renders nothing and records every call it receives.
//!
//! It is used to exercise programs written against this crate without a GPU. Its shader
//! “compiler” is deliberately simple:
//!
//! - A stage compiles if its source contains a `void main()` function, and fails otherwise with a
//!   log naming the failed shader object.
//! - Uniforms are found by scanning `uniform <type> <name>;` declarations.
//! - Links always succeed, unless [`Headless::fail_links`] is set.
//!
//! Every object gets a handle from a single counter starting at `1`, in creation order.

use crate::backend::pipeline::Pipeline;
use crate::backend::query::{Query, QueryError};
use crate::backend::shader::{Shader, Uniformable};
use crate::backend::tess::Tess;
use crate::backend::texture::Texture;
use crate::context::GraphicsContext;
use crate::pipeline::PipelineState;
use crate::shader::{
  ProgramError, StageError, StageType, TextureBinding, Uniform, UniformType, UniformWarning,
};
use crate::tess::{Mode, TessError};
use crate::texture::{GenMipmaps, Sampler, TextureError};
use crate::vertex::VertexDesc;
use std::cell::RefCell;
use std::rc::Rc;

/// A recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
  /// A stage object was created (and compilation attempted).
  NewStage(u32, StageType),
  /// A stage object was released.
  DeleteStage(u32),
  /// A program object was created, got both stages attached and was linked.
  LinkProgram(u32),
  /// A program object was released.
  DeleteProgram(u32),
  /// Buffers were uploaded.
  BuildTess {
    /// Handle of the tessellation.
    handle: u32,
    /// Number of vertex bytes uploaded.
    bytes: usize,
    /// Number of vertices.
    vert_nb: usize,
    /// Number of indices, if any.
    idx_nb: Option<usize>,
    /// Primitive mode.
    mode: Mode,
  },
  /// Buffers were released.
  DeleteTess(u32),
  /// A texture was created.
  NewTexture {
    /// Handle of the texture.
    handle: u32,
    /// Size of the texture.
    size: [u32; 2],
    /// Mipmap generation.
    mipmaps: GenMipmaps,
  },
  /// A texture was released.
  DeleteTexture(u32),
  /// A pipeline was entered.
  StartPipeline(PipelineState),
  /// A program was made current.
  UseProgram(u32),
  /// A texture was bound to a texture unit.
  BindTexture {
    /// Texture unit.
    unit: u32,
    /// Handle of the texture.
    handle: u32,
  },
  /// A uniform was updated.
  SetUniform {
    /// Location of the uniform.
    location: i32,
    /// Value sent.
    value: UniformValue,
  },
  /// A tessellation was drawn.
  Render {
    /// Handle of the tessellation.
    handle: u32,
    /// Primitive mode.
    mode: Mode,
    /// Number of vertices or indices drawn.
    count: usize,
    /// Whether indices were used.
    indexed: bool,
  },
}

/// A uniform value sent to the headless backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
  /// `float` value.
  Float(f32),
  /// `vec4` value.
  Vec4([f32; 4]),
  /// `sampler2D` value (texture unit).
  Sampler(u32),
}

type Journal = Rc<RefCell<Vec<Call>>>;

/// The recording backend.
#[derive(Debug, Default)]
pub struct Headless {
  journal: Journal,
  next_handle: u32,
  fail_compilations: bool,
  fail_links: bool,
}

impl Headless {
  /// Create a new headless backend with an empty journal.
  pub fn new() -> Self {
    Self::default()
  }

  /// Make every subsequent stage compilation fail.
  pub fn fail_compilations(&mut self, fail: bool) {
    self.fail_compilations = fail;
  }

  /// Make every subsequent program link fail.
  pub fn fail_links(&mut self, fail: bool) {
    self.fail_links = fail;
  }

  /// Calls recorded so far.
  pub fn journal(&self) -> Vec<Call> {
    self.journal.borrow().clone()
  }

  /// Forget the calls recorded so far.
  pub fn clear_journal(&mut self) {
    self.journal.borrow_mut().clear();
  }

  fn record(&self, call: Call) {
    self.journal.borrow_mut().push(call);
  }

  fn new_handle(&mut self) -> u32 {
    self.next_handle += 1;
    self.next_handle
  }
}

/// Compiled headless stage.
#[derive(Debug)]
pub struct HeadlessStage {
  handle: u32,
  uniforms: Vec<(String, String)>,
  journal: Journal,
}

impl Drop for HeadlessStage {
  fn drop(&mut self) {
    self.journal.borrow_mut().push(Call::DeleteStage(self.handle));
  }
}

/// Linked headless program.
#[derive(Debug)]
pub struct HeadlessProgram {
  handle: u32,
  uniforms: Vec<(String, String)>,
  journal: Journal,
}

impl Drop for HeadlessProgram {
  fn drop(&mut self) {
    self
      .journal
      .borrow_mut()
      .push(Call::DeleteProgram(self.handle));
  }
}

/// Headless tessellation.
#[derive(Debug)]
pub struct HeadlessTess {
  handle: u32,
  mode: Mode,
  count: usize,
  indexed: bool,
  journal: Journal,
}

impl Drop for HeadlessTess {
  fn drop(&mut self) {
    self.journal.borrow_mut().push(Call::DeleteTess(self.handle));
  }
}

/// Headless texture.
#[derive(Debug)]
pub struct HeadlessTexture {
  handle: u32,
  journal: Journal,
}

impl Drop for HeadlessTexture {
  fn drop(&mut self) {
    self
      .journal
      .borrow_mut()
      .push(Call::DeleteTexture(self.handle));
  }
}

// (name, GLSL type) of every `uniform <type> <name>;` declaration
fn scan_uniforms(src: &str) -> Vec<(String, String)> {
  src
    .lines()
    .filter_map(|line| {
      let mut words = line.split_whitespace();

      if words.next() != Some("uniform") {
        return None;
      }

      let ty = words.next()?;
      let name = words.next()?.trim_end_matches(';');
      Some((name.to_owned(), ty.to_owned()))
    })
    .collect()
}

unsafe impl Shader for Headless {
  type StageRepr = HeadlessStage;

  type ProgramRepr = HeadlessProgram;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    if src.contains('\0') {
      return Err(StageError::InvalidSource(ty));
    }

    let handle = self.new_handle();
    self.record(Call::NewStage(handle, ty));

    if self.fail_compilations || !src.contains("void main()") {
      let log = format!("shader {}: syntax error: no main function", handle);
      self.record(Call::DeleteStage(handle));
      return Err(StageError::compilation_failed(ty, log));
    }

    Ok(HeadlessStage {
      handle,
      uniforms: scan_uniforms(src),
      journal: self.journal.clone(),
    })
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = self.new_handle();
    self.record(Call::LinkProgram(handle));

    let mut uniforms = vertex.uniforms.clone();
    for uniform in &fragment.uniforms {
      if !uniforms.contains(uniform) {
        uniforms.push(uniform.clone());
      }
    }

    let program = HeadlessProgram {
      handle,
      uniforms,
      journal: self.journal.clone(),
    };

    if self.fail_links {
      // dropping the program releases it
      return Err(ProgramError::link_failed(format!(
        "program {}: link error",
        program.handle
      )));
    }

    Ok(program)
  }

  unsafe fn ask_uniform<T>(
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform<T>, UniformWarning>
  where
    Self: Uniformable<T>,
  {
    let location = program
      .uniforms
      .iter()
      .position(|(n, _)| n == name)
      .ok_or_else(|| UniformWarning::inactive(name))?;

    let expected = <Self as Uniformable<T>>::TY;
    if program.uniforms[location].1 != expected.to_string() {
      return Err(UniformWarning::type_mismatch(name, expected));
    }

    Ok(Uniform::new(location as i32))
  }
}

fn record_uniform<T>(program: &HeadlessProgram, uniform: &Uniform<T>, value: UniformValue) {
  if !uniform.is_unbound() {
    program.journal.borrow_mut().push(Call::SetUniform {
      location: uniform.index(),
      value,
    });
  }
}

unsafe impl Uniformable<f32> for Headless {
  const TY: UniformType = UniformType::Float;

  unsafe fn update(program: &mut Self::ProgramRepr, uniform: &Uniform<f32>, value: f32) {
    record_uniform(program, uniform, UniformValue::Float(value));
  }
}

unsafe impl Uniformable<[f32; 4]> for Headless {
  const TY: UniformType = UniformType::Vec4;

  unsafe fn update(program: &mut Self::ProgramRepr, uniform: &Uniform<[f32; 4]>, value: [f32; 4]) {
    record_uniform(program, uniform, UniformValue::Vec4(value));
  }
}

unsafe impl Uniformable<TextureBinding> for Headless {
  const TY: UniformType = UniformType::Sampler2D;

  unsafe fn update(
    program: &mut Self::ProgramRepr,
    uniform: &Uniform<TextureBinding>,
    value: TextureBinding,
  ) {
    record_uniform(program, uniform, UniformValue::Sampler(value.unit()));
  }
}

unsafe impl Tess for Headless {
  type TessRepr = HeadlessTess;

  unsafe fn build(
    &mut self,
    _: &VertexDesc,
    vertices: &[u8],
    vert_nb: usize,
    indices: Option<&[u32]>,
    mode: Mode,
  ) -> Result<Self::TessRepr, TessError> {
    let handle = self.new_handle();
    let idx_nb = indices.map(<[u32]>::len);

    self.record(Call::BuildTess {
      handle,
      bytes: vertices.len(),
      vert_nb,
      idx_nb,
      mode,
    });

    Ok(HeadlessTess {
      handle,
      mode,
      count: idx_nb.unwrap_or(vert_nb),
      indexed: idx_nb.is_some(),
      journal: self.journal.clone(),
    })
  }

  unsafe fn render(&mut self, tess: &Self::TessRepr) {
    self.record(Call::Render {
      handle: tess.handle,
      mode: tess.mode,
      count: tess.count,
      indexed: tess.indexed,
    });
  }
}

unsafe impl Texture for Headless {
  type TextureRepr = HeadlessTexture;

  unsafe fn new_texture(
    &mut self,
    size: [u32; 2],
    _: &Sampler,
    mipmaps: GenMipmaps,
    _: &[u8],
  ) -> Result<Self::TextureRepr, TextureError> {
    let handle = self.new_handle();
    self.record(Call::NewTexture {
      handle,
      size,
      mipmaps,
    });

    Ok(HeadlessTexture {
      handle,
      journal: self.journal.clone(),
    })
  }
}

unsafe impl Pipeline for Headless {
  unsafe fn start_pipeline(&mut self, state: &PipelineState) {
    self.record(Call::StartPipeline(*state));
  }

  unsafe fn use_program(&mut self, program: &Self::ProgramRepr) {
    self.record(Call::UseProgram(program.handle));
  }

  unsafe fn bind_texture(&mut self, unit: u32, texture: &Self::TextureRepr) {
    self.record(Call::BindTexture {
      unit,
      handle: texture.handle,
    });
  }
}

unsafe impl Query for Headless {
  fn backend_author(&self) -> Result<String, QueryError> {
    Ok("glprimer".to_owned())
  }

  fn backend_name(&self) -> Result<String, QueryError> {
    Ok("headless".to_owned())
  }

  fn backend_version(&self) -> Result<String, QueryError> {
    Ok("3.3 (headless)".to_owned())
  }

  fn backend_shading_lang_version(&self) -> Result<String, QueryError> {
    Ok("3.30".to_owned())
  }

  fn max_vertex_attribs(&self) -> Result<usize, QueryError> {
    Ok(16)
  }
}

/// A graphics context over the [`Headless`] backend.
#[derive(Debug, Default)]
pub struct HeadlessContext {
  backend: Headless,
}

impl HeadlessContext {
  /// Create a new context.
  pub fn new() -> Self {
    Self::default()
  }

  /// Calls recorded so far.
  pub fn journal(&self) -> Vec<Call> {
    self.backend.journal()
  }

  /// Forget the calls recorded so far.
  pub fn clear_journal(&mut self) {
    self.backend.clear_journal();
  }
}

unsafe impl GraphicsContext for HeadlessContext {
  type Backend = Headless;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uniform_declarations() {
    let uniforms = scan_uniforms(
      "#version 330 core\nuniform sampler2D texture0;\n  uniform vec4 color;\nin vec3 c;\n",
    );

    assert_eq!(
      uniforms,
      vec![
        ("texture0".to_owned(), "sampler2D".to_owned()),
        ("color".to_owned(), "vec4".to_owned()),
      ]
    );
  }

  #[test]
  fn resources_are_released_on_drop() {
    let mut ctx = HeadlessContext::new();
    let tex = ctx
      .new_texture([1, 1], Sampler::default(), GenMipmaps::No, &[0, 0, 0])
      .unwrap();
    drop(tex);

    assert_eq!(ctx.journal().last(), Some(&Call::DeleteTexture(1)));
  }
}
