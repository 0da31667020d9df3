use crate::gl33::state::GLState;
use crate::gl33::GL33;
use gl::types::*;
use glprimer::backend::texture::Texture as TextureBackend;
use glprimer::texture::{
  GenMipmaps, MagFilter, MinFilter, Sampler, TextureError, Wrap, TEXEL_BYTES,
};
use std::cell::RefCell;
use std::os::raw::c_void;
use std::rc::Rc;

/// A 2D texture object.
#[derive(Debug)]
pub struct Texture {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Texture {
  fn drop(&mut self) {
    self.state.borrow_mut().unbind_texture(self.handle);

    unsafe {
      gl::DeleteTextures(1, &self.handle);
    }
  }
}

unsafe impl TextureBackend for GL33 {
  type TextureRepr = Texture;

  unsafe fn new_texture(
    &mut self,
    size: [u32; 2],
    sampler: &Sampler,
    mipmaps: GenMipmaps,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError> {
    let mut state = self.state.borrow_mut();

    let mut handle: GLuint = 0;
    gl::GenTextures(1, &mut handle);

    if handle == 0 {
      return Err(TextureError::TextureStorageCreationFailed(
        "unable to create texture".to_owned(),
      ));
    }

    state.bind_texture(handle);

    apply_sampler_to_texture(gl::TEXTURE_2D, sampler);

    gl::PixelStorei(gl::UNPACK_ALIGNMENT, unpack_alignment(size[0]));
    gl::TexImage2D(
      gl::TEXTURE_2D,
      0,
      gl::RGB8 as GLint,
      size[0] as GLsizei,
      size[1] as GLsizei,
      0,
      gl::RGB,
      gl::UNSIGNED_BYTE,
      texels.as_ptr() as *const c_void,
    );

    if mipmaps == GenMipmaps::Yes {
      gl::GenerateMipmap(gl::TEXTURE_2D);
    }

    Ok(Texture {
      handle,
      state: self.state.clone(),
    })
  }
}

// Alignment of the rows of tightly packed RGB8 texels for a given width.
fn unpack_alignment(width: u32) -> GLint {
  let skip_bytes = (width as usize * TEXEL_BYTES) % 8;

  match skip_bytes {
    0 => 8,
    2 => 2,
    4 => 4,
    _ => 1,
  }
}

unsafe fn apply_sampler_to_texture(target: GLenum, sampler: &Sampler) {
  gl::TexParameteri(
    target,
    gl::TEXTURE_WRAP_S,
    opengl_wrap(sampler.wrap_s) as GLint,
  );
  gl::TexParameteri(
    target,
    gl::TEXTURE_WRAP_T,
    opengl_wrap(sampler.wrap_t) as GLint,
  );
  gl::TexParameteri(
    target,
    gl::TEXTURE_MIN_FILTER,
    opengl_min_filter(sampler.min_filter) as GLint,
  );
  gl::TexParameteri(
    target,
    gl::TEXTURE_MAG_FILTER,
    opengl_mag_filter(sampler.mag_filter) as GLint,
  );
}

fn opengl_wrap(wrap: Wrap) -> GLenum {
  match wrap {
    Wrap::ClampToEdge => gl::CLAMP_TO_EDGE,
    Wrap::Repeat => gl::REPEAT,
    Wrap::MirroredRepeat => gl::MIRRORED_REPEAT,
  }
}

fn opengl_min_filter(filter: MinFilter) -> GLenum {
  match filter {
    MinFilter::Nearest => gl::NEAREST,
    MinFilter::Linear => gl::LINEAR,
    MinFilter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
    MinFilter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
    MinFilter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
    MinFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
  }
}

fn opengl_mag_filter(filter: MagFilter) -> GLenum {
  match filter {
    MagFilter::Nearest => gl::NEAREST,
    MagFilter::Linear => gl::LINEAR,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn row_alignment() {
    // 512 × 3 = 1536 bytes, multiple of 8
    assert_eq!(unpack_alignment(512), 8);
    // 4 × 3 = 12 bytes
    assert_eq!(unpack_alignment(4), 4);
    // 2 × 3 = 6 bytes
    assert_eq!(unpack_alignment(2), 1);
    // 6 × 3 = 18 bytes
    assert_eq!(unpack_alignment(6), 2);
    assert_eq!(unpack_alignment(1), 1);
  }

  #[test]
  fn default_sampler() {
    let sampler = Sampler::default();

    assert_eq!(opengl_wrap(sampler.wrap_s), gl::REPEAT);
    assert_eq!(opengl_wrap(sampler.wrap_t), gl::REPEAT);
    assert_eq!(
      opengl_min_filter(sampler.min_filter),
      gl::NEAREST_MIPMAP_LINEAR
    );
    assert_eq!(opengl_mag_filter(sampler.mag_filter), gl::LINEAR);
  }
}
