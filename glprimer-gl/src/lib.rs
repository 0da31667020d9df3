//! OpenGL backends.
//!
//! This crate exports [OpenGL](https://www.khronos.org/opengl/) backends for `glprimer`. Only
//! OpenGL 3.3 core is available, via [`GL33`].
//!
//! The OpenGL function pointers must be loaded (`gl::load_with`) and a context made current on the
//! calling thread before creating a backend; windowing crates such as `glprimer-sdl2` do it for
//! you.

pub mod gl33;

pub use gl33::GL33;
