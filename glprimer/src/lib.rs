//! # glprimer
//!
//! A small, typed graphics layer used by introductory rendering programs. It covers exactly what a
//! “getting started” program needs and nothing more:
//!
//! - Compiling shader [`shader::Stage`]s and linking them into [`shader::Program`]s, with the
//!   driver diagnostics carried in the returned errors.
//! - Uploading static vertex and index data into a [`tess::Tess`].
//! - Uploading decoded RGB images into [`texture::Texture`]s.
//! - Issuing the per-frame work through a [`pipeline::PipelineGate`]: clear, bind program, set
//!   uniforms, bind textures and draw.
//!
//! # Backends
//!
//! Everything in this crate is generic over a *backend type*, which implements the traits found
//! in [`backend`]. The OpenGL 3.3 backend lives in the `glprimer-gl` crate. A recording backend,
//! useful to test programs without a GPU, is available in `backend::headless` with the `headless`
//! feature.
//!
//! # Contexts
//!
//! Resources are created through a [`context::GraphicsContext`], which is typically provided by a
//! windowing crate such as `glprimer-sdl2`. A context is bound to a single thread.

#![deny(missing_docs)]

pub mod backend;
pub mod context;
pub mod pipeline;
pub mod query;
pub mod shader;
pub mod tess;
pub mod texture;
pub mod vertex;
