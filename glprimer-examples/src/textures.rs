//! Sample two textures bound to two texture units and blend them on a quad.
//!
//! The images are fetched from the platform as `container.jpg` and `awesomeface.png`. A texture
//! that cannot be loaded is logged and left unbound; the quad is still drawn.

use crate::shared::{build_program, load_texture, TexturedVertex, CLEAR_COLOR, QUAD_INDICES};
use crate::{
  wants_to_quit, Example, ExampleError, Features, InputAction, LoopFeedback, PlatformServices,
};
use glprimer::backend::Backend;
use glprimer::context::GraphicsContext;
use glprimer::pipeline::PipelineState;
use glprimer::shader::{Program, TextureBinding, Uniform};
use glprimer::tess::{Mode, Tess};
use glprimer::texture::Texture;

/// Image sampled by `texture0`.
pub const CONTAINER: &str = "container.jpg";

/// Image sampled by `texture1`.
pub const AWESOME_FACE: &str = "awesomeface.png";

/// Vertex shader source.
pub const VS: &str = "#version 330 core

layout (location = 0) in vec3 pos;
layout (location = 1) in vec3 color;
layout (location = 2) in vec2 texcoord;

out vec3 vertex_color;
out vec2 vertex_texcoord;

void main() {
  gl_Position = vec4(pos.xyz, 1.0);
  vertex_color = color;
  vertex_texcoord = texcoord;
}
";

/// Fragment shader source.
pub const FS: &str = "#version 330 core

uniform sampler2D texture0;
uniform sampler2D texture1;

in vec3 vertex_color;
in vec2 vertex_texcoord;

out vec4 frag_color;

void main() {
  frag_color = mix(texture(texture0, vertex_texcoord), texture(texture1, vertex_texcoord), 0.2);
}
";

const VERTICES: [TexturedVertex; 4] = [
  // top right
  TexturedVertex {
    pos: [0.5, 0.5, 0.],
    rgb: [1., 0., 0.],
    uv: [1., 1.],
  },
  // bottom right
  TexturedVertex {
    pos: [0.5, -0.5, 0.],
    rgb: [0., 1., 0.],
    uv: [1., 0.],
  },
  // bottom left
  TexturedVertex {
    pos: [-0.5, -0.5, 0.],
    rgb: [0., 0., 1.],
    uv: [0., 0.],
  },
  // top left
  TexturedVertex {
    pos: [-0.5, 0.5, 0.],
    rgb: [1., 1., 0.],
    uv: [0., 1.],
  },
];

struct ShaderInterface<B>
where
  B: Backend,
{
  program: Program<B>,
  texture0: Uniform<TextureBinding>,
  texture1: Uniform<TextureBinding>,
}

pub struct LocalExample<B>
where
  B: Backend,
{
  shader: Option<ShaderInterface<B>>,
  quad: Tess<B>,
  // indexed by texture unit
  textures: [Option<Texture<B>>; 2],
}

impl<B> Example<B> for LocalExample<B>
where
  B: Backend,
{
  const TITLE: &'static str = "Textures";

  fn features() -> Features {
    Features::none().texture(CONTAINER).texture(AWESOME_FACE)
  }

  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> Result<Self, ExampleError> {
    let shader = build_program(context, VS, FS).map(|program| {
      let texture0 = program.uniform_or_unbound::<TextureBinding>("texture0");
      let texture1 = program.uniform_or_unbound::<TextureBinding>("texture1");

      ShaderInterface {
        program,
        texture0,
        texture1,
      }
    });

    let quad = context
      .new_tess()
      .set_vertices(&VERTICES[..])
      .set_indices(&QUAD_INDICES[..])
      .set_mode(Mode::Triangle)
      .build()?;

    let textures = [
      load_texture(context, platform, CONTAINER),
      load_texture(context, platform, AWESOME_FACE),
    ];

    Ok(LocalExample {
      shader,
      quad,
      textures,
    })
  }

  fn render_frame(
    mut self,
    _: f32,
    size: [u32; 2],
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = B>,
  ) -> LoopFeedback<Self> {
    if wants_to_quit(actions) {
      return LoopFeedback::Exit;
    }

    let state = PipelineState::default()
      .set_clear_color(CLEAR_COLOR)
      .set_viewport_size(size);
    let shader = self.shader.as_mut();
    let quad = &self.quad;
    let textures = &self.textures;

    context.new_pipeline_gate().pipeline(&state, |mut pipeline| {
      let bound: Vec<_> = textures
        .iter()
        .enumerate()
        .map(|(unit, texture)| {
          texture
            .as_ref()
            .map(|texture| pipeline.bind_texture(unit as u32, texture))
        })
        .collect();

      if let Some(shader) = shader {
        let uniforms = [&shader.texture0, &shader.texture1];

        pipeline.shade(&mut shader.program, |mut iface| {
          for (uniform, binding) in uniforms.iter().zip(bound) {
            if let Some(binding) = binding {
              iface.set(uniform, binding);
            }
          }

          iface.render(quad);
        });
      }
    });

    LoopFeedback::Continue(self)
  }
}
