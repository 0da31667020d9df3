use glprimer::backend::headless::{Call, Headless, HeadlessContext, UniformValue};
use glprimer::context::GraphicsContext;
use glprimer::pipeline::{PolygonMode, Viewport};
use glprimer::tess::Mode;
use glprimer_examples::shaders::pulse_color;
use glprimer_examples::shared::CLEAR_COLOR;
use glprimer_examples::textures::{AWESOME_FACE, CONTAINER};
use glprimer_examples::{
  hello_triangle, hello_window, shaders, textures, Example, InputAction, LoopFeedback,
  PlatformServices,
};
use std::collections::HashMap;
use std::f32::consts::PI;
use std::fmt;

const SIZE: [u32; 2] = [960, 540];

#[derive(Debug)]
struct UnknownTexture(String);

impl fmt::Display for UnknownTexture {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "unknown texture: {}", self.0)
  }
}

impl std::error::Error for UnknownTexture {}

#[derive(Default)]
struct TestPlatform {
  textures: HashMap<String, image::RgbImage>,
  fill: bool,
}

impl TestPlatform {
  fn with_texture(mut self, name: &str, size: u32) -> Self {
    self
      .textures
      .insert(name.to_owned(), image::RgbImage::new(size, size));
    self
  }
}

impl PlatformServices for TestPlatform {
  type FetchError = UnknownTexture;

  fn fetch_texture(&mut self, name: impl AsRef<str>) -> Result<&image::RgbImage, Self::FetchError> {
    let name = name.as_ref();
    self
      .textures
      .get(name)
      .ok_or_else(|| UnknownTexture(name.to_owned()))
  }

  fn fill_polygons(&self) -> bool {
    self.fill
  }
}

fn frame<E>(
  example: E,
  t: f32,
  actions: Vec<InputAction>,
  ctx: &mut HeadlessContext,
) -> LoopFeedback<E>
where
  E: Example<Headless>,
{
  example.render_frame(t, SIZE, actions.into_iter(), ctx)
}

fn continued<E>(feedback: LoopFeedback<E>) -> E {
  match feedback {
    LoopFeedback::Continue(example) => example,
    LoopFeedback::Exit => panic!("the example exited"),
  }
}

fn renders(journal: &[Call]) -> Vec<&Call> {
  journal
    .iter()
    .filter(|c| matches!(c, Call::Render { .. }))
    .collect()
}

fn start_pipeline(journal: &[Call]) -> Option<&Call> {
  journal.iter().find(|c| matches!(c, Call::StartPipeline(_)))
}

#[test]
fn hello_window_clears_every_frame() {
  let mut ctx = HeadlessContext::new();
  let example = <hello_window::LocalExample as Example<Headless>>::bootstrap(
    &mut TestPlatform::default(),
    &mut ctx,
  )
  .unwrap();

  let example = continued(frame(example, 0., vec![], &mut ctx));
  let journal = ctx.journal();

  match start_pipeline(&journal) {
    Some(Call::StartPipeline(state)) => {
      assert_eq!(state.clear_color, Some(CLEAR_COLOR));
      assert_eq!(
        state.viewport,
        Viewport::Specific {
          x: 0,
          y: 0,
          width: 960,
          height: 540
        }
      );
    }
    c => panic!("unexpected call: {:?}", c),
  }
  assert!(renders(&journal).is_empty());

  ctx.clear_journal();
  assert!(frame(example, 1., vec![InputAction::Quit], &mut ctx).is_exit());
  assert!(ctx.journal().is_empty());
}

#[test]
fn window_titles() {
  assert_eq!(
    <hello_window::LocalExample as Example<Headless>>::TITLE,
    "My Game Window"
  );
  assert_eq!(
    <hello_triangle::LocalExample<Headless> as Example<Headless>>::TITLE,
    "Hello Triangle"
  );
  assert_eq!(
    <shaders::LocalExample<Headless> as Example<Headless>>::TITLE,
    "Shaders"
  );
  assert_eq!(
    <textures::LocalExample<Headless> as Example<Headless>>::TITLE,
    "Textures"
  );
}

#[test]
fn hello_triangle_draws_an_indexed_wireframe_quad() {
  let mut ctx = HeadlessContext::new();
  let example =
    hello_triangle::LocalExample::bootstrap(&mut TestPlatform::default(), &mut ctx).unwrap();
  ctx.clear_journal();

  let _example = continued(frame(example, 0., vec![], &mut ctx));
  let journal = ctx.journal();

  match start_pipeline(&journal) {
    Some(Call::StartPipeline(state)) => assert_eq!(state.polygon_mode, PolygonMode::Line),
    c => panic!("unexpected call: {:?}", c),
  }

  assert_eq!(
    renders(&journal),
    vec![&Call::Render {
      handle: 4,
      mode: Mode::Triangle,
      count: 6,
      indexed: true
    }]
  );
}

#[test]
fn hello_triangle_can_be_filled() {
  let mut ctx = HeadlessContext::new();
  let mut platform = TestPlatform {
    fill: true,
    ..TestPlatform::default()
  };
  let example = hello_triangle::LocalExample::bootstrap(&mut platform, &mut ctx).unwrap();
  ctx.clear_journal();

  let _example = continued(frame(example, 0., vec![], &mut ctx));

  match start_pipeline(&ctx.journal()) {
    Some(Call::StartPipeline(state)) => assert_eq!(state.polygon_mode, PolygonMode::Fill),
    c => panic!("unexpected call: {:?}", c),
  }
}

#[test]
fn quit_anywhere_in_the_batch_exits_without_drawing() {
  let mut ctx = HeadlessContext::new();
  let example =
    hello_triangle::LocalExample::bootstrap(&mut TestPlatform::default(), &mut ctx).unwrap();
  ctx.clear_journal();

  let feedback = frame(example, 0., vec![InputAction::Quit], &mut ctx);

  assert!(feedback.is_exit());
  assert!(start_pipeline(&ctx.journal()).is_none());
}

#[test]
fn shaders_upload_the_pulsing_color_every_frame() {
  let mut ctx = HeadlessContext::new();
  let mut example =
    shaders::LocalExample::bootstrap(&mut TestPlatform::default(), &mut ctx).unwrap();
  ctx.clear_journal();

  let times = [0., PI / 2., PI, 3. * PI / 2.];
  for &t in &times {
    example = continued(frame(example, t, vec![], &mut ctx));
  }

  let journal = ctx.journal();
  let uploads: Vec<_> = journal
    .iter()
    .filter_map(|c| match c {
      Call::SetUniform {
        value: UniformValue::Vec4(color),
        ..
      } => Some(*color),
      _ => None,
    })
    .collect();

  assert_eq!(uploads.len(), times.len());
  assert_eq!(renders(&journal).len(), times.len());
  for (upload, &t) in uploads.iter().zip(&times) {
    assert_eq!(*upload, pulse_color(t));
  }
  assert_ne!(uploads[0], uploads[1]);
}

#[test]
fn shaders_draw_a_non_indexed_triangle() {
  let mut ctx = HeadlessContext::new();
  let example = shaders::LocalExample::bootstrap(&mut TestPlatform::default(), &mut ctx).unwrap();
  ctx.clear_journal();

  let _example = continued(frame(example, 0., vec![], &mut ctx));

  assert_eq!(
    renders(&ctx.journal()),
    vec![&Call::Render {
      handle: 4,
      mode: Mode::Triangle,
      count: 3,
      indexed: false
    }]
  );
}

#[test]
fn broken_program_draws_nothing() {
  let mut ctx = HeadlessContext::new();
  ctx.backend().fail_compilations(true);

  let example = shaders::LocalExample::bootstrap(&mut TestPlatform::default(), &mut ctx).unwrap();
  ctx.clear_journal();

  let _example = continued(frame(example, 0., vec![], &mut ctx));
  let journal = ctx.journal();

  // the frame is still cleared
  assert!(start_pipeline(&journal).is_some());
  assert!(!journal.iter().any(|c| matches!(c, Call::UseProgram(_))));
  assert!(renders(&journal).is_empty());
}

#[test]
fn textures_are_bound_to_units_0_and_1() {
  let mut ctx = HeadlessContext::new();
  let mut platform = TestPlatform::default()
    .with_texture(CONTAINER, 4)
    .with_texture(AWESOME_FACE, 2);
  let example = textures::LocalExample::bootstrap(&mut platform, &mut ctx).unwrap();

  assert!(ctx.journal().contains(&Call::NewTexture {
    handle: 5,
    size: [4, 4],
    mipmaps: glprimer::texture::GenMipmaps::Yes
  }));
  ctx.clear_journal();

  let _example = continued(frame(example, 0., vec![], &mut ctx));
  let journal = ctx.journal();

  assert_eq!(
    &journal[1..],
    &[
      Call::BindTexture { unit: 0, handle: 5 },
      Call::BindTexture { unit: 1, handle: 6 },
      Call::UseProgram(3),
      Call::SetUniform {
        location: 0,
        value: UniformValue::Sampler(0)
      },
      Call::SetUniform {
        location: 1,
        value: UniformValue::Sampler(1)
      },
      Call::Render {
        handle: 4,
        mode: Mode::Triangle,
        count: 6,
        indexed: true
      },
    ][..]
  );
}

#[test]
fn missing_texture_is_left_unbound() {
  let mut ctx = HeadlessContext::new();
  let mut platform = TestPlatform::default().with_texture(AWESOME_FACE, 2);
  let example = textures::LocalExample::bootstrap(&mut platform, &mut ctx).unwrap();
  ctx.clear_journal();

  let _example = continued(frame(example, 0., vec![], &mut ctx));
  let journal = ctx.journal();

  let bindings: Vec<_> = journal
    .iter()
    .filter(|c| matches!(c, Call::BindTexture { .. } | Call::SetUniform { .. }))
    .collect();

  assert_eq!(
    bindings,
    vec![
      &Call::BindTexture { unit: 1, handle: 5 },
      &Call::SetUniform {
        location: 1,
        value: UniformValue::Sampler(1)
      },
    ]
  );
  assert_eq!(renders(&journal).len(), 1);
}

#[test]
fn textures_features() {
  let features = <textures::LocalExample<Headless> as Example<Headless>>::features();

  assert_eq!(
    features.textures(),
    &[CONTAINER.to_owned(), AWESOME_FACE.to_owned()][..]
  );
  assert!(
    <shaders::LocalExample<Headless> as Example<Headless>>::features()
      .textures()
      .is_empty()
  );
}

#[test]
fn resources_are_released_on_drop() {
  let mut ctx = HeadlessContext::new();
  let mut platform = TestPlatform::default()
    .with_texture(CONTAINER, 4)
    .with_texture(AWESOME_FACE, 2);
  let example = textures::LocalExample::bootstrap(&mut platform, &mut ctx).unwrap();
  ctx.clear_journal();

  assert!(frame(example, 0., vec![InputAction::Quit], &mut ctx).is_exit());

  let journal = ctx.journal();
  for call in &[
    Call::DeleteProgram(3),
    Call::DeleteTess(4),
    Call::DeleteTexture(5),
    Call::DeleteTexture(6),
  ] {
    assert!(journal.contains(call), "missing {:?}", call);
  }
}
