mod platform;

use glprimer::context::GraphicsContext;
use glprimer_examples::{Example, ExampleError, InputAction, LoopFeedback};
use glprimer_gl::GL33;
use glprimer_sdl2::sdl2::event::Event;
use glprimer_sdl2::sdl2::keyboard::Keycode;
use glprimer_sdl2::{GL33Surface, Sdl2SurfaceError};
use glprimer_windowing::WindowOpt;
use platform::DesktopPlatformServices;
use std::error;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "glprimer-desktop", about = "Run the glprimer examples.")]
pub struct CLIOpts {
  #[structopt(short, long, parse(from_os_str), default_value = ".")]
  /// Directory where to pick textures from.
  textures: PathBuf,

  #[structopt(short, long)]
  /// List available examples.
  list_examples: bool,

  #[structopt(long)]
  /// Do not synchronize buffer swaps with the display.
  no_vsync: bool,

  #[structopt(long)]
  /// Fill polygons instead of drawing wireframes.
  fill: bool,

  /// Example to run.
  example: Option<String>,
}

/// Errors that stop the runner.
#[derive(Debug)]
pub enum RunError {
  /// No example name was given.
  NoExample,
  /// The example name is not known.
  UnknownExample(String),
  /// The window or the graphics context cannot be created.
  Surface(Sdl2SurfaceError),
  /// The example cannot start.
  Example(ExampleError),
}

impl fmt::Display for RunError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      RunError::NoExample => f.write_str("no example to run"),
      RunError::UnknownExample(ref name) => write!(f, "no example found with name {}", name),
      RunError::Surface(ref e) => write!(f, "cannot create surface: {}", e),
      RunError::Example(ref e) => write!(f, "cannot bootstrap example: {}", e),
    }
  }
}

impl error::Error for RunError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      RunError::Surface(e) => Some(e),
      RunError::Example(e) => Some(e),
      _ => None,
    }
  }
}

impl From<Sdl2SurfaceError> for RunError {
  fn from(e: Sdl2SurfaceError) -> Self {
    RunError::Surface(e)
  }
}

impl From<ExampleError> for RunError {
  fn from(e: ExampleError) -> Self {
    RunError::Example(e)
  }
}

/// Macro to declaratively add examples.
macro_rules! examples {
  ($($ex_name:literal, $ex_ty:ty),* $(,)?) => {
    fn show_available_examples() {
      println!("available examples:");
      $( println!("  - {}", $ex_name); )*
    }

    // run an example based on its name
    fn pick_and_run_example(cli_opts: &CLIOpts) -> Result<(), RunError> {
      match cli_opts.example.as_deref() {
        $(
          Some($ex_name) => run_example::<$ex_ty>(cli_opts),
        )*

        Some(name) => {
          show_available_examples();
          Err(RunError::UnknownExample(name.to_owned()))
        }

        None => {
          show_available_examples();
          Err(RunError::NoExample)
        }
      }
    }
  }
}

// Run an example.
fn run_example<E>(cli_opts: &CLIOpts) -> Result<(), RunError>
where
  E: Example<GL33>,
{
  let win_opt = WindowOpt::default().set_vsync(!cli_opts.no_vsync);
  let mut surface = GL33Surface::new(E::TITLE, win_opt)?;
  let mut event_pump = surface.event_pump()?;

  log_backend_info(&mut surface);

  // check the features so that we know what we need to load
  let mut services =
    DesktopPlatformServices::new(cli_opts.textures.clone(), cli_opts.fill, E::features());

  let mut example = E::bootstrap(&mut services, &mut surface)?;
  let start_t = Instant::now();

  loop {
    // drain every pending event before rendering
    let actions: Vec<_> = event_pump.poll_iter().filter_map(adapt_events).collect();

    let t = start_t.elapsed().as_secs_f32();
    let size = surface.drawable_size();
    let feedback = example.render_frame(t, size, actions.into_iter(), &mut surface);

    if let LoopFeedback::Continue(stepped) = feedback {
      example = stepped;
      surface.swap_buffers();
    } else {
      break;
    }
  }

  Ok(())
}

fn log_backend_info(surface: &mut GL33Surface) {
  let query = surface.query();

  match query.backend_version() {
    Ok(version) => log::info!("OpenGL version: {}", version),
    Err(e) => log::warn!("{}", e),
  }

  if let (Ok(author), Ok(name)) = (query.backend_author(), query.backend_name()) {
    log::debug!("renderer: {} ({})", name, author);
  }

  if let Ok(glsl) = query.backend_shading_lang_version() {
    log::debug!("GLSL version: {}", glsl);
  }
}

fn adapt_events(event: Event) -> Option<InputAction> {
  match event {
    Event::Quit { .. }
    | Event::KeyDown {
      keycode: Some(Keycode::Escape),
      ..
    } => Some(InputAction::Quit),

    _ => None,
  }
}

examples! {
  "hello-window", glprimer_examples::hello_window::LocalExample,
  "hello-triangle", glprimer_examples::hello_triangle::LocalExample<GL33>,
  "shaders", glprimer_examples::shaders::LocalExample<GL33>,
  "textures", glprimer_examples::textures::LocalExample<GL33>,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_examples {
    show_available_examples();
    return;
  }

  if let Err(e) = pick_and_run_example(&cli_opts) {
    log::error!("{}", e);
    process::exit(-1);
  }
}
