use crate::common::surface;
use glprimer_sdl2::sdl2::sys::SDL_WindowFlags;

pub fn fixture() {
  let surface = surface("Fixed window");
  let flags = surface.window().window_flags();

  assert_ne!(flags & SDL_WindowFlags::SDL_WINDOW_OPENGL as u32, 0);
  assert_eq!(flags & SDL_WindowFlags::SDL_WINDOW_RESIZABLE as u32, 0);
}
