use crate::gl33::shader::Program;
use crate::gl33::texture::Texture;
use crate::gl33::GL33;
use glprimer::backend::pipeline::Pipeline;
use glprimer::pipeline::{PipelineState, Viewport};

unsafe impl Pipeline for GL33 {
  unsafe fn start_pipeline(&mut self, pipeline_state: &PipelineState) {
    let mut state = self.state.borrow_mut();

    match pipeline_state.viewport {
      Viewport::Whole => (),

      Viewport::Specific {
        x,
        y,
        width,
        height,
      } => {
        state.set_viewport([x as _, y as _, width as _, height as _]);
      }
    }

    state.set_polygon_mode(pipeline_state.polygon_mode);

    if let Some(clear_color) = pipeline_state.clear_color {
      state.set_clear_color(clear_color);
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }
  }

  unsafe fn use_program(&mut self, program: &Program) {
    self.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn bind_texture(&mut self, unit: u32, texture: &Texture) {
    let mut state = self.state.borrow_mut();

    state.set_texture_unit(unit);
    state.bind_texture(texture.handle);
  }
}
