//! Platform services implementation.

use glprimer_examples::{Features, PlatformServices};
use image::ImageError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Desktop implementation of the [`PlatformServices`] API.
///
/// Images are read from a texture directory, converted to RGB8 and flipped so that their first row
/// is the bottom one.
#[derive(Debug)]
pub struct DesktopPlatformServices {
  texture_root: PathBuf,
  fill_polygons: bool,
  textures: HashMap<String, image::RgbImage>,
}

impl DesktopPlatformServices {
  /// Create the services and load every texture the features ask for.
  ///
  /// Textures that cannot be loaded are retried when fetched, so that the caller gets the error.
  pub fn new(texture_root: PathBuf, fill_polygons: bool, features: Features) -> Self {
    let mut services = Self {
      texture_root,
      fill_polygons,
      textures: HashMap::new(),
    };

    for name in features.textures() {
      if let Err(e) = services.load_texture(name) {
        log::debug!("cannot preload texture {}: {}", name, e);
      }
    }

    services
  }

  fn load_texture(&mut self, name: &str) -> Result<(), DesktopFetchError> {
    let path = self.texture_root.join(name);
    let texture = load_image(&path)?;

    log::debug!(
      "loaded {} ({}×{})",
      path.display(),
      texture.width(),
      texture.height()
    );
    self.textures.insert(name.to_owned(), texture);

    Ok(())
  }
}

/// Read an image and turn it into bottom-row-first RGB8 texels.
pub fn load_image(path: &Path) -> Result<image::RgbImage, DesktopFetchError> {
  image::open(path)
    .map(|img| img.flipv().to_rgb8())
    .map_err(|e| DesktopFetchError::ImageError(path.to_owned(), e))
}

#[derive(Debug)]
pub enum DesktopFetchError {
  UnknownTexture(String),
  ImageError(PathBuf, ImageError),
}

impl fmt::Display for DesktopFetchError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DesktopFetchError::UnknownTexture(ref name) => write!(f, "unknown texture to load: {}", name),
      DesktopFetchError::ImageError(ref path, ref e) => {
        write!(f, "cannot fetch texture {}: {}", path.display(), e)
      }
    }
  }
}

impl Error for DesktopFetchError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DesktopFetchError::ImageError(_, e) => Some(e),
      _ => None,
    }
  }
}

impl PlatformServices for DesktopPlatformServices {
  type FetchError = DesktopFetchError;

  fn fetch_texture(&mut self, name: impl AsRef<str>) -> Result<&image::RgbImage, Self::FetchError> {
    let name = name.as_ref();

    if !self.textures.contains_key(name) {
      self.load_texture(name)?;
    }

    self
      .textures
      .get(name)
      .ok_or_else(|| DesktopFetchError::UnknownTexture(name.to_owned()))
  }

  fn fill_polygons(&self) -> bool {
    self.fill_polygons
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::env;
  use std::fs;

  fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("glprimer-desktop-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  #[test]
  fn images_are_flipped() {
    let dir = scratch_dir("flip");
    let mut img = image::RgbImage::new(1, 2);
    img.put_pixel(0, 0, image::Rgb([255, 0, 0])); // top
    img.put_pixel(0, 1, image::Rgb([0, 0, 255])); // bottom
    img.save(dir.join("column.png")).unwrap();

    let mut services = DesktopPlatformServices::new(
      dir.clone(),
      false,
      Features::none().texture("column.png"),
    );
    let texels = services.fetch_texture("column.png").unwrap();

    // the bottom row comes first
    assert_eq!(texels.as_raw(), &vec![0, 0, 255, 255, 0, 0]);

    fs::remove_dir_all(dir).unwrap();
  }

  #[test]
  fn missing_image_is_an_error() {
    let dir = scratch_dir("missing");
    let mut services = DesktopPlatformServices::new(dir.clone(), true, Features::none());

    assert!(matches!(
      services.fetch_texture("container.jpg"),
      Err(DesktopFetchError::ImageError(..))
    ));
    assert!(services.fill_polygons());

    fs::remove_dir_all(dir).unwrap();
  }
}
