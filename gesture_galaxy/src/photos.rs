//! Loading a photo collection from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use particle_field::{PhotoHandle, PhotoImage};

use crate::error::AppError;

/// Longest side of a loaded photo, in pixels.
pub const MAX_PHOTO_SIDE: u32 = 512;

/// Decode one image file into a [`PhotoHandle`].  The id is the path, the
/// name the file stem.
pub fn load_photo(path: &Path) -> Result<PhotoHandle, AppError> {
    let decode_err = |source| AppError::Decode { path: path.to_path_buf(), source };
    let mut img = image::open(path).map_err(decode_err)?;
    if img.width() > MAX_PHOTO_SIDE || img.height() > MAX_PHOTO_SIDE {
        img = img.thumbnail(MAX_PHOTO_SIDE, MAX_PHOTO_SIDE);
    }
    let rgba = img.to_rgba8();

    let (w, h) = rgba.dimensions();
    let pixels = rgba.pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            u32::from_be_bytes([a, r, g, b])
        })
        .collect();
    let image = PhotoImage::new(w as usize, h as usize, pixels)?;

    let name = path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(PhotoHandle::new(path.display().to_string(), name, image))
}

/// Load every decodable image in `dir`, ordered by path.  Files that fail
/// to decode are logged and skipped; only an unreadable directory is an
/// error.
pub fn load_photo_dir(dir: &Path) -> Result<Vec<PhotoHandle>, AppError> {
    let dir_err = |source| AppError::PhotoDir { path: dir.to_path_buf(), source };

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(dir_err)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut photos = Vec::with_capacity(paths.len());
    for path in paths {
        match load_photo(&path) {
            Ok(photo) => photos.push(photo),
            Err(e)    => log::warn!("skipping photo: {}", e),
        }
    }
    log::info!("loaded {} photos from {}", photos.len(), dir.display());
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, w: u32, h: u32, px: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(w, h, Rgba(px)).save(&path).unwrap();
        path
    }

    #[test]
    fn loads_sorted_and_skips_garbage() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png", 4, 4, [0, 0, 255, 255]);
        write_png(dir.path(), "a.png", 2, 3, [255, 0, 0, 255]);
        fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let photos = load_photo_dir(dir.path()).unwrap();
        let names: Vec<_> = photos.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(photos[0].image().width(), 2);
        assert_eq!(photos[0].image().pixel(0, 0), 0xFFFF0000);
        assert!(photos[0].id().ends_with("a.png"));
    }

    #[test]
    fn large_images_are_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 1024, 256, [10, 20, 30, 255]);
        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.image().width(), 512);
        assert_eq!(photo.image().height(), 128);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_photo_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AppError::PhotoDir { .. }));
    }

    #[test]
    fn undecodable_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"\x89PNG garbage").unwrap();
        assert!(matches!(load_photo(&path), Err(AppError::Decode { .. })));
    }
}
