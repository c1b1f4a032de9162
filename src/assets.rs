//! Texture loading off the frame thread.
//!
//! A load is a single operation that ends in `Result<TextureAsset,
//! LoadError>`; progress is a stream of events on the same channel.
//! Failures are not fatal to the scene: callers keep their fallback
//! texture and carry on.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::imageops::{self, FilterType};
use tracing::{debug, info};

use crate::error::LoadError;

const READ_CHUNK_BYTES: usize = 64 * 1024;

/// Decoded RGBA8 texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAsset {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureAsset {
    /// 1x1 texture of a single color
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }
}

/// Event emitted by a running load
#[derive(Debug)]
pub enum LoadEvent {
    /// Fraction of the file read so far, in [0, 1]
    Progress(f32),
    Finished(Result<TextureAsset, LoadError>),
}

/// Size that fits within `max_dimension` on both sides, keeping the aspect
/// ratio. Sizes that already fit are returned unchanged.
pub fn fitted_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }

    let scale = |side: u32| {
        let scaled = (side as u64 * max_dimension as u64 + longest as u64 / 2) / longest as u64;
        (scaled as u32).clamp(1, max_dimension)
    };
    (scale(width), scale(height))
}

/// Load and decode a texture on the calling thread, reporting read progress.
///
/// Images larger than `max_dimension` on either side are downscaled to fit.
pub fn load_texture(
    path: &Path,
    max_dimension: u32,
    mut on_progress: impl FnMut(f32),
) -> Result<TextureAsset, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let total = file.metadata().map_err(io_err)?.len().max(1);

    let mut bytes = Vec::with_capacity(total as usize);
    let mut chunk = vec![0u8; READ_CHUNK_BYTES];
    loop {
        let n = file.read(&mut chunk).map_err(io_err)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        on_progress((bytes.len() as f32 / total as f32).min(1.0));
    }
    on_progress(1.0);

    let mut image = image::load_from_memory(&bytes)
        .map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let (width, height) = fitted_size(image.width(), image.height(), max_dimension);
    if (width, height) != image.dimensions() {
        info!(
            path = %path.display(),
            "downscaling {}x{} texture to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );
        image = imageops::resize(&image, width, height, FilterType::Triangle);
    }

    Ok(TextureAsset {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

/// Start loading a texture on a background thread, capped at
/// `max_dimension` pixels per side
pub fn spawn_texture_load(path: impl Into<PathBuf>, max_dimension: u32) -> PendingAsset {
    let path = path.into();
    let (sender, events) = mpsc::channel();

    let thread_path = path.clone();
    thread::spawn(move || {
        let progress_sender = sender.clone();
        let result = load_texture(&thread_path, max_dimension, |fraction| {
            let _ = progress_sender.send(LoadEvent::Progress(fraction));
        });
        let _ = sender.send(LoadEvent::Finished(result));
    });

    debug!(path = %path.display(), "texture load started");

    PendingAsset {
        path,
        events,
        progress: 0.0,
    }
}

/// Handle to a texture load in flight
#[derive(Debug)]
pub struct PendingAsset {
    path: PathBuf,
    events: Receiver<LoadEvent>,
    progress: f32,
}

impl PendingAsset {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Latest reported read progress
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Drain pending events without blocking.
    ///
    /// Returns the outcome once the load has finished.
    pub fn poll(&mut self) -> Option<Result<TextureAsset, LoadError>> {
        loop {
            match self.events.try_recv() {
                Ok(LoadEvent::Progress(fraction)) => self.progress = fraction,
                Ok(LoadEvent::Finished(result)) => return Some(result),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    return Some(Err(LoadError::Disconnected(self.path.clone())))
                }
            }
        }
    }

    /// Block until the load finishes
    pub fn wait(mut self) -> Result<TextureAsset, LoadError> {
        loop {
            match self.events.recv() {
                Ok(LoadEvent::Progress(fraction)) => self.progress = fraction,
                Ok(LoadEvent::Finished(result)) => return result,
                Err(_) => return Err(LoadError::Disconnected(self.path)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shoreline-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = temp_path("does-not-exist.png");
        let err = spawn_texture_load(&path, 8192).wait().unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = load_texture(&path, 8192, |_| {}).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_png_loads_with_progress() {
        let path = temp_path("checker.png");
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let mut reported = Vec::new();
        let texture = load_texture(&path, 8192, |f| reported.push(f)).unwrap();

        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.rgba.len(), 3 * 2 * 4);
        assert_eq!(&texture.rgba[4..8], &[255, 0, 0, 255]);
        assert_eq!(reported.last(), Some(&1.0));
        assert!(reported.windows(2).all(|w| w[0] <= w[1]));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_pending_asset_poll_finishes() {
        let path = temp_path("poll.png");
        image::RgbaImage::new(1, 1).save(&path).unwrap();

        let mut pending = spawn_texture_load(&path, 8192);
        let result = loop {
            if let Some(result) = pending.poll() {
                break result;
            }
            std::thread::yield_now();
        };

        assert_eq!(result.unwrap().width, 1);
        assert_eq!(pending.progress(), 1.0);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_fitted_size_keeps_aspect() {
        assert_eq!(fitted_size(512, 256, 8192), (512, 256));
        assert_eq!(fitted_size(8192, 8192, 8192), (8192, 8192));
        assert_eq!(fitted_size(10000, 3000, 8192), (8192, 2458));
        assert_eq!(fitted_size(3000, 10000, 8192), (2458, 8192));
        assert_eq!(fitted_size(100000, 1, 8192), (8192, 1));
    }

    #[test]
    fn test_oversize_image_is_downscaled_on_load() {
        let path = temp_path("oversize.png");
        image::RgbaImage::from_pixel(16, 8, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let texture = spawn_texture_load(&path, 4).wait().unwrap();

        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(texture.rgba.len(), 4 * 2 * 4);
        for (got, want) in texture.rgba[0..4].iter().zip([10u8, 20, 30, 255]) {
            assert!(got.abs_diff(want) <= 1, "{} vs {}", got, want);
        }

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_solid_texture() {
        let t = TextureAsset::solid([1, 2, 3, 4]);
        assert_eq!((t.width, t.height), (1, 1));
        assert_eq!(t.rgba, vec![1, 2, 3, 4]);
    }
}
