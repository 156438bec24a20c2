//! Where photos come from and where finished images go.

use crate::error::EditorError;
use async_trait::async_trait;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tone_pipeline::RenderedImage;

/// Supplies encoded image bytes
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn read(&self) -> Result<Vec<u8>, EditorError>;

    /// Short human-readable name for logs
    fn describe(&self) -> String;
}

/// Reads a photo from disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[async_trait]
impl ImageSource for FileSource {
    async fn read(&self) -> Result<Vec<u8>, EditorError> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to read image file"
            );
            EditorError::DecodeFailed(format!("{}: {e}", self.file_name()))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Bytes already in memory
pub struct BytesSource {
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl ImageSource for BytesSource {
    async fn read(&self) -> Result<Vec<u8>, EditorError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("{} bytes in memory", self.bytes.len())
    }
}

/// Receives the finished image on an explicit export
#[async_trait]
pub trait ImageSink: Send + Sync {
    async fn write(&self, image: Arc<RenderedImage>) -> Result<(), EditorError>;

    fn describe(&self) -> String;
}

/// Writes the image as an 8-bit RGBA PNG
pub struct PngFileSink {
    path: PathBuf,
    compression: png::Compression,
}

impl PngFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            compression: png::Compression::Default,
        }
    }

    pub fn with_compression(mut self, compression: png::Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImageSink for PngFileSink {
    async fn write(&self, image: Arc<RenderedImage>) -> Result<(), EditorError> {
        let compression = self.compression;
        let png = tokio::task::spawn_blocking(move || encode_png(&image, compression))
            .await
            .map_err(|e| EditorError::Export(format!("Encode task failed: {e}")))??;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| EditorError::Export(format!("{}: {e}", parent.display())))?;
        }
        tokio::fs::write(&self.path, &png)
            .await
            .map_err(|e| EditorError::Export(format!("{}: {e}", self.path.display())))?;

        tracing::info!(path = %self.path.display(), bytes = png.len(), "Exported image");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Encode a rendered image as an RGBA8 PNG
pub fn encode_png(
    image: &RenderedImage,
    compression: png::Compression,
) -> Result<Vec<u8>, EditorError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression);
        let mut writer = encoder
            .write_header()
            .map_err(|e| EditorError::Export(e.to_string()))?;
        writer
            .write_image_data(image.as_rgba8())
            .map_err(|e| EditorError::Export(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
