//! Build configuration.

/// On-disk tile format for collection and per-item tiles.
///
/// JPEG is the conventional Deep Zoom choice; the codec is a parameter, not
/// a core invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileFormat {
    /// JPEG, quality taken from [`BuildConfig::jpeg_quality`]
    #[default]
    Jpeg,
    /// Lossless PNG
    Png,
}

impl TileFormat {
    /// File extension without the leading dot, as written into descriptors.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Policy for a source image that fails to decode.
///
/// The upstream behavior was unspecified, so the choice is explicit
/// configuration here rather than an assumption baked into the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the whole run on the first unreadable image (default).
    #[default]
    Abort,
    /// Log a warning and drop the image before ids are assigned, keeping
    /// the surviving ids contiguous.
    Skip,
}

/// Configuration for a collection build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Tile format for both collection and per-item tiles
    pub tile_format: TileFormat,
    /// JPEG encoding quality, 1-100
    pub jpeg_quality: u8,
    /// Number of worker threads (default: number of CPU cores)
    pub threads: usize,
    /// What to do when a source image fails to decode
    pub error_policy: ErrorPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tile_format: TileFormat::Jpeg,
            jpeg_quality: 90,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            error_policy: ErrorPolicy::Abort,
        }
    }
}

impl BuildConfig {
    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Set the tile format.
    pub fn with_tile_format(mut self, format: TileFormat) -> Self {
        self.tile_format = format;
        self
    }

    /// Set the JPEG encoding quality.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the per-item failure policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.tile_format, TileFormat::Jpeg);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert!(config.threads >= 1);
    }

    #[test]
    fn test_builder_setters_clamp() {
        let config = BuildConfig::default()
            .with_threads(0)
            .with_jpeg_quality(255)
            .with_error_policy(ErrorPolicy::Skip);
        assert_eq!(config.threads, 1);
        assert_eq!(config.jpeg_quality, 100);
        assert_eq!(config.error_policy, ErrorPolicy::Skip);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(TileFormat::Jpeg.extension(), "jpg");
        assert_eq!(TileFormat::Png.extension(), "png");
    }
}
