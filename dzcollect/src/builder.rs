//! Collection build orchestration.
//!
//! Sequences the whole pipeline: enumerate sources, build the base level
//! (parallel across items), write the manifest, then reduce levels from the
//! deepest up to the root (parallel within a level, strictly sequential
//! between levels).

use crate::base::BaseLevelBuilder;
use crate::codec;
use crate::collection::Collection;
use crate::config::{BuildConfig, ErrorPolicy};
use crate::coord::{bit_depth_for, grid_size_for, max_level_for};
use crate::dzi::DziEncoder;
use crate::error::BuildError;
use crate::manifest;
use crate::pool::run_tasks;
use crate::reduce::LevelReducer;
use crate::store::DiskTileStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of a completed build.
#[derive(Debug)]
pub struct BuildReport {
    /// Number of items in the finished collection
    pub item_count: u32,
    /// Deepest pyramid level
    pub max_level: u32,
    /// Path of the written `.dzc` manifest
    pub manifest_path: PathBuf,
    /// Sources dropped under [`ErrorPolicy::Skip`]
    pub skipped: Vec<PathBuf>,
}

/// Orchestrates a collection build end to end.
pub struct CollectionBuilder {
    config: BuildConfig,
}

impl CollectionBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Builds the collection for every image in `input_dir`, writing all
    /// output under `output_dir` with the given base name.
    pub fn build(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        name: &str,
    ) -> Result<BuildReport, BuildError> {
        // Precondition check runs before anything is written.
        let mut sources = enumerate_images(input_dir)?;
        let mut skipped = Vec::new();
        if self.config.error_policy == ErrorPolicy::Skip {
            (sources, skipped) = self.probe_sources(sources);
            if sources.is_empty() {
                return Err(BuildError::NoImagesFound {
                    dir: input_dir.to_path_buf(),
                });
            }
        }

        fs::create_dir_all(output_dir).map_err(|e| BuildError::io(output_dir, e))?;

        let item_count = sources.len() as u32;
        let max_level = max_level_for(item_count);
        let bit_depth = bit_depth_for(item_count);
        let grid_size = grid_size_for(item_count);
        info!(item_count, max_level, grid_size, "starting collection build");

        let store = DiskTileStore::create(
            output_dir.join(format!("{name}_files")),
            self.config.tile_format,
            self.config.jpeg_quality,
        )?;
        let encoder = DziEncoder::new(self.config.tile_format, self.config.jpeg_quality);
        let base = BaseLevelBuilder::new(&store, &encoder, output_dir, max_level, bit_depth);

        // Base level: items are independent; records come back in id order.
        let tasks: Vec<(u32, PathBuf)> = sources.into_iter().enumerate()
            .map(|(id, path)| (id as u32, path))
            .collect();
        let items = run_tasks(tasks, self.config.threads, |(id, path)| {
            base.build_item(id, &path)
        })
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

        // Manifest is emitted once, after all items and before reduction.
        let collection = Collection::new(items, self.config.tile_format.extension());
        let manifest_path = output_dir.join(format!("{name}.dzc"));
        manifest::write(&collection, &manifest_path)?;
        info!(path = %manifest_path.display(), "wrote collection manifest");

        // Level reduction: parallel within a level, a barrier between levels.
        let reducer = LevelReducer::new(&store, grid_size);
        for child_level in (1..=max_level).rev() {
            let written: u32 = run_tasks(reducer.blocks(), self.config.threads, |(i, j)| {
                reducer.reduce_block(child_level, i, j)
            })
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(u32::from)
            .sum();
            info!(level = child_level - 1, tiles = written, "reduced level");
        }

        Ok(BuildReport {
            item_count,
            max_level,
            manifest_path,
            skipped,
        })
    }

    /// Decodes every candidate once and drops the unreadable ones, so ids
    /// assigned afterwards are contiguous over the survivors.
    fn probe_sources(&self, sources: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let probed = run_tasks(sources, self.config.threads, |path| {
            let ok = codec::read_image(&path).is_ok();
            (path, ok)
        });
        let mut kept = Vec::new();
        let mut skipped = Vec::new();
        for (path, ok) in probed {
            if ok {
                kept.push(path);
            } else {
                warn!(path = %path.display(), "skipping unreadable source image");
                skipped.push(path);
            }
        }
        (kept, skipped)
    }
}

/// Lists candidate source images: regular, non-hidden files directly inside
/// `input_dir`, sorted by file name. No recursion.
pub fn enumerate_images(input_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let entries = fs::read_dir(input_dir).map_err(|e| BuildError::io(input_dir, e))?;
    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io(input_dir, e))?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if path.is_file() && !hidden {
            sources.push(path);
        }
    }
    if sources.is_empty() {
        return Err(BuildError::NoImagesFound {
            dir: input_dir.to_path_buf(),
        });
    }
    sources.sort();
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::write(dir.path().join(".hidden.png"), b"x").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let sources = enumerate_images(dir.path()).unwrap();
        let names: Vec<_> = sources
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_enumerate_empty_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = enumerate_images(dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::NoImagesFound { .. }));
    }

    #[test]
    fn test_enumerate_missing_dir_is_io_error() {
        let err = enumerate_images(Path::new("/nonexistent/dzcollect-input")).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }
}
