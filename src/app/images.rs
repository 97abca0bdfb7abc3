// Rollcall - app/images.rs
//
// Face image preparation for the recognition pipeline: resize to the model's
// input size, and reject images that cannot be decoded or are too small.
//
// Failures never escape as errors from `resize`, `batch_resize` or
// `validate`; they are logged and reported through the return value.
// Face-presence detection is not performed here.

use crate::platform::fs::list_image_files;
use crate::util::constants::{
    DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH, DEFAULT_MIN_IMAGE_DIMENSION,
};
use crate::util::error::ImageError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Outcome of [`ImageValidator::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCheck {
    Valid,
    CannotRead,
    TooSmall { width: u32, height: u32 },
}

impl ImageCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, ImageCheck::Valid)
    }

    /// Short reason string shown to the operator.
    pub fn reason(&self) -> &'static str {
        match self {
            ImageCheck::Valid => "ok",
            ImageCheck::CannotRead => "cannot read",
            ImageCheck::TooSmall { .. } => "too small",
        }
    }
}

/// Resizes and validates face images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageValidator {
    /// Output (width, height) of `resize`.
    pub size: (u32, u32),
    /// Images with either side below this fail validation.
    pub min_dimension: u32,
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self {
            size: (DEFAULT_IMAGE_WIDTH, DEFAULT_IMAGE_HEIGHT),
            min_dimension: DEFAULT_MIN_IMAGE_DIMENSION,
        }
    }
}

impl ImageValidator {
    pub fn new(size: (u32, u32), min_dimension: u32) -> Self {
        Self {
            size,
            min_dimension,
        }
    }

    /// Decode `path`, stretch it to `self.size`, and encode it to `out_path`
    /// in the format implied by its extension. Alpha is dropped.
    pub fn try_resize(&self, path: &Path, out_path: &Path) -> Result<(), ImageError> {
        let img = image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = self.size;
        let resized = DynamicImage::ImageRgb8(img.to_rgb8()).resize_exact(
            width,
            height,
            FilterType::Triangle,
        );

        resized.save(out_path).map_err(|source| ImageError::Encode {
            path: out_path.to_path_buf(),
            source,
        })
    }

    /// [`try_resize`](Self::try_resize), reporting success as a bool.
    pub fn resize(&self, path: &Path, out_path: &Path) -> bool {
        match self.try_resize(path, out_path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Image resize failed");
                false
            }
        }
    }

    /// Resize every .jpg/.jpeg/.png directly inside `input_dir` into
    /// `output_dir` under the same file name. Returns how many succeeded.
    pub fn batch_resize(&self, input_dir: &Path, output_dir: &Path) -> usize {
        if let Err(source) = std::fs::create_dir_all(output_dir) {
            let e = ImageError::Io {
                path: output_dir.to_path_buf(),
                source,
            };
            tracing::warn!(error = %e, "Cannot create resize output directory");
            return 0;
        }

        let files = match list_image_files(input_dir) {
            Ok(files) => files,
            Err(source) => {
                let e = ImageError::Io {
                    path: input_dir.to_path_buf(),
                    source,
                };
                tracing::warn!(error = %e, "Cannot list input images");
                return 0;
            }
        };

        let mut count = 0;
        for file in &files {
            let Some(name) = file.file_name() else {
                continue;
            };
            if self.resize(file, &output_dir.join(name)) {
                count += 1;
            }
        }

        tracing::info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            resized = count,
            found = files.len(),
            "Batch resize finished"
        );
        count
    }

    /// Check that `path` decodes and is at least `min_dimension` on both sides.
    pub fn validate(&self, path: &Path) -> ImageCheck {
        let img = match image::open(path) {
            Ok(img) => img,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Image failed to decode");
                return ImageCheck::CannotRead;
            }
        };

        let (width, height) = img.dimensions();
        if width < self.min_dimension || height < self.min_dimension {
            return ImageCheck::TooSmall { width, height };
        }
        ImageCheck::Valid
    }
}
