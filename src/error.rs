//! Error types for glyphswarm.
//!
//! This module provides error types for bitmap production, file loading,
//! and rebuild operations that can fail.

use std::fmt;

/// Errors that can occur while producing or loading a source bitmap.
#[derive(Debug)]
pub enum BitmapError {
    /// Failed to decode an image file.
    ImageLoad(image::ImageError),
    /// Failed to read a file from disk.
    Io(std::io::Error),
    /// The external encoder could not produce a bitmap for the given input.
    Encode(String),
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::ImageLoad(e) => write!(f, "Failed to load image: {}", e),
            BitmapError::Io(e) => write!(f, "Failed to read bitmap file: {}", e),
            BitmapError::Encode(msg) => write!(f, "Failed to encode bitmap: {}", msg),
        }
    }
}

impl std::error::Error for BitmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BitmapError::ImageLoad(e) => Some(e),
            BitmapError::Io(e) => Some(e),
            BitmapError::Encode(_) => None,
        }
    }
}

impl From<image::ImageError> for BitmapError {
    fn from(e: image::ImageError) -> Self {
        BitmapError::ImageLoad(e)
    }
}

impl From<std::io::Error> for BitmapError {
    fn from(e: std::io::Error) -> Self {
        BitmapError::Io(e)
    }
}

/// Errors that can occur when driving a choreography.
#[derive(Debug)]
pub enum ChoreographyError {
    /// Bitmap production failed; the previous particle population is untouched.
    Bitmap(BitmapError),
    /// The choreography was disposed; no further rebuilds are valid.
    Disposed,
}

impl fmt::Display for ChoreographyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoreographyError::Bitmap(e) => write!(f, "Bitmap error: {}", e),
            ChoreographyError::Disposed => {
                write!(f, "Choreography has been disposed; rebuild is no longer valid")
            }
        }
    }
}

impl std::error::Error for ChoreographyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChoreographyError::Bitmap(e) => Some(e),
            ChoreographyError::Disposed => None,
        }
    }
}

impl From<BitmapError> for ChoreographyError {
    fn from(e: BitmapError) -> Self {
        ChoreographyError::Bitmap(e)
    }
}
