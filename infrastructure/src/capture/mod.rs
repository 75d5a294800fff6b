//! Image acquisition adapters.
//!
//! - [`file::FileImageSource`]: read and validate an image file
//! - [`camera::CameraCapture`]: shell out to a local capture tool
//! - [`fallback::FallbackImageSource`]: camera with graceful degradation

pub mod camera;
pub mod fallback;
pub mod file;
