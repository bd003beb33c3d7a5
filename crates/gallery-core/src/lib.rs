//! Incremental loading core for the cat gallery.
//!
//! - `intersection` turns raw visibility samples into qualifying events.
//! - `load_more` gates how often the load callback runs.
//! - `slots` is the placeholder/loaded reconciliation over an immutable sequence.
//! - `cat_api` fetches batches of images from The Cat API.

pub mod cat_api;
pub mod error;
pub mod intersection;
pub mod load_more;
pub mod slots;

pub use error::{GalleryError, Result};
