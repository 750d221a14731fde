mod graymap;

use std::path::Path;

pub use graymap::{raster_from_file, raster_from_image, save_raster_to_writer};

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}
