pub mod assess;
pub mod hide;
pub mod unveil;
