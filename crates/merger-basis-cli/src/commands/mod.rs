pub mod params;
pub mod price;
pub mod qualify;
pub mod valuate;
