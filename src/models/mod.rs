pub mod appreciation;
pub mod contributor;
pub mod wall;
