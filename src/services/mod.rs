pub mod appreciation_service;
pub mod contributor_service;
pub mod filter_service;
pub mod sorter;
pub mod spotlight_service;
pub mod wall_service;
