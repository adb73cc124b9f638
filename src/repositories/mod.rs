pub mod building_repository;
pub mod worklist_repository;

pub use building_repository::{BuildingRepository, JsonFileBuildingRepository};
pub use worklist_repository::load_worklist;
