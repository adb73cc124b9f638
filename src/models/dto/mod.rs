pub mod generation_dto;
pub mod media_dto;
