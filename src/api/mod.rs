pub mod config_dto;
pub mod snapshot_dto;
