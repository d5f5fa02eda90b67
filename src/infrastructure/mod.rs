// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod dataset_repository;
pub mod dto;
pub mod http_response;
