// Application layer - Use cases over the farm repository
pub mod dashboard_service;
pub mod farm_repository;
pub mod farm_service;
pub mod streaming_service;
