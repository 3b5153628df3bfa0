pub mod aggregation_service;
