pub mod aggregate;
pub mod charts;
pub mod repository;
pub mod service;
