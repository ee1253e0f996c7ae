pub mod basket_service;

pub use basket_service::*;
