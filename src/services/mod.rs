pub mod gym_service;
pub mod gym_service_impl;
pub use gym_service::{GymError, GymInput, GymService};
pub use gym_service_impl::DefaultGymService;

pub mod upload;
pub use upload::{ImageUpload, UploadService, secure_filename};

pub mod validation;
pub use validation::FieldError;
