pub mod db;
pub mod entities;
pub mod error;
pub mod services;

pub use error::RepositoryError;
