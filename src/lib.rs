pub mod api;
pub mod canvas;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;

pub use canvas::{CanvasError, CanvasResource, CanvasSource, HttpCanvasSource, MockCanvasSource};
pub use config::Config;
pub use db::{init_db, Repository, StorageError};
pub use domain::{FieldValue, NewQuizLog, QuizLog, QuizLogError};
pub use error::AppError;
