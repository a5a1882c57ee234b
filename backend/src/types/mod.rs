mod environment;
mod error;
mod extractors;

pub use environment::Environment;
pub use error::{AppError, ErrorResponse};
pub use extractors::{
    ImageUpload, UploadedFile, FILE_FIELD, NO_FILE_PART, NO_SELECTED_FILE,
};
