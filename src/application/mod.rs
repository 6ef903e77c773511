//! Application layer: use cases and ports

pub mod ports;
pub mod process_file;

pub use process_file::{
    has_supported_audio_extension, ProcessFileError, ProcessFileInput, ProcessFileOutput,
    ProcessFileUseCase,
};
