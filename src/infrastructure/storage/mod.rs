//! Storage platform adapters

mod box_api;

pub use box_api::BoxFileStore;
