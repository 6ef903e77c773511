//! BoxVideoSkill - Box Skills webhook service for video/audio transcription
//!
//! This crate receives Box Skills webhook notifications, downloads the
//! uploaded file, extracts its audio track, transcribes it with OpenAI
//! Whisper, optionally summarizes it and extracts keywords, and writes the
//! results back to Box as Skills metadata cards.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: The Skills card model, builder, and validator, plus
//!   transcript, token, and configuration value objects
//! - **Application**: The file-processing use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Box API, ffmpeg, Whisper, OpenAI, config)
//! - **Server**: Axum webhook receiver and health endpoint
//! - **CLI**: Command-line interface and the config subcommand

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
