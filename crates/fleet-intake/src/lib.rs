//! Classification and validation pipeline for maritime certificate intake.
//!
//! OCR/LLM extraction, persistence and file storage live outside this crate and are
//! reached through the collaborator traits in [`workflows::certificates::repository`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
