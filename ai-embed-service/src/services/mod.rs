//! Provider services.

pub mod gemini_service;
