//! Serving adapter that turns a stored audio object into a Whisper transcript
//! or translation under a managed model-hosting contract.
//!
//! Startup goes through [`application::services::EngineLoader`] once; every
//! invocation then goes through [`application::services::RequestProcessor`].

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
