//! Standalone hooks invoked by the editor integration.

pub mod continuation;
