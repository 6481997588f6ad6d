//! Data models module
//!
//! Defines request and response data structures for the OpenAI-compatible
//! surface and the Bedrock upstream

pub mod bedrock;
pub mod openai;
