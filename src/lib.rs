//! Jupiter Theater - Conversational Box-Office Backend
//!
//! This crate implements the backend for a Greek-language theater chatbot:
//! free-text messages are classified into a closed intent set and mined for
//! structured details over a TCP session protocol, with a two-tier LLM
//! fallback behind every model call.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
