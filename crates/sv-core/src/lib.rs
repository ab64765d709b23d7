//! # sv-core
//!
//! Core types, rerank view reconciliation, and page state machines for stackview.
//!
//! This crate provides the foundational types shared across all stackview crates:
//! - Entity structs for the question/answer/user API payloads
//! - Response envelopes returned by the backend
//! - The rerank view reconciler (original order vs. AI-reranked order)
//! - Page state machines with explicit fetch-lifecycle transitions
//! - Question previews for result lists
//! - Body rendering with a pluggable code formatter
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod markdown;
pub mod preview;
pub mod rerank;
pub mod responses;
pub mod timestamp;
pub mod view;
