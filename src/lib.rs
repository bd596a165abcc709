//! Storefront Agent - Intent-Routed Conversational Commerce Assistant
//!
//! This crate routes free-text customer messages to product search, order
//! creation, order status, or informational answering via LLM intent
//! classification with deterministic fallbacks at every stage.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
