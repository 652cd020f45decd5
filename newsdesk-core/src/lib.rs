//! Newsdesk Core
//!
//! Core types shared by the Newsdesk crates.
//!
//! This crate contains:
//! - Domain types: objects owned by the remote assistant and news services
//!   (assistants, threads, messages, runs, files, articles)
//! - DTOs: request bodies sent to those services

pub mod domain;
pub mod dto;
