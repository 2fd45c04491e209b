//! Core types and definitions for the DEFGRID simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! map paths, the tower and enemy catalog, components, commands,
//! state snapshots, notifications, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod path;
pub mod state;
pub mod types;
