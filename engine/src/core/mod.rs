//! Core runtime types

pub mod node;
