//! Test fixtures for park-planner.
//!
//! Provides the Tunisian national park catalog as realistic test data.

#![allow(dead_code)]

pub mod tunisia_parks;

pub use tunisia_parks::*;
