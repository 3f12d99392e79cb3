pub mod animator;
pub mod config;
pub mod runtime;
pub mod scene;
pub mod telemetry;
pub mod tracker;
pub mod web;
