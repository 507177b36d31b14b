//! DailyWeather - city search TUI for weather, air quality, UV index and traffic
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod indicators;
pub mod logging;
pub mod reducer;
pub mod state;
