//! Interactive explorer for streaming-catalog datasets.
//!
//! The [`data`] layer loads a catalog, filters it and derives chart data;
//! [`presenter`] defines how that data is handed to a renderer; [`app`],
//! [`state`] and [`ui`] are the egui front end and [`cli`] the command line.

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod presenter;
pub mod state;
pub mod ui;
