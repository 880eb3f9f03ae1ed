//! UI rendering modules.
//!
//! - `control_panel`: left sidebar with acquisition and overlay controls
//! - `plot_view`: central panel with the proton image and EPSI overlay
//! - `theme`: startup style configuration

mod control_panel;
mod plot_view;
pub mod theme;
