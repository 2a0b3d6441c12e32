//! # Sinedash
//!
//! A browser-based demo dashboard: synthetic sine-wave time series rendered
//! as an interactive chart, served by a small web application with reactive
//! controls (sample count, year, cumulative toggle).
//!
//! ## Modules
//!
//! - [`synth`]: synthetic data generation
//! - [`chart`]: declarative chart model consumed by the browser renderer
//! - [`dashboard`]: reactive parameters and chart composition
//! - [`live`]: WebSocket channel pushing recomputed charts to the page
//! - [`app`]: HTTP shell (routes, state, errors, pages)
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sinedash::app::{serve, AppState};
//! use sinedash::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     let state = AppState::new(config)?;
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod live;
pub mod synth;

// Re-export top-level types for convenience
pub use app::{build_router, serve, AppError, AppResult, AppState};

pub use chart::{palette, palette_names, AxisOptions, ChartError, Curve, FigureOptions, Overlay, Palette};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig, ServerConfig};

pub use dashboard::{ParamError, ParamPatch, SineWaveParams, ViewComposer};

pub use live::{
    ws_handler, ClientMessage, RegistryConfig, RegistryError, ServerMessage, SessionId,
    SessionRegistry,
};

pub use synth::{synthetic_year, DailySeries, NoiseSource, SeriesPoint, SynthError};
