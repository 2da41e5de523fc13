//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! A browser over the recorded run history:
//!
//! - **[`app`]** — application state and keyboard event loop
//! - **[`panes`]** — stateless render functions (variable table, series
//!   chart, status bar)
//! - **[`theme`]** — centralized color palette
//!
//! Construct an [`App`] with a finished [`Engine`] and its
//! [`RunSummary`](crate::engine::RunSummary), then call [`App::run`].
//!
//! [`Engine`]: crate::engine::Engine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
