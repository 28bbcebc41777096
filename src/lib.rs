pub mod aggregator;
pub mod app;
pub mod bucket;
pub mod catalog;
pub mod closing;
pub mod config;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod menu;
pub mod models;
pub mod remote;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use store::LedgerStore;
