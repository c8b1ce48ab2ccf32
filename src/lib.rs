pub mod config;
pub mod doc_processor;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod relay;
pub mod server;
pub mod store;

pub use config::Config;
pub use server::{build_router, serve};
