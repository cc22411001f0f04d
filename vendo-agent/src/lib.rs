pub mod agent;
pub mod client;
pub mod format;
pub mod gemini;
pub mod intent;

pub use agent::SalesAgent;
pub use client::StorefrontClient;
pub use gemini::GeminiClient;
pub use intent::Intent;
