pub mod engine;
pub mod message;
pub mod registry;

pub use engine::BroadcastHub;
pub use registry::ConnectionRegistry;

#[cfg(test)]
mod tests;
