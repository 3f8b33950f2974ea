//! These models represent the provider-agnostic conversation handed to a provider
//!
//! A conversation manager owns the messages and tool registry. Providers never
//! mutate them; they translate them into their own wire format when building a
//! request and translate the response back into a [`ParsedMessage`].
//!
//! [`ParsedMessage`]: crate::models::message::ParsedMessage
pub mod content;
pub mod message;
pub mod role;
pub mod schema;
pub mod tool;
