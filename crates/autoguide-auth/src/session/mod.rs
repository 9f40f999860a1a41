//! Session state backed by durable storage.

pub mod store;

pub use store::{Session, SessionStore};
