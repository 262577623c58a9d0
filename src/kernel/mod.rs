//! Headless keybinding core: the store and its service layer.

pub mod services;
pub mod store;

pub use store::{BindingStore, StoreError, UpdateRequest};
