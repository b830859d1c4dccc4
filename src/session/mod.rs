/*!
 * Auth session state for clients of the translation service.
 *
 * This module provides:
 * - An explicit session store with ordered subscriber notification
 * - Role resolution on a background task, published as an `AccessState`
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::{RoleDirectory, RoleResolver, SessionStore, Subscription};
pub use models::{AccessState, AuthEvent, Role, Session};
