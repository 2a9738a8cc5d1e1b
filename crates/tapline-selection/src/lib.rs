#![forbid(unsafe_code)]

//! Selection: choice modes, checked-item state, and identity reconciliation.
//!
//! # Role in Tapline
//! `tapline-selection` owns which list items are checked. It knows nothing
//! about touch input; the list layer (`tapline-list`) drives it from item
//! clicks and forwards data-set changes to
//! [`SelectionStore::on_data_set_changed`].
//!
//! # Primary responsibilities
//! - **SelectionStore**: per-position and per-identity checked state under a
//!   [`ChoiceMode`].
//! - **Reconciliation**: re-anchoring checked identities after the item
//!   collection is mutated, within a bounded search window.
//! - **Persistence**: [`SelectionPersistState`] records through the
//!   [`Stateful`] trait.

pub mod choice;
pub mod config;
pub mod error;
pub mod persist;
pub mod reconcile;
pub mod source;
pub mod stateful;
pub mod store;

pub use choice::ChoiceMode;
pub use config::{DEFAULT_SEARCH_WINDOW, SelectionConfig};
pub use error::PersistError;
pub use persist::SelectionPersistState;
pub use reconcile::{MovedItem, ReconcileReport};
pub use source::{ItemId, ItemSource, PositionalItems};
pub use stateful::{StateKey, Stateful};
pub use store::{CheckOutcome, SelectionStore};
