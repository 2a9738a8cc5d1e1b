#![forbid(unsafe_code)]

//! List: item hit testing, click dispatch, and touch-driven selection.
//!
//! # Role in Tapline
//! `tapline-list` sits between the gesture recognizer (`tapline-core`) and
//! the selection store (`tapline-selection`). The host implements
//! [`ListHost`] and feeds frames into a [`ListInteraction`].
//!
//! # Primary responsibilities
//! - **ItemHitTester**: touch position → item, through the host.
//! - **ClickDispatcher**: gesture events → item click / long click, plus
//!   pressed feedback.
//! - **ListInteraction**: the full pipeline, including selection toggling,
//!   "all selected" notifications and checked visuals.

pub mod click;
pub mod host;
pub mod interaction;

pub use click::{ClickDispatcher, Dispatch};
pub use hit_test::ItemHitTester;
pub use host::{ItemClickListener, ItemTarget, ListHost};
pub use interaction::ListInteraction;
