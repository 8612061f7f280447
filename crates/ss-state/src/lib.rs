//! `ss-state` — state listeners and the registry that maps states to them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`listener`] | `StateListener` trait, `ScheduledCallback`, `Reaction`          |
//! | [`context`]  | `StateContext<'a>` — read-only view handed to every hook        |
//! | [`registry`] | `ListenerRegistry` — `StateId → Box<dyn StateListener>`         |
//! | [`terminal`] | `TerminalState` — schedules nothing, ignores every action       |
//! | [`exit`]     | `cancel_all` — reusable "cancel everything I own" exit behavior |
//! | [`error`]    | `StateError`, `StateResult<T>`                                  |
//!
//! # Design notes
//!
//! Hooks never touch the event queue directly.  `on_enter` returns the
//! callbacks it wants, `on_exit` returns the handles it wants cancelled, and
//! `on_action` returns a [`Reaction`].  `ss-sim` applies all of them inside
//! the transition protocol, which is what keeps an agent's handle set in sync
//! with the queue.

pub mod context;
pub mod error;
pub mod exit;
pub mod listener;
pub mod registry;
pub mod terminal;


pub use context::StateContext;
pub use error::{StateError, StateResult};
pub use exit::cancel_all;
pub use listener::{Reaction, ScheduledCallback, StateListener};
pub use registry::ListenerRegistry;
pub use terminal::TerminalState;
