//! Reusable exit behavior.

use ss_core::CallbackHandle;

use crate::StateContext;

/// Every callback the agent currently owns.
///
/// Return this from `on_exit` in states that can be left before all of their
/// callbacks have fired.
pub fn cancel_all(ctx: &StateContext<'_>) -> Vec<CallbackHandle> {
    ctx.active_handles().iter().copied().collect()
}
