//! The `Action` trait — what a scheduled callback asks its agent to do.

use std::fmt;

/// Payload carried by a scheduled callback and delivered to the target
/// agent's current state when it fires.
///
/// Applications implement this on a closed enum of their own actions:
///
/// ```rust
/// use ss_schedule::Action;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Commute { EndActivity, Arrive }
///
/// impl Action for Commute {
///     fn name(&self) -> &str {
///         match self {
///             Commute::EndActivity => "EndActivity",
///             Commute::Arrive      => "Arrive",
///         }
///     }
/// }
/// ```
///
/// `name` is only used for logs and reports; dispatch matches on the value.
pub trait Action: Clone + fmt::Debug + 'static {
    fn name(&self) -> &str;
}
