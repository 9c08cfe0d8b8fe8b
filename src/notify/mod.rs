//! User-visible notifications. The gateway only sees the [`Notifier`] trait;
//! a UI shell plugs in the [`ModalStore`], headless runs log through tracing.

mod base;
mod modal_store;
mod tracing_notifier;

pub use base::{Notice, NoticeKind, Notifier};
pub use modal_store::{ModalOptions, ModalStore, ModalView};
pub use tracing_notifier::TracingNotifier;
