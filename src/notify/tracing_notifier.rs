use tracing::{info, warn};

use super::{Notice, NoticeKind, Notifier};

/// Writes notices to the log instead of showing them.
#[derive(Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => warn!(
                event_name = "notify.error",
                event_domain = "notify",
                title = notice.title.as_str(),
                "{}",
                notice.message
            ),
            _ => info!(
                event_name = "notify.message",
                event_domain = "notify",
                title = notice.title.as_str(),
                "{}",
                notice.message
            ),
        }
    }
}
