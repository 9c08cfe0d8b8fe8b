use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::debug;

use super::{Notice, NoticeKind, Notifier};

/// Name of the built-in message modal.
pub const BASE_MODAL: &str = "BaseModal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOptions {
    pub closable: bool,
    pub mask_closable: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            closable: true,
            mask_closable: true,
        }
    }
}

/// What the single modal slot currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub component: String,
    pub notice: Option<Notice>,
    pub options: ModalOptions,
}

#[derive(Default)]
struct ModalSlot {
    view: Option<ModalView>,
    confirm: Option<oneshot::Sender<bool>>,
}

/// State of the one modal dialog the UI can show at a time.
/// Opening a new modal replaces the current one; a replaced or closed
/// confirm dialog answers `false`.
#[derive(Default)]
pub struct ModalStore {
    slot: Mutex<ModalSlot>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.slot.lock().expect("modal mutex poisoned").view.is_some()
    }

    pub fn current(&self) -> Option<ModalView> {
        self.slot.lock().expect("modal mutex poisoned").view.clone()
    }

    pub fn open(&self, component: &str, notice: Option<Notice>, options: ModalOptions) {
        let mut slot = self.slot.lock().expect("modal mutex poisoned");
        Self::replace_view(&mut slot, component, notice, options);
    }

    /// Install a new view, answering `false` to any confirm it displaces.
    fn replace_view(
        slot: &mut ModalSlot,
        component: &str,
        notice: Option<Notice>,
        options: ModalOptions,
    ) {
        if let Some(pending) = slot.confirm.take() {
            let _ = pending.send(false);
        }
        debug!("Opening modal '{}'", component);
        slot.view = Some(ModalView {
            component: component.to_string(),
            notice,
            options,
        });
    }

    pub fn close(&self) {
        let mut slot = self.slot.lock().expect("modal mutex poisoned");
        if let Some(pending) = slot.confirm.take() {
            let _ = pending.send(false);
        }
        slot.view = None;
    }

    fn show(&self, kind: NoticeKind, message: &str, title: Option<&str>) {
        let mut notice = Notice::new(kind, message);
        if let Some(title) = title {
            notice = notice.with_title(title);
        }
        self.open(BASE_MODAL, Some(notice), ModalOptions::default());
    }

    pub fn show_alert(&self, message: &str, title: Option<&str>) {
        self.show(NoticeKind::Info, message, title);
    }

    pub fn show_error(&self, message: &str, title: Option<&str>) {
        self.show(NoticeKind::Error, message, title);
    }

    pub fn show_success(&self, message: &str, title: Option<&str>) {
        self.show(NoticeKind::Success, message, title);
    }

    /// Show a confirm dialog that cannot be dismissed by clicking outside.
    /// The receiver yields the user's answer.
    pub fn show_confirm(&self, message: &str, title: Option<&str>) -> oneshot::Receiver<bool> {
        let mut notice = Notice::new(NoticeKind::Confirm, message);
        if let Some(title) = title {
            notice = notice.with_title(title);
        }
        let (tx, rx) = oneshot::channel();
        let mut slot = self.slot.lock().expect("modal mutex poisoned");
        Self::replace_view(
            &mut slot,
            BASE_MODAL,
            Some(notice),
            ModalOptions {
                closable: false,
                mask_closable: false,
            },
        );
        slot.confirm = Some(tx);
        rx
    }

    /// Answer the open confirm dialog and close it.
    pub fn answer(&self, confirmed: bool) {
        let mut slot = self.slot.lock().expect("modal mutex poisoned");
        if let Some(pending) = slot.confirm.take() {
            let _ = pending.send(confirmed);
        }
        slot.view = None;
    }

    pub fn show_custom(&self, component: &str, options: ModalOptions) {
        self.open(component, None, options);
    }
}

impl Notifier for ModalStore {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Confirm => {
                // Nobody listens for the answer of a notification.
                let _ = self.show_confirm(&notice.message, Some(&notice.title));
            }
            _ => self.open(BASE_MODAL, Some(notice), ModalOptions::default()),
        }
    }
}
