use std::cell::Cell;

use adw::prelude::*;
use async_trait::async_trait;
use contactos_gtk::notify::Notifier;

const RESPONSE_ACCEPT: &str = "accept";
const RESPONSE_CANCEL: &str = "cancel";

/// Notifications as libadwaita toasts, confirmations as a modal message dialog.
pub struct ToastNotifier {
    overlay: adw::ToastOverlay,
    parent: adw::ApplicationWindow,
}

impl ToastNotifier {
    pub fn new(overlay: &adw::ToastOverlay, parent: &adw::ApplicationWindow) -> Self {
        Self {
            overlay: overlay.clone(),
            parent: parent.clone(),
        }
    }

    fn toast(&self, message: &str, timeout: u32) {
        let toast = adw::Toast::new(message);
        toast.set_timeout(timeout);
        self.overlay.add_toast(toast);
    }
}

#[async_trait(?Send)]
impl Notifier for ToastNotifier {
    fn notify_success(&self, message: &str) {
        self.toast(message, 3);
    }

    fn notify_error(&self, message: &str) {
        self.toast(message, 5);
    }

    async fn confirm(&self, prompt: &str) -> bool {
        let dialog = adw::MessageDialog::new(Some(&self.parent), Some(prompt), None);
        dialog.add_responses(&[(RESPONSE_CANCEL, "Cancelar"), (RESPONSE_ACCEPT, "Aceptar")]);
        dialog.set_response_appearance(RESPONSE_ACCEPT, adw::ResponseAppearance::Destructive);
        dialog.set_default_response(Some(RESPONSE_CANCEL));
        dialog.set_close_response(RESPONSE_CANCEL);

        let (tx, rx) = tokio::sync::oneshot::channel::<bool>();
        let tx = Cell::new(Some(tx));
        dialog.connect_response(None, move |_, response| {
            if let Some(tx) = tx.take() {
                let _ = tx.send(response == RESPONSE_ACCEPT);
            }
        });
        dialog.present();
        rx.await.unwrap_or(false)
    }
}
