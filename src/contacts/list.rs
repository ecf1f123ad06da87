use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::error::ServiceError;
use crate::api::models::ContactRecord;
use crate::api::service::ContactService;
use crate::contacts::editor::{EditorForm, EditorOutcome};
use crate::notify::Notifier;

pub const MSG_LOAD_FAILED: &str = "Error al cargar los contactos.";
pub const MSG_DELETED: &str = "Contacto eliminado exitosamente.";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar el contacto.";
pub const PROMPT_DELETE: &str = "¿Está seguro de eliminar?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    EditorOpen,
    ConfirmingDelete,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteStatus {
    Declined,
    Deleted,
    Failed(ServiceError),
}

type RecordsObserver = Box<dyn Fn(&[ContactRecord])>;

/// Holds the contact list and drives create, edit and delete.
///
/// The list is only ever replaced by a successful fetch. Every method takes
/// `&self` and no `RefCell` borrow is held across an await, so the view can
/// be shared through an `Rc` on the UI thread while requests are pending.
pub struct ListView<S, N> {
    service: Rc<S>,
    notifier: Rc<N>,
    records: RefCell<Vec<ContactRecord>>,
    selected: RefCell<Option<ContactRecord>>,
    editor_open: Cell<bool>,
    confirming: Cell<bool>,
    loads_in_flight: Cell<u32>,
    reload_on_cancel: bool,
    observer: RefCell<Option<RecordsObserver>>,
}

// Keeps the in-flight counter right even if a load future is dropped.
struct InFlight<'a>(&'a Cell<u32>);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a Cell<u32>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

// Clears the confirmation flag when the dialog is answered or abandoned.
struct Confirming<'a>(&'a Cell<bool>);

impl<'a> Confirming<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for Confirming<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<S: ContactService, N: Notifier> ListView<S, N> {
    pub fn new(service: Rc<S>, notifier: Rc<N>) -> Self {
        Self {
            service,
            notifier,
            records: RefCell::new(Vec::new()),
            selected: RefCell::new(None),
            editor_open: Cell::new(false),
            confirming: Cell::new(false),
            loads_in_flight: Cell::new(0),
            reload_on_cancel: true,
            observer: RefCell::new(None),
        }
    }

    pub fn with_reload_on_cancel(mut self, reload: bool) -> Self {
        self.reload_on_cancel = reload;
        self
    }

    pub fn records(&self) -> Vec<ContactRecord> {
        self.records.borrow().clone()
    }

    pub fn selected(&self) -> Option<ContactRecord> {
        self.selected.borrow().clone()
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open.get()
    }

    pub fn phase(&self) -> ListPhase {
        if self.confirming.get() {
            ListPhase::ConfirmingDelete
        } else if self.editor_open.get() {
            ListPhase::EditorOpen
        } else if self.loads_in_flight.get() > 0 {
            ListPhase::Loading
        } else {
            ListPhase::Idle
        }
    }

    /// Called with the new records after every successful load.
    pub fn connect_records_changed<F: Fn(&[ContactRecord]) + 'static>(&self, f: F) {
        *self.observer.borrow_mut() = Some(Box::new(f));
    }

    /// Replace the list with the backend's current record set. On failure the
    /// list is left as it was and the user is notified.
    pub async fn load(&self) -> Result<(), ServiceError> {
        let result = {
            let _guard = InFlight::enter(&self.loads_in_flight);
            self.service.fetch_all().await
        };
        match result {
            Ok(records) => {
                log::debug!("loaded {} contacts", records.len());
                *self.records.borrow_mut() = records;
                if let Some(observer) = self.observer.borrow().as_ref() {
                    observer(&self.records.borrow());
                }
                Ok(())
            }
            Err(err) => {
                log::error!("loading contacts failed: {err}");
                self.notifier.notify_error(MSG_LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Open the editor on `record`, or on an empty form when `None`.
    pub fn open_editor(&self, record: Option<ContactRecord>) -> EditorForm<S, N> {
        let form = EditorForm::new(self.service.clone(), self.notifier.clone(), record.as_ref());
        *self.selected.borrow_mut() = record;
        self.editor_open.set(true);
        form
    }

    pub async fn close_editor(&self, outcome: EditorOutcome) {
        self.editor_open.set(false);
        *self.selected.borrow_mut() = None;
        if outcome == EditorOutcome::Saved || self.reload_on_cancel {
            // failures are already reported by load
            let _ = self.load().await;
        }
    }

    /// Ask for confirmation, then delete `id` once. Reloads only on success.
    pub async fn request_delete(&self, id: i64) -> DeleteStatus {
        let confirmed = {
            let _guard = Confirming::enter(&self.confirming);
            self.notifier.confirm(PROMPT_DELETE).await
        };
        if !confirmed {
            return DeleteStatus::Declined;
        }

        match self.service.delete(id).await {
            Ok(()) => {
                log::info!("deleted contact {id}");
                self.notifier.notify_success(MSG_DELETED);
                let _ = self.load().await;
                DeleteStatus::Deleted
            }
            Err(err) => {
                log::error!("deleting contact {id} failed: {err}");
                self.notifier.notify_error(MSG_DELETE_FAILED);
                DeleteStatus::Failed(err)
            }
        }
    }
}
