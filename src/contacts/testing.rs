//! In-memory doubles for the contact components.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::api::error::ServiceError;
use crate::api::models::{ContactInput, ContactRecord};
use crate::api::service::ContactService;
use crate::notify::Notifier;

pub fn record(id: i64, name: &str) -> ContactRecord {
    ContactRecord {
        id,
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        message: format!("hola de {name}"),
        created_at: "2024-03-05T00:00:00Z".to_string(),
    }
}

#[derive(Default)]
pub struct FakeService {
    records: RefCell<Vec<ContactRecord>>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<VecDeque<ServiceError>>,
    fetch_gate: RefCell<Option<oneshot::Receiver<()>>>,
    next_id: Cell<i64>,
}

impl FakeService {
    pub fn with_records(records: Vec<ContactRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            records: RefCell::new(records),
            next_id: Cell::new(next_id),
            ..Self::default()
        }
    }

    /// The next call, of any kind, fails with `err`.
    pub fn fail_next(&self, err: ServiceError) {
        self.failures.borrow_mut().push_back(err);
    }

    /// The next `fetch_all` waits until `gate` fires or is dropped.
    pub fn hold_fetch(&self, gate: oneshot::Receiver<()>) {
        *self.fetch_gate.borrow_mut() = Some(gate);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn set_records(&self, records: Vec<ContactRecord>) {
        *self.records.borrow_mut() = records;
    }

    fn enter(&self, call: String) -> Result<(), ServiceError> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl ContactService for FakeService {
    async fn fetch_all(&self) -> Result<Vec<ContactRecord>, ServiceError> {
        self.enter("fetch_all".into())?;
        let gate = self.fetch_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(self.records.borrow().clone())
    }

    async fn create(&self, input: &ContactInput) -> Result<Option<ContactRecord>, ServiceError> {
        self.enter(format!("create {}", input.name))?;
        self.next_id.set(self.next_id.get() + 1);
        let created = ContactRecord {
            id: self.next_id.get(),
            name: input.name.clone(),
            email: input.email.clone(),
            message: input.message.clone(),
            created_at: "2024-03-05T12:00:00Z".into(),
        };
        self.records.borrow_mut().push(created.clone());
        Ok(Some(created))
    }

    async fn update(&self, id: i64, input: &ContactInput) -> Result<Option<ContactRecord>, ServiceError> {
        self.enter(format!("update {id} {}", input.name))?;
        let mut records = self.records.borrow_mut();
        let existing = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("contacto {id}")))?;
        existing.name = input.name.clone();
        existing.email = input.email.clone();
        existing.message = input.message.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.enter(format!("delete {id}"))?;
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(ServiceError::NotFound(format!("contacto {id}")));
        }
        Ok(())
    }
}

/// Records notifications as `ok: ..` / `err: ..` and answers confirmations
/// with a preset value.
#[derive(Default)]
pub struct FakeNotifier {
    events: RefCell<Vec<String>>,
    prompts: RefCell<Vec<String>>,
    answer: Cell<bool>,
    confirm_gate: RefCell<Option<oneshot::Receiver<bool>>>,
}

impl FakeNotifier {
    pub fn answering(answer: bool) -> Self {
        let notifier = Self::default();
        notifier.answer.set(answer);
        notifier
    }

    /// The next confirmation resolves with whatever `gate` delivers;
    /// a dropped sender counts as "no".
    pub fn hold_confirm(&self, gate: oneshot::Receiver<bool>) {
        *self.confirm_gate.borrow_mut() = Some(gate);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Notifier for FakeNotifier {
    fn notify_success(&self, message: &str) {
        self.events.borrow_mut().push(format!("ok: {message}"));
    }

    fn notify_error(&self, message: &str) {
        self.events.borrow_mut().push(format!("err: {message}"));
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        let gate = self.confirm_gate.borrow_mut().take();
        match gate {
            Some(gate) => gate.await.unwrap_or(false),
            None => self.answer.get(),
        }
    }
}
