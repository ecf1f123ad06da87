use std::cell::RefCell;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::error::ServiceError;
use crate::api::models::{ContactInput, ContactRecord};
use crate::api::service::ContactService;
use crate::notify::Notifier;

pub const MSG_CREATED: &str = "Mensaje enviado correctamente";
pub const MSG_UPDATED: &str = "Contacto actualizado correctamente";
pub const MSG_SAVE_FAILED: &str = "Error al guardar el mensaje";

// `x@y` with no whitespace anywhere; not a full address grammar.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+$").expect("valid email pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// How an editor session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Saved,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("El nombre es obligatorio")]
    NameRequired,
    #[error("El correo es obligatorio")]
    EmailRequired,
    #[error("Correo no válido")]
    EmailInvalid,
    #[error("El mensaje es obligatorio")]
    MessageRequired,
}

/// Per-field validation state; `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub message: Option<FieldError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }
}

pub fn validate(input: &ContactInput) -> Result<(), FieldErrors> {
    let errors = FieldErrors {
        name: input.name.is_empty().then_some(FieldError::NameRequired),
        email: if input.email.is_empty() {
            Some(FieldError::EmailRequired)
        } else if !EMAIL_PATTERN.is_match(&input.email) {
            Some(FieldError::EmailInvalid)
        } else {
            None
        },
        message: input.message.is_empty().then_some(FieldError::MessageRequired),
    };
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Debug)]
pub enum SubmitStatus {
    /// Carries the stored record when the backend echoed it.
    Saved(Option<ContactRecord>),
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The backend call failed; the form keeps its values.
    Failed(ServiceError),
}

type CloseCallback = Box<dyn Fn(EditorOutcome)>;

/// Create/edit form for a single contact.
pub struct EditorForm<S, N> {
    service: Rc<S>,
    notifier: Rc<N>,
    mode: EditorMode,
    input: RefCell<ContactInput>,
    errors: RefCell<FieldErrors>,
    on_close: RefCell<Option<CloseCallback>>,
}

impl<S: ContactService, N: Notifier> EditorForm<S, N> {
    pub fn new(service: Rc<S>, notifier: Rc<N>, record: Option<&ContactRecord>) -> Self {
        // id 0 is "not assigned yet": prefill, but create.
        let mode = match record {
            Some(r) if r.id != 0 => EditorMode::Edit(r.id),
            _ => EditorMode::Create,
        };
        let input = record.map(ContactInput::from).unwrap_or_default();
        Self {
            service,
            notifier,
            mode,
            input: RefCell::new(input),
            errors: RefCell::new(FieldErrors::default()),
            on_close: RefCell::new(None),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Agregar mensaje",
            EditorMode::Edit(_) => "Editar mensaje",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Guardar",
            EditorMode::Edit(_) => "Actualizar",
        }
    }

    pub fn input(&self) -> ContactInput {
        self.input.borrow().clone()
    }

    pub fn value(&self, field: Field) -> String {
        let input = self.input.borrow();
        match field {
            Field::Name => input.name.clone(),
            Field::Email => input.email.clone(),
            Field::Message => input.message.clone(),
        }
    }

    pub fn set(&self, field: Field, value: &str) {
        let mut input = self.input.borrow_mut();
        let slot = match field {
            Field::Name => &mut input.name,
            Field::Email => &mut input.email,
            Field::Message => &mut input.message,
        };
        *slot = value.to_string();
    }

    pub fn errors(&self) -> FieldErrors {
        self.errors.borrow().clone()
    }

    /// Register the callback run when the session ends, saved or cancelled.
    pub fn connect_close<F: Fn(EditorOutcome) + 'static>(&self, f: F) {
        *self.on_close.borrow_mut() = Some(Box::new(f));
    }

    pub async fn submit(&self) -> SubmitStatus {
        let input = self.input();
        if let Err(errors) = validate(&input) {
            log::debug!("contact form rejected: {errors:?}");
            *self.errors.borrow_mut() = errors.clone();
            return SubmitStatus::Invalid(errors);
        }
        *self.errors.borrow_mut() = FieldErrors::default();

        let result = match self.mode {
            EditorMode::Edit(id) => self.service.update(id, &input).await,
            EditorMode::Create => self.service.create(&input).await,
        };
        match result {
            Ok(record) => {
                match &record {
                    Some(r) => log::info!("saved contact {} ({:?})", r.id, self.mode),
                    None => log::info!("saved contact ({:?})", self.mode),
                }
                self.notifier.notify_success(match self.mode {
                    EditorMode::Edit(_) => MSG_UPDATED,
                    EditorMode::Create => MSG_CREATED,
                });
                *self.input.borrow_mut() = ContactInput::default();
                self.close(EditorOutcome::Saved);
                SubmitStatus::Saved(record)
            }
            Err(err) => {
                log::warn!("saving contact failed: {err}");
                self.notifier.notify_error(MSG_SAVE_FAILED);
                SubmitStatus::Failed(err)
            }
        }
    }

    pub fn cancel(&self) {
        self.close(EditorOutcome::Cancelled);
    }

    fn close(&self, outcome: EditorOutcome) {
        if let Some(cb) = self.on_close.borrow().as_ref() {
            cb(outcome);
        }
    }
}
