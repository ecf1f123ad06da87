use async_trait::async_trait;

/// User-facing notification capability handed to the contact components.
#[async_trait(?Send)]
pub trait Notifier {
    fn notify_success(&self, message: &str);

    fn notify_error(&self, message: &str);

    /// Ask the user a yes/no question. Resolves once they answer.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Notifier that only logs and answers every confirmation the same way.
#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    pub confirm_answer: bool,
}

#[async_trait(?Send)]
impl Notifier for LogNotifier {
    fn notify_success(&self, message: &str) {
        log::info!("{message}");
    }

    fn notify_error(&self, message: &str) {
        log::error!("{message}");
    }

    async fn confirm(&self, prompt: &str) -> bool {
        log::info!("{prompt} -> {}", self.confirm_answer);
        self.confirm_answer
    }
}
