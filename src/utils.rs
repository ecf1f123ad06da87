use once_cell::sync::Lazy;
use tokio::task::JoinHandle;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Run `fut` on the shared runtime. The handle can be awaited from any
/// executor, including the GTK main loop.
pub fn spawn_on_runtime<F>(fut: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    RUNTIME.spawn(fut)
}

pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_adds_scheme_once() {
        assert_eq!(normalize_url(" api.example.com "), "https://api.example.com");
        assert_eq!(normalize_url("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(normalize_url("   "), "");
    }

    #[tokio::test]
    async fn runtime_handle_is_awaitable_elsewhere() {
        let handle = spawn_on_runtime(async { 2 + 2 });
        assert_eq!(handle.await.unwrap(), 4);
    }
}
