use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::ServiceError;
use crate::api::models::{ContactInput, ContactRecord};
use crate::api::service::ContactService;

pub const DEFAULT_CONTACTS_PATH: &str = "/api/contacto";

/// REST client for the contact backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub http: HttpClient,
    base_url: String,
    contacts_path: String,
}

impl ApiClient {
    pub fn new(base_url: &Url, contacts_path: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, base_url, contacts_path))
    }

    pub fn with_http(http: HttpClient, base_url: &Url, contacts_path: &str) -> Self {
        let path = contacts_path.trim().trim_end_matches('/');
        let contacts_path = if path.is_empty() {
            DEFAULT_CONTACTS_PATH.to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            contacts_path,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.contacts_path)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Try to reach the backend, first on the contacts collection and then on
    /// the bare base URL. Returns the first HTTP status obtained.
    pub async fn ping(&self) -> Result<u16, ServiceError> {
        let candidates = [self.collection_url(), self.base_url.clone()];
        let http = self.http.clone();
        on_runtime(async move {
            let mut last_err: Option<ServiceError> = None;
            for endpoint in candidates {
                match http.get(&endpoint).send().await {
                    Ok(resp) => return Ok(resp.status().as_u16()),
                    Err(e) => {
                        log::debug!("ping {endpoint} failed: {e}");
                        last_err = Some(e.into());
                    }
                }
            }
            Err(last_err.unwrap_or_else(|| ServiceError::Network("no endpoint reachable".into())))
        })
        .await
    }
}

#[async_trait(?Send)]
impl ContactService for ApiClient {
    async fn fetch_all(&self) -> Result<Vec<ContactRecord>, ServiceError> {
        let req = self.http.get(self.collection_url());
        on_runtime(async move {
            let resp = req.send().await?;
            read_json(resp, "contactos").await
        })
        .await
    }

    async fn create(&self, input: &ContactInput) -> Result<Option<ContactRecord>, ServiceError> {
        let req = self.http.post(self.collection_url()).json(input);
        on_runtime(async move {
            let resp = req.send().await?;
            read_written(resp, "contactos").await
        })
        .await
    }

    async fn update(&self, id: i64, input: &ContactInput) -> Result<Option<ContactRecord>, ServiceError> {
        let req = self.http.put(self.item_url(id)).json(input);
        on_runtime(async move {
            let resp = req.send().await?;
            read_written(resp, &format!("contacto {id}")).await
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let req = self.http.delete(self.item_url(id));
        on_runtime(async move {
            let resp = req.send().await?;
            let status = resp.status();
            if status.is_success() {
                Ok(())
            } else {
                let body = resp.text().await.unwrap_or_default();
                Err(ServiceError::from_status(status, &body, &format!("contacto {id}")))
            }
        })
        .await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response, resource: &str) -> Result<T, ServiceError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ServiceError::from_status(status, &body, resource));
    }
    Ok(resp.json::<T>().await?)
}

// A 2xx means the write happened, whatever the body holds.
async fn read_written(resp: reqwest::Response, resource: &str) -> Result<Option<ContactRecord>, ServiceError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if !status.is_success() {
        return Err(ServiceError::from_status(status, &String::from_utf8_lossy(&body), resource));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice::<ContactRecord>(&body) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            log::debug!("{resource} saved, response body not a record: {e}");
            Ok(None)
        }
    }
}

// reqwest needs the tokio reactor; the UI thread only awaits the join handle.
async fn on_runtime<T, Fut>(fut: Fut) -> Result<T, ServiceError>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T, ServiceError>> + Send + 'static,
{
    crate::utils::spawn_on_runtime(fut)
        .await
        .map_err(|e| ServiceError::Network(format!("request task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn client(base: &str, path: &str) -> ApiClient {
        let url = Url::parse(base).unwrap();
        ApiClient::new(&url, path, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn builds_collection_and_item_urls() {
        let c = client("http://localhost:8080/", "/api/contacto");
        assert_eq!(c.base_url(), "http://localhost:8080");
        assert_eq!(c.collection_url(), "http://localhost:8080/api/contacto");
        assert_eq!(c.item_url(42), "http://localhost:8080/api/contacto/42");
    }

    #[test]
    fn normalizes_contacts_path() {
        assert_eq!(
            client("http://h", "api/mensajes/").collection_url(),
            "http://h/api/mensajes"
        );
        assert_eq!(client("http://h", "  ").collection_url(), "http://h/api/contacto");
    }

    // Answers one request with `response`, after reading it fully.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        format!("http://{addr}")
    }

    fn sample() -> ContactInput {
        ContactInput::new("Ana", "ana@x.com", "Hola")
    }

    #[tokio::test]
    async fn empty_created_response_counts_as_saved() {
        let base = serve_once("HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let c = client(&base, DEFAULT_CONTACTS_PATH);
        assert_eq!(c.create(&sample()).await, Ok(None));
    }

    #[tokio::test]
    async fn no_content_update_counts_as_saved() {
        let base = serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n");
        let c = client(&base, DEFAULT_CONTACTS_PATH);
        assert_eq!(c.update(3, &sample()).await, Ok(None));
    }

    #[tokio::test]
    async fn non_record_body_on_success_counts_as_saved() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 11\r\nConnection: close\r\n\r\n{\"ok\":true}",
        );
        let c = client(&base, DEFAULT_CONTACTS_PATH);
        assert_eq!(c.create(&sample()).await, Ok(None));
    }

    #[tokio::test]
    async fn echoed_record_is_returned() {
        let base = serve_once(
            "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\nContent-Length: 72\r\nConnection: close\r\n\r\n{\"id\":5,\"nombre\":\"Ana\",\"correo\":\"ana@x.com\",\"mensaje\":\"Hola\",\"fecha\":\"\"}",
        );
        let c = client(&base, DEFAULT_CONTACTS_PATH);
        let saved = c.create(&sample()).await.unwrap().unwrap();
        assert_eq!(saved.id, 5);
        assert_eq!(ContactInput::from(&saved), sample());
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let base = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let c = client(&base, DEFAULT_CONTACTS_PATH);
        assert_eq!(c.update(99, &sample()).await, Err(ServiceError::NotFound("contacto 99".into())));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let c = client("http://127.0.0.1:9", DEFAULT_CONTACTS_PATH);
        let err = c.fetch_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::Network(_)), "got {err:?}");
    }
}
