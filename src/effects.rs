use crate::client::CatalogClient;
use crate::messages::{AppEvent, Effect};
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;

/// Carries out effects: network work runs on tokio tasks and reports back
/// through the event channel; external opens spawn the system browser.
#[derive(Clone)]
pub struct EffectRunner {
    client: CatalogClient,
    tx: Sender<AppEvent>,
    open_command: Option<String>,
}

impl EffectRunner {
    pub fn new(client: CatalogClient, tx: Sender<AppEvent>, open_command: Option<String>) -> Self {
        Self {
            client,
            tx,
            open_command,
        }
    }

    /// Start `effect`. Returns immediately; results arrive as events.
    pub fn run(&self, effect: Effect) -> Option<tokio::task::JoinHandle<()>> {
        match effect {
            Effect::FetchPage { url, push } => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                Some(tokio::spawn(async move {
                    let result = client.fetch_page(&url).await;
                    // Receiver gone means we are shutting down
                    let _ = tx.send(AppEvent::PageLoaded { url, push, result });
                }))
            }
            Effect::Search(request) => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                Some(tokio::spawn(async move {
                    let result = client.search(&request.query).await;
                    let _ = tx.send(AppEvent::SearchFinished {
                        generation: request.generation,
                        query: request.query,
                        result,
                    });
                }))
            }
            Effect::OpenExternal(url) => {
                self.open_external(&url);
                None
            }
        }
    }

    fn open_external(&self, url: &str) {
        let program = self.open_command.as_deref().unwrap_or(default_opener());
        match Command::new(program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(_) => tracing::info!(%url, program, "opened externally"),
            Err(e) => tracing::warn!(%url, program, error = %e, "could not open externally"),
        }
    }
}

fn default_opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::EventChannel;
    use crate::search::SearchRequest;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn json_server(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while let Ok(n) = socket.read(&mut buf).await {
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_search_effect_reports_generation() {
        let base = json_server(r#"[{"name":"Fern"}]"#).await;
        let channel = EventChannel::new();
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = CatalogClient::with_http(http, &base, "/api/search").unwrap();
        let runner = EffectRunner::new(client, channel.tx.clone(), None);

        let handle = runner
            .run(Effect::Search(SearchRequest {
                generation: 7,
                query: "fern".to_string(),
            }))
            .unwrap();
        handle.await.unwrap();

        let events = channel.drain();
        assert_eq!(events.len(), 1);
        match &events[0] {
            AppEvent::SearchFinished {
                generation,
                query,
                result,
            } => {
                assert_eq!(*generation, 7);
                assert_eq!(query, "fern");
                assert_eq!(result.as_ref().unwrap()[0].name.as_deref(), Some("Fern"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_external_does_not_spawn_task() {
        let channel = EventChannel::new();
        let client = CatalogClient::new("http://plants.test/", "/api/search", None).unwrap();
        let runner = EffectRunner::new(client, channel.tx.clone(), Some("true".to_string()));
        assert!(runner.run(Effect::OpenExternal("http://plants.test/".to_string())).is_none());
        assert!(channel.drain().is_empty());
    }
}
