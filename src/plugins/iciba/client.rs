use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;
use urlencoding::encode;

use super::error::LookupError;
use crate::session::CancelToken;

pub const DEFAULT_API_URL: &str = "http://www.iciba.com/index.php?a=getWordMean&c=search&list=1";
pub const DEFAULT_PAGE_URL: &str = "http://www.iciba.com/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Performs a single GET request and returns the body.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str, headers: &[(&'static str, String)]) -> Result<String, LookupError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, headers: &[(&'static str, String)]) -> Result<String, LookupError> {
        let mut req = self.client.get(url);
        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }
        let resp = req.send()?.error_for_status()?;
        Ok(resp.text()?)
    }
}

/// Builds and issues `getWordMean` requests.
pub struct IcibaClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    page_url: String,
    user_agent: String,
}

impl IcibaClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_url: impl Into<String>,
        page_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
            page_url: page_url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn request_url(&self, word: &str) -> String {
        format!("{}&word={}", self.api_url, encode(word))
    }

    /// Dictionary page for `word`, used as referer and as the browse target.
    pub fn page_url(&self, word: &str) -> String {
        let base = self.page_url.trim_end_matches('/');
        format!("{base}/{}", encode(word))
    }

    pub fn headers(&self, word: &str) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("User-Agent", self.user_agent.clone()),
            ("DNT", "1".to_string()),
        ];
        if let Some(host) = host_of(&self.api_url) {
            headers.push(("Host", host));
        }
        headers.push(("X-Requested-With", "XMLHttpRequest".to_string()));
        headers.push(("Referer", self.page_url(word)));
        headers
    }

    /// Fetch the raw response for `word`.
    ///
    /// The request runs on a worker thread so that a cancelled query can be
    /// abandoned while the read is still pending. Returns `Ok(None)` in that
    /// case; the worker's eventual result is discarded.
    pub fn fetch(&self, word: &str, cancel: &CancelToken) -> Result<Option<String>, LookupError> {
        let url = self.request_url(word);
        let headers = self.headers(word);
        let transport = self.transport.clone();
        let (tx, rx) = mpsc::channel();

        tracing::debug!(%url, "requesting word meaning");
        thread::Builder::new()
            .name("iciba-fetch".into())
            .spawn(move || {
                let _ = tx.send(transport.get(&url, &headers));
            })
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(res) => return res.map(Some),
                Err(RecvTimeoutError::Timeout) => {
                    if cancel.is_cancelled() {
                        tracing::debug!(word, "abandoning superseded request");
                        return Ok(None);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(LookupError::Transport("request worker exited".into()));
                }
            }
        }
    }
}

fn host_of(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unused;

    impl HttpTransport for Unused {
        fn get(&self, _url: &str, _headers: &[(&'static str, String)]) -> Result<String, LookupError> {
            Err(LookupError::Transport("unused".into()))
        }
    }

    fn client() -> IcibaClient {
        IcibaClient::new(Arc::new(Unused), DEFAULT_API_URL, DEFAULT_PAGE_URL, DEFAULT_USER_AGENT)
    }

    #[test]
    fn request_url_encodes_word() {
        assert_eq!(
            client().request_url("ice cream&co"),
            "http://www.iciba.com/index.php?a=getWordMean&c=search&list=1&word=ice%20cream%26co"
        );
    }

    #[test]
    fn page_url_encodes_word() {
        assert_eq!(client().page_url("a/b"), "http://www.iciba.com/a%2Fb");
    }

    #[test]
    fn browser_like_headers() {
        let headers = client().headers("hello");
        let get = |n: &str| {
            headers
                .iter()
                .find(|(k, _)| *k == n)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("DNT"), Some("1"));
        assert_eq!(get("Host"), Some("www.iciba.com"));
        assert_eq!(get("X-Requested-With"), Some("XMLHttpRequest"));
        assert_eq!(get("Referer"), Some("http://www.iciba.com/hello"));
        assert_eq!(get("User-Agent"), Some(DEFAULT_USER_AGENT));
    }

    #[test]
    fn host_includes_port() {
        assert_eq!(host_of("http://127.0.0.1:8080/index.php?a=b"), Some("127.0.0.1:8080".into()));
        assert_eq!(host_of("not a url"), None);
    }
}
