use anyhow::Context;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Where a session log is read from. Every fetch returns the whole log as
/// it currently stands.
#[derive(Debug, Clone)]
pub enum LogSource {
    File(PathBuf),
    Stdin,
    #[cfg(feature = "http")]
    Http(HttpSource),
}

#[cfg(feature = "http")]
#[derive(Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    url: reqwest::Url,
    token: Option<String>,
}

// Keeps the token out of debug logs.
#[cfg(feature = "http")]
impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("url", &self.url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(http: reqwest::Client, url: reqwest::Url, token: Option<String>) -> Self {
        Self { http, url, token }
    }

    async fn fetch(&self) -> anyhow::Result<Vec<u8>> {
        let mut req = self.http.get(self.url.clone());
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("failed to fetch log: {}", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("log request failed: HTTP {status}: {text}");
        }

        let body = resp.bytes().await.context("failed to read log response")?;
        Ok(body.to_vec())
    }
}

/// Options used when `LogSource::parse` yields an HTTP source.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub token: Option<String>,
    pub user_agent: Option<String>,
}

impl LogSource {
    /// `-` is stdin, `http://` and `https://` are URLs, anything else a path.
    pub fn parse(arg: &str, opts: &HttpOptions) -> anyhow::Result<Self> {
        if arg == "-" {
            return Ok(Self::Stdin);
        }
        if arg.starts_with("http://") || arg.starts_with("https://") {
            #[cfg(feature = "http")]
            {
                let url = reqwest::Url::parse(arg).with_context(|| format!("invalid log URL: {arg}"))?;
                let user_agent = opts.user_agent.clone().unwrap_or_else(|| {
                    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
                });
                let http = reqwest::Client::builder()
                    .user_agent(user_agent)
                    .build()
                    .context("failed to build HTTP client")?;
                return Ok(Self::Http(HttpSource::new(http, url, opts.token.clone())));
            }
            #[cfg(not(feature = "http"))]
            {
                let _ = opts;
                anyhow::bail!("HTTP log sources are not enabled in this build")
            }
        }
        Ok(Self::File(PathBuf::from(arg)))
    }

    pub fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    pub async fn fetch(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read log: {}", path.display())),
            Self::Stdin => {
                let mut buf = Vec::new();
                tokio::io::stdin()
                    .read_to_end(&mut buf)
                    .await
                    .context("failed to read log from stdin")?;
                Ok(buf)
            }
            #[cfg(feature = "http")]
            Self::Http(src) => src.fetch().await,
        }
    }
}

pub type FetchFuture = Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send>>;

/// Cuts `bytes` after its last newline. A poll can land while the producer
/// is mid-line; the unfinished line is picked up whole by a later poll.
pub fn complete_lines(mut bytes: Vec<u8>) -> Vec<u8> {
    let end = bytes.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    bytes.truncate(end);
    bytes
}

/// Builds a fetch closure for following `source`: the first call fetches
/// immediately, later calls wait `interval` first. Only complete lines are
/// returned.
pub fn poller(source: LogSource, interval: Duration) -> impl FnMut() -> FetchFuture {
    let mut called = false;
    move || {
        let source = source.clone();
        let wait = called;
        called = true;
        Box::pin(async move {
            if wait {
                tokio::time::sleep(interval).await;
            }
            source.fetch().await.map(complete_lines)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_source_kinds() {
        let opts = HttpOptions::default();
        assert!(LogSource::parse("-", &opts).unwrap().is_stdin());
        assert!(matches!(
            LogSource::parse("session.log", &opts).unwrap(),
            LogSource::File(p) if p == PathBuf::from("session.log")
        ));
    }

    #[cfg(feature = "http")]
    #[test]
    fn parses_urls() {
        let opts = HttpOptions {
            token: Some("t".to_string()),
            user_agent: None,
        };
        match LogSource::parse("https://example.com/logs/1", &opts).unwrap() {
            LogSource::Http(src) => {
                assert_eq!(src.url.as_str(), "https://example.com/logs/1");
                assert_eq!(src.token.as_deref(), Some("t"));
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[tokio::test]
    async fn file_source_sees_appends() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data: {{}}").unwrap();
        let source = LogSource::File(file.path().to_path_buf());

        assert_eq!(source.fetch().await.unwrap(), b"data: {}\n");
        writeln!(file, "data: {{\"object\":\"x\"}}").unwrap();
        file.flush().unwrap();
        assert_eq!(source.fetch().await.unwrap(), b"data: {}\ndata: {\"object\":\"x\"}\n");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = LogSource::File(PathBuf::from("/definitely/not/here.log"));
        let err = source.fetch().await.unwrap_err();
        assert!(err.to_string().contains("failed to read log"));
    }

    #[test]
    fn complete_lines_drops_unfinished_tail() {
        assert_eq!(complete_lines(b"data: {}\ndata: {\"ob".to_vec()), b"data: {}\n");
        assert_eq!(complete_lines(b"data: {}\n".to_vec()), b"data: {}\n");
        assert!(complete_lines(b"data: {\"c\":\"\xc3".to_vec()).is_empty());
    }

    #[tokio::test]
    async fn poller_skips_half_written_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "data: {{}}\ndata: {{\"object\"").unwrap();
        let mut fetch = poller(LogSource::File(file.path().to_path_buf()), Duration::from_millis(1));
        assert_eq!(fetch().await.unwrap(), b"data: {}\n");

        writeln!(file, ":\"x\"}}").unwrap();
        assert_eq!(fetch().await.unwrap(), b"data: {}\ndata: {\"object\":\"x\"}\n");
    }

    #[tokio::test(start_paused = true)]
    async fn poller_waits_between_fetches() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut fetch = poller(LogSource::File(file.path().to_path_buf()), Duration::from_secs(5));

        let start = tokio::time::Instant::now();
        fetch().await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(5));
        fetch().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
