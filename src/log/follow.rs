use super::diff::diff;
use super::render::LogRenderer;
use std::borrow::Cow;
use std::future::Future;
use std::io::Write;

/// Decodes a snapshot as UTF-8. A multi-byte character cut off at the very
/// end is left for the next poll instead of being replaced.
/// Invalid bytes elsewhere are replaced as usual.
pub fn decode_snapshot(bytes: &[u8]) -> Cow<'_, str> {
    let held = match bytes.utf8_chunks().last() {
        Some(chunk) if is_truncated(chunk.invalid()) => chunk.invalid().len(),
        _ => 0,
    };
    String::from_utf8_lossy(&bytes[..bytes.len() - held])
}

fn is_truncated(tail: &[u8]) -> bool {
    matches!(std::str::from_utf8(tail), Err(e) if e.error_len().is_none())
}

/// Turns repeated full-log polls into an incremental render, like `tail -f`.
#[derive(Debug, Default)]
pub struct Follower {
    last: String,
}

impl Follower {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls `fetch` and renders whatever was appended since the previous
    /// poll, until a chunk finishes with `stop`.
    ///
    /// `fetch` must return the whole log so far, and is responsible for its
    /// own pacing. An unchanged snapshot is polled again without rendering.
    /// Fetch, framing and rendering errors end the loop.
    pub async fn follow<W, E, F, Fut>(
        &mut self,
        renderer: &mut LogRenderer<W, E>,
        mut fetch: F,
    ) -> anyhow::Result<()>
    where
        W: Write,
        E: Write,
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<Vec<u8>>>,
    {
        loop {
            let bytes = fetch().await?;
            let snapshot = decode_snapshot(&bytes);
            tracing::debug!(bytes = snapshot.len(), seen = self.last.len(), "polled log");

            if snapshot == self.last.as_str() {
                continue;
            }

            let suffix = diff(&self.last, &snapshot)?;
            if renderer.render(suffix)? {
                tracing::debug!("agent finished");
                return Ok(());
            }
            self.last = snapshot.into_owned();
        }
    }
}
