use anyhow::bail;

/// Returns the part of `current` that was not present in `previous`, with
/// surrounding whitespace trimmed.
///
/// Snapshots are append-only: `current` must begin with `previous`. A
/// snapshot that shrank or was rewritten is reported as an error instead of
/// being sliced at an arbitrary offset.
pub fn diff<'a>(previous: &str, current: &'a str) -> anyhow::Result<&'a str> {
    let Some(suffix) = current.strip_prefix(previous) else {
        bail!(
            "log snapshot is not an extension of the previous one ({} bytes before, {} bytes now)",
            previous.len(),
            current.len()
        );
    };
    Ok(suffix.trim())
}
