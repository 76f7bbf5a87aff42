use super::UsageTableError;

pub const DATE_HEADER: &str = "Date ";
pub const VALUE_HEADER: &str = "Value";

/// Exact header match first, then the first header equal after trimming.
/// Headers that could not be read as text are `None` and never match.
pub(super) fn locate(
    headers: &[Option<String>],
    wanted: &'static str,
) -> Result<usize, UsageTableError> {
    let texts = || headers.iter().map(|header| header.as_deref());

    texts()
        .position(|header| header == Some(wanted))
        .or_else(|| {
            let trimmed = wanted.trim();
            texts().position(|header| header.map(str::trim) == Some(trimmed))
        })
        .ok_or(UsageTableError::MissingColumn { header: wanted })
}
