use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, T>(&mut *de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })?;
    de.end()?;
    Ok(value)
}

/// One document per non-blank line.
pub fn from_ndjson_with_path<T: DeserializeOwned>(src: &str) -> Result<Vec<T>> {
    src.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            from_str_with_path(line).map_err(|e| anyhow!("line {}: {e}", i + 1))
        })
        .collect()
}
