use serde::{Deserialize, Deserializer};

/// Deserialize a field whose backend value may be an explicit `null`,
/// falling back to `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
