use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::Result;

/// Decodes a JSON response body into `T`.
///
/// With the `tracing` feature enabled, fields the backend sends that `T` does not
/// know about are logged, and decode failures report the JSON path that failed.
#[cfg(feature = "tracing")]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> Result<T> {
    let mut unknown = Vec::new();
    let deserializer = serde_ignored::Deserializer::new(&value, |path| {
        unknown.push(path.to_string());
    });

    let decoded: std::result::Result<T, _> = serde_path_to_error::deserialize(deserializer);
    match decoded {
        Ok(decoded) => {
            if !unknown.is_empty() {
                tracing::warn!(
                    r#type = std::any::type_name::<T>(),
                    fields = ?unknown,
                    "response contained unknown fields"
                );
            }
            Ok(decoded)
        }
        Err(err) => {
            tracing::warn!(
                r#type = std::any::type_name::<T>(),
                path = %err.path(),
                error = %err.inner(),
                "failed to decode response"
            );
            Err(err.into_inner().into())
        }
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::error::Kind;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Probe {
        wallet_address: String,
    }

    #[test]
    fn ignores_unknown_fields() {
        let probe: Probe =
            deserialize_with_warnings(json!({ "walletAddress": "abc", "extra": 1 })).unwrap();

        assert_eq!(probe.wallet_address, "abc");
    }

    #[test]
    fn decode_failure_is_internal() {
        let err = deserialize_with_warnings::<Probe>(json!({ "walletAddress": 5 })).unwrap_err();

        assert_eq!(err.kind(), Kind::Internal);
    }
}
