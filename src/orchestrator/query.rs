use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::QueryError;
use super::manifest::ContractInfo;
use super::observer::Observer;
use crate::client::compute::ComputeClient;

/// How the chain wraps a contract error that it failed to parse as a query response.
pub const QUERY_ERROR_PREFIX: &str =
    "Generic error: Querier system error: Cannot parse response: expected value at line 1 column 1 in: ";

/// Sends a smart query to `contract` and deserializes the answer.
///
/// A string result is the chain's error report and becomes a [`QueryError::Chain`].
pub async fn query<T: Serialize, R: DeserializeOwned>(
    client: &dyn ComputeClient,
    contract: &ContractInfo,
    msg: &T,
    observer: &dyn Observer,
) -> Result<R, QueryError> {
    let msg = serde_json::to_vec(msg).map_err(|e| QueryError::JsonSerialize { source: e })?;
    observer.query_issued(contract, &msg);

    match client.query(contract, msg).await? {
        Value::String(err) => Err(unwrap_query_error(&err)),
        value => serde_json::from_value(value).map_err(|e| QueryError::JsonDeserialize { source: e }),
    }
}

// TODO: match on a structured error code once the querier stops embedding errors in prose.
pub fn unwrap_query_error(err: &str) -> QueryError {
    let msg = err.strip_prefix(QUERY_ERROR_PREFIX).unwrap_or(err);
    QueryError::Chain {
        msg: msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_prefix() {
        let err = unwrap_query_error(
            "Generic error: Querier system error: Cannot parse response: expected value at line 1 column 1 in: unauthorized",
        );
        assert_eq!(err.to_string(), "unauthorized");
    }

    #[test]
    fn keeps_unknown_errors_verbatim() {
        let raw = "query wasm contract failed: contract not found";
        assert_eq!(unwrap_query_error(raw).to_string(), raw);

        // prefix must match from the start
        let raw = format!("error: {QUERY_ERROR_PREFIX}unauthorized");
        assert_eq!(unwrap_query_error(&raw).to_string(), raw);
    }

    #[test]
    fn nested_generic_error() {
        let err = unwrap_query_error(&format!("{QUERY_ERROR_PREFIX}Generic error: unauthorized"));
        assert_eq!(err.to_string(), "Generic error: unauthorized");
    }
}
