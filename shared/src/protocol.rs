use serde_json::Value;

use crate::ExprResult;

#[derive(Debug, PartialEq)]
pub enum ResponseDecodeError {
    /// Body is not JSON at all.
    InvalidJson,
    /// Body parsed but carries no `data` array.
    MissingData,
}

/// Decode a solver response body, keeping every well-formed triple and
/// dropping malformed ones. Returns the triples in response order together
/// with the count of entries that were skipped.
pub fn decode_calculate_response(
    body: &str,
) -> Result<(Vec<ExprResult>, usize), ResponseDecodeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| ResponseDecodeError::InvalidJson)?;
    let items = value
        .get("data")
        .and_then(Value::as_array)
        .ok_or(ResponseDecodeError::MissingData)?;
    let mut triples = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for item in items {
        match serde_json::from_value::<ExprResult>(item.clone()) {
            Ok(triple) => triples.push(triple),
            Err(_) => skipped += 1,
        }
    }
    Ok((triples, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_response_in_order() {
        let body = r#"{"data":[
            {"expr":"x","result":"2","assign":true},
            {"expr":"x + 1","result":"3","assign":false}
        ]}"#;
        let (triples, skipped) = decode_calculate_response(body).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].expr, "x");
        assert!(triples[0].assign);
        assert_eq!(triples[1].result, "3");
        assert!(!triples[1].assign);
    }

    #[test]
    fn skips_malformed_triples_keeps_rest() {
        let body = r#"{"data":[
            {"expr":"a","result":"1","assign":true},
            {"expr":"broken"},
            {"expr":"b","result":2,"assign":false},
            {"expr":"c","result":"3","assign":false}
        ]}"#;
        let (triples, skipped) = decode_calculate_response(body).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(
            triples,
            vec![
                ExprResult {
                    expr: "a".into(),
                    result: "1".into(),
                    assign: true,
                },
                ExprResult {
                    expr: "c".into(),
                    result: "3".into(),
                    assign: false,
                },
            ]
        );
    }

    #[test]
    fn empty_data_is_ok() {
        let (triples, skipped) = decode_calculate_response(r#"{"data":[]}"#).unwrap();
        assert!(triples.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn missing_data_is_an_error() {
        assert_eq!(
            decode_calculate_response(r#"{"status":"ok"}"#),
            Err(ResponseDecodeError::MissingData)
        );
        assert_eq!(
            decode_calculate_response(r#"{"data":"nope"}"#),
            Err(ResponseDecodeError::MissingData)
        );
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert_eq!(
            decode_calculate_response("<html>502</html>"),
            Err(ResponseDecodeError::InvalidJson)
        );
    }
}
