// src/attendance.rs
use anyhow::Result;
use reqwest::Client;
use serde_json::Value;

use crate::types::AttendanceRequest;

const RECORD_PATH: &str = "/api/Attendance/record-online-attendance";

/// Posts one attendance confirmation and returns the raw response body.
/// The portal sometimes answers with non-JSON text, so interpretation is
/// left to [`interpret`].
pub async fn record(
    client: &Client,
    base: &str,
    cookie: &str,
    req: &AttendanceRequest,
) -> Result<String> {
    let res = client
        .post(format!("{base}{RECORD_PATH}"))
        .header("accept", "application/json, text/plain, */*")
        .header("appversion", "v2")
        .header("clienttzofst", "330")
        .header("cookie", cookie)
        .header("User-Agent", "Mozilla/5.0")
        .header("Origin", base)
        .header("Referer", format!("{base}/attendance"))
        .json(req)
        .send()
        .await?;
    Ok(res.text().await?)
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Accepted,
    NotValid,
    /// Parsed JSON but no recognized status code; carries the full body
    /// for manual inspection.
    Other(Value),
    Malformed(String),
}

/// Nested status code at `output.data.code`. Any missing level yields None
/// rather than an error.
pub fn status_code(body: &Value) -> Option<&str> {
    body.get("output")?.get("data")?.get("code")?.as_str()
}

pub fn interpret(body: &str) -> Outcome {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return Outcome::Malformed(e.to_string()),
    };
    match status_code(&parsed) {
        Some("SUCCESS") => Outcome::Accepted,
        Some("ATTENDANCE_NOT_VALID") => Outcome::NotValid,
        _ => Outcome::Other(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_code_is_accepted() {
        let body = r#"{"output":{"data":{"code":"SUCCESS"}}}"#;
        assert_eq!(interpret(body), Outcome::Accepted);
    }

    #[test]
    fn not_valid_code_is_rejected() {
        let body = r#"{"output":{"data":{"code":"ATTENDANCE_NOT_VALID"}}}"#;
        assert_eq!(interpret(body), Outcome::NotValid);
    }

    #[test]
    fn missing_nested_code_falls_through_with_full_body() {
        match interpret(r#"{"foo":"bar"}"#) {
            Outcome::Other(v) => assert_eq!(v, json!({"foo": "bar"})),
            other => panic!("expected Other, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code_falls_through() {
        let body = r#"{"output":{"data":{"code":"SESSION_EXPIRED"}}}"#;
        assert!(matches!(interpret(body), Outcome::Other(_)));
    }

    #[test]
    fn non_json_body_is_malformed_not_a_panic() {
        assert!(matches!(
            interpret("<html>502 Bad Gateway</html>"),
            Outcome::Malformed(_)
        ));
    }

    #[test]
    fn code_of_wrong_type_is_none() {
        let body = json!({"output": {"data": {"code": 42}}});
        assert_eq!(status_code(&body), None);
    }
}
