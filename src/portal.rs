// src/portal.rs
use anyhow::Result;
use reqwest::{header, Client};
use serde_json::{json, Value};

pub const PORTAL_BASE: &str = "https://student.bennetterp.camu.in";

pub struct LoginOutcome {
    pub body: Value,
    /// Raw Set-Cookie values as received; empty when the portal set no
    /// cookie at all.
    pub set_cookie: Vec<String>,
}

impl LoginOutcome {
    /// `connect.sid=<value>` ready for a `cookie` header, if the portal
    /// issued one.
    pub fn session_cookie(&self) -> Option<String> {
        session_cookie(self.set_cookie.iter().map(String::as_str))
    }
}

/// Authenticates against the portal's `/login/validate`. The portal expects
/// browser-looking headers and rejects requests without them.
pub async fn login(
    client: &Client,
    base: &str,
    email: &str,
    password: &str,
) -> Result<LoginOutcome> {
    let res = client
        .post(format!("{base}/login/validate"))
        .header(header::ACCEPT, "application/json, text/plain, */*")
        .header(header::USER_AGENT, "Mozilla/5.0")
        .header(header::ORIGIN, base)
        .header(header::REFERER, format!("{base}/login"))
        .json(&json!({"dtype": "M", "Email": email, "pwd": password}))
        .send()
        .await?;

    let set_cookie = res
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();
    let body = res.json().await?;
    Ok(LoginOutcome { body, set_cookie })
}

/// The `connect.sid` entry among Set-Cookie values, attributes stripped.
pub fn session_cookie<'a>(set_cookie: impl IntoIterator<Item = &'a str>) -> Option<String> {
    set_cookie
        .into_iter()
        .find(|c| c.starts_with("connect.sid="))
        .and_then(|c| c.split(';').next())
        .map(str::to_string)
}

/// `output.data.logindetails` node, if the login body has the expected shape.
pub fn login_details(body: &Value) -> Option<&Value> {
    body.get("output")?.get("data")?.get("logindetails")
}

pub fn name_and_stu_id(details: &Value) -> Option<(String, String)> {
    let name = details.get("Name")?.as_str()?;
    let stu_id = details.get("Student")?.get(0)?.get("StuID")?.as_str()?;
    Some((name.to_string(), stu_id.to_string()))
}
