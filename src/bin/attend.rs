// src/bin/attend.rs
//
// One-shot attendance poster. Defaults below came out of a captured browser
// session and expire server-side; override via env, or set
// CAMU_EMAIL/CAMU_PASSWORD to log in for a fresh cookie instead.
use anyhow::{Context, Result};
use camu_tools::attendance::{self, Outcome};
use camu_tools::portal;
use camu_tools::types::AttendanceRequest;

const DEFAULT_COOKIE: &str =
    "connect.sid=s%3AfxqdOtLUAxGWtTTn3hm973NyBZ3AbXQf.vO14QJttu442cjczWy35isRV2ehus4bwPZDCOUSShJM";
const DEFAULT_ATTENDANCE_ID: &str = "6891b2c5c9f44ea403d7d206_6891b3133ad5d54c2e27e050";
const DEFAULT_STU_ID: &str = "668c1a4cb26adcc7e79ec73c";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let base = std::env::var("CAMU_BASE_URL").unwrap_or_else(|_| portal::PORTAL_BASE.into());
    let client = reqwest::Client::new();

    let mut stu_id = std::env::var("CAMU_STU_ID").ok();
    let cookie = match (std::env::var("CAMU_EMAIL"), std::env::var("CAMU_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            let outcome = portal::login(&client, &base, &email, &password).await?;
            if stu_id.is_none() {
                stu_id = portal::login_details(&outcome.body)
                    .and_then(portal::name_and_stu_id)
                    .map(|(_, id)| id);
            }
            outcome
                .session_cookie()
                .context("login returned no session cookie")?
        }
        _ => std::env::var("CAMU_COOKIE").unwrap_or_else(|_| DEFAULT_COOKIE.into()),
    };

    let req = AttendanceRequest {
        attendance_id: std::env::var("CAMU_ATTENDANCE_ID")
            .unwrap_or_else(|_| DEFAULT_ATTENDANCE_ID.into()),
        stu_id: stu_id.unwrap_or_else(|| DEFAULT_STU_ID.into()),
        off_qr_enabled: true,
    };

    let body = attendance::record(&client, &base, &cookie, &req).await?;
    match attendance::interpret(&body) {
        Outcome::Accepted => println!("✅ Attendance request accepted!"),
        Outcome::NotValid => println!("❌ Attendance not valid (expired QR or wrong student)."),
        Outcome::Other(v) => println!("⚠️ Other status: {v}"),
        Outcome::Malformed(e) => {
            println!("Error decoding response: {e}");
            println!("Raw response: {body}");
        }
    }
    Ok(())
}
