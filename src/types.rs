// src/types.rs
use serde::{Deserialize, Serialize};

// Field names follow the portal's wire format, hence the renames.

#[derive(Serialize, Deserialize, Clone)]
pub struct AttendanceRequest {
    #[serde(rename = "attendanceId")]
    pub attendance_id: String,
    #[serde(rename = "StuID")]
    pub stu_id: String,
    #[serde(rename = "offQrCdEnbld")]
    pub off_qr_enabled: bool,
}

#[derive(Deserialize)]
pub struct DecodeRequest {
    #[serde(rename = "imageBase64")]
    pub image_base64: String,
}

#[derive(Serialize)]
pub struct DecodeResponse {
    pub text: String,
}

#[derive(Deserialize)]
pub struct CredentialsReq {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginRes {
    pub name: String,
    #[serde(rename = "stuId")]
    pub stu_id: String,
}

#[derive(Serialize)]
pub struct CookieRes {
    pub cookie: String,
}

#[derive(Deserialize)]
pub struct MarkAttendanceReq {
    #[serde(rename = "stuId")]
    pub stu_id: String,
    #[serde(rename = "attendanceId")]
    pub attendance_id: String,
    pub cookie: String,
}
