//! Client-side checks run before a write is dispatched. A failed check never touches the
//! network; it surfaces as `ClientError::Validation` naming the offending field.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ClientError, Result};
use crate::models::{AnnouncementInput, NewUser};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub fn is_valid_email(s: &str) -> bool { EMAIL_RE.is_match(s) }

/// File attached to a complaint as evidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Evidence {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).map(str::to_string);
        Self { file_name, content_type, bytes }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| "evidence".to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> u64 { self.bytes.len() as u64 }
}

fn guess_content_type(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// New complaint as submitted by a student. `category_id == 0` means none selected.
#[derive(Debug, Clone, Default)]
pub struct ComplaintForm {
    pub category_id: u64,
    pub title: String,
    pub description: String,
    pub evidence: Option<Evidence>,
}

impl ComplaintForm {
    pub fn validate(&self, max_upload_size: u64) -> Result<()> {
        if self.category_id == 0 || self.title.trim().is_empty() || self.description.trim().is_empty() {
            let field = if self.category_id == 0 { "category_id" } else if self.title.trim().is_empty() { "title" } else { "description" };
            return Err(ClientError::validation(field, "Please fill in all required fields"));
        }
        if let Some(ev) = &self.evidence {
            if ev.size() > max_upload_size {
                let mb = max_upload_size as f64 / (1024.0 * 1024.0);
                return Err(ClientError::validation("evidence".to_string(), format!("File size must be less than {}MB", trim_float(mb))));
            }
        }
        Ok(())
    }
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 { format!("{}", v as u64) } else { format!("{:.1}", v) }
}

pub fn validate_new_user(u: &NewUser) -> Result<()> {
    let required = [("username", &u.username), ("email", &u.email), ("name", &u.name), ("password", &u.password)];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(ClientError::validation(*field, "Please fill in all required fields"));
    }
    if u.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::validation("password".to_string(), format!("Password must be at least {} characters", MIN_PASSWORD_LEN)));
    }
    if !is_valid_email(u.email.trim()) {
        return Err(ClientError::validation("email", "Please enter a valid email address"));
    }
    Ok(())
}

pub fn validate_announcement(a: &AnnouncementInput) -> Result<()> {
    if a.title.trim().is_empty() { return Err(ClientError::validation("title", "Please fill in all required fields")); }
    if a.content.trim().is_empty() { return Err(ClientError::validation("content", "Please fill in all required fields")); }
    Ok(())
}
