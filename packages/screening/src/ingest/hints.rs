//! Best-effort founder hints from merged document text.
//!
//! Lightweight pattern matching only; the extraction stage may override
//! anything found here.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Advisory identity hints recovered from raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FounderHint {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("static regex")
    })
}

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Names stay on one line; \s would run across newlines into the
        // following text.
        Regex::new(r"(?i)(Founder|Co-?founder|CEO)[ \t]*[:\-][ \t]*([A-Z][A-Za-z.' -]{2,60})")
            .expect("static regex")
    })
}

fn company_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(Company|Startup)\s*[:\-]\s*([A-Z0-9][A-Za-z0-9 .'\-&]{2,80})")
            .expect("static regex")
    })
}

/// Scan merged text for founder name, email, and company.
pub fn guess_founder_info(text: &str) -> FounderHint {
    let email = email_re().find(text).map(|m| m.as_str().to_string());
    let name = name_re()
        .captures(text)
        .map(|c| c[2].trim().to_string());
    let company = company_re()
        .captures(text)
        .map(|c| c[2].trim().to_string());
    FounderHint {
        name,
        email,
        company,
    }
}
