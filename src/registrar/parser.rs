// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Regex-over-HTML parsing for the registrar's per-CRN detail page.
//!
//! The page is fragile, hand-authored HTML, not well-formed XML, so this
//! stays deliberately dumb: two named regexes extract exactly six values,
//! or the parser declares not-found / missing-seats. Do not generalize
//! this into an HTML parser; the registrar's markup changes rarely and in
//! small ways, and a full DOM parser buys nothing here.

use crate::error::FetchError;
use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;

/// Matches the first `<th class="ddlabel">…</th>` identity cell.
static IDENTITY_ROW: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"(?is)<th[^>]*class=["']ddlabel["'][^>]*>(.*?)</th>"#)
        .expect("IDENTITY_ROW pattern is a compile-time constant")
});

/// Matches the seats row: a `<SPAN>Seats</SPAN>` label cell followed by
/// three `<td>` cells holding Capacity, Actual, Remaining.
static SEATS_ROW: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"(?is)<span[^>]*>seats</span></th>\s*<td[^>]*>(\d+)</td>\s*<td[^>]*>(\d+)</td>\s*<td[^>]*>(\d+)</td>"#)
        .expect("SEATS_ROW pattern is a compile-time constant")
});

/// A successful parse of the registrar page for one CRN at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub course_name: String,
    pub course_id: String,
    pub course_section: String,
    pub is_open: bool,
    pub seats_remaining: u32,
    pub total_seats: u32,
    pub observed_at: chrono::DateTime<Utc>,
}

/// Extracts an [`Observation`] from the raw HTML of a registrar detail
/// page, or returns [`FetchError::NotFound`] if the identity row is
/// absent — the one condition this parser treats as a hard error rather
/// than degrading the observation.
pub fn parse(html: &str) -> Result<Observation, FetchError> {
    let identity = IDENTITY_ROW.captures(html).ok_or(FetchError::NotFound)?;
    let (course_name, course_id, course_section) = parse_identity(&identity[1]);

    let (is_open, seats_remaining, total_seats) = match SEATS_ROW.captures(html) {
        Some(seats) => {
            let total_seats = seats[1].parse().unwrap_or(0);
            let remaining = seats[3].parse().unwrap_or(0);
            (remaining > 0, remaining, total_seats)
        }
        // Missing seats row: treat as closed, never as open.
        None => (false, 0, 0),
    };

    Ok(Observation {
        course_name,
        course_id,
        course_section,
        is_open,
        seats_remaining,
        total_seats,
        observed_at: Utc::now(),
    })
}

/// Splits the identity cell's inner text on ` - ` with embedded `<br/>`
/// stripped. Index 0 is course_name, index 2 is course_id, index 3 is
/// course_section; fewer than 4 parts falls back to (full text, N/A, N/A).
fn parse_identity(inner: &str) -> (String, String, String) {
    let stripped = inner
        .replace("<br />", "")
        .replace("<br/>", "")
        .replace("<BR>", "")
        .replace("<br>", "");
    let parts: Vec<&str> = stripped.split(" - ").map(str::trim).collect();
    if parts.len() >= 4 {
        (
            parts[0].to_string(),
            parts[2].to_string(),
            parts[3].to_string(),
        )
    } else {
        (stripped.trim().to_string(), "N/A".to_string(), "N/A".to_string())
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
