//! Zone-file rewriting that defeats reverse-tree walking.
//!
//! For every owner name in an `ip6.arpa` zone, each ancestor gets a
//! wildcard MX record under a random label. Every empty non-terminal then
//! answers NOERROR for *anything*, so NXDOMAIN can no longer be told apart
//! from "has children" and a walker has to expand the full tree.

use std::collections::HashSet;
use tracing::debug;

pub struct ZoneHider {
    secret: String,
    emitted: HashSet<String>,
}

impl ZoneHider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            emitted: HashSet::new(),
        }
    }

    /// A hider using a fresh UUIDv4 as its secret label.
    pub fn with_random_secret() -> Self {
        Self::new(random_uuid_v4())
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Each input line (trailing whitespace removed), followed by the
    /// wildcard records it introduces.
    pub fn scan<I, S>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for line in lines {
            let line = line.as_ref().trim_end();
            out.push(line.to_string());
            out.extend(self.hide_line(line));
        }
        debug!(records = self.emitted.len(), "Zone scan complete");
        out
    }

    /// Wildcard records for every ancestor of the line's owner name that
    /// have not been emitted yet.
    pub fn hide_line(&mut self, line: &str) -> Vec<String> {
        let Some(owner) = owner_name(line) else {
            return Vec::new();
        };

        let labels: Vec<&str> = owner.split('.').collect();
        let mut records = Vec::new();
        for start in 1..=labels.len() {
            let mut parts = Vec::with_capacity(labels.len() - start + 2);
            parts.push(self.secret.as_str());
            parts.push("*");
            parts.extend_from_slice(&labels[start..]);

            let record = format!("{} MX 0 .", parts.join("."));
            if self.emitted.insert(record.clone()) {
                records.push(record);
            }
        }
        records
    }
}

/// Owner token of a record line, if the line starts with one.
///
/// Directives (`$ORIGIN`), comments, `@` and continuation lines that begin
/// with whitespace have no owner of their own.
fn owner_name(line: &str) -> Option<&str> {
    let first = line.chars().next()?;
    if matches!(first, '@' | ';' | '$' | ' ' | '\t') {
        return None;
    }
    let end = line.find([' ', '\t'])?;
    let owner = &line[..end];
    (owner.chars().count() >= 2).then_some(owner)
}

/// Random RFC 4122 version 4 UUID in its hyphenated text form.
fn random_uuid_v4() -> String {
    let mut value = (u128::from(fastrand::u64(..)) << 64) | u128::from(fastrand::u64(..));
    // Version nibble (bits 76..80, first digit of the third group) is 4.
    value = (value & !(0xf << 76)) | (0x4 << 76);
    // Variant bits (62..64, top of the fourth group) are 0b10, so that digit is 8-b.
    value = (value & !(0x3 << 62)) | (0x2 << 62);
    let hex = format!("{:032x}", value);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
