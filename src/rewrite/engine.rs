// src/rewrite/engine.rs
// =============================================================================
// This module is the heart of the tool: turning a user-supplied GitHub link
// into a link that goes through the mirror instead.
//
// How it works:
// 1. Trim the input and make sure it looks URL-shaped at all
// 2. Strip an optional scheme (http:// or https://), a protocol-relative
//    "//", and an optional "www." prefix
// 3. Match what's left against the rule table (most specific host first)
// 4. On a match, glue together: mirror origin + canonical host segment +
//    everything after the matched host, byte-for-byte
//
// The function is PURE: no network, no globals, no panics. Every call either
// returns a fully-formed absolute URL or a typed rejection - nothing in
// between. That's what makes it trivially unit-testable.
//
// Rust concepts used:
// - Enums with data: RewriteResult carries either a URL or a reason
// - Pattern matching: The caller matches on the result
// - String slicing: We never copy the path, just point into the input
// =============================================================================

use serde::{Deserialize, Serialize};

use super::rules::{Origin, RULES};

// Why a rewrite was refused
//
// #[derive(Serialize, Deserialize)] lets us include the reason in --json output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Input is empty or has no host-like token at all
    InvalidFormat,
    /// Input is URL-shaped but not a recognized GitHub-family host
    UnsupportedHost,
}

impl RejectReason {
    /// Human-readable explanation for terminal output
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::InvalidFormat => "Input does not look like a URL",
            RejectReason::UnsupportedHost => {
                "Not a supported GitHub link (expected github.com, \
                 raw.githubusercontent.com, or a gist URL)"
            }
        }
    }
}

// The outcome of one rewrite attempt
//
// Exactly one of the two variants is produced per call - the rewriter
// never throws, never returns a half-built URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RewriteResult {
    /// A fully-formed absolute URL routed through the mirror
    Rewritten { url: String },
    /// The input was refused, with a reason
    Rejected { reason: RejectReason },
}

impl RewriteResult {
    /// Helper to check whether the rewrite succeeded
    pub fn is_rewritten(&self) -> bool {
        matches!(self, RewriteResult::Rewritten { .. })
    }
}

// Rewrites a GitHub-family URL to go through the mirror
//
// Parameters:
//   input: arbitrary user text (a URL, hopefully)
//   origin: the mirror to route through (see rules::Origin)
//
// Returns: RewriteResult - either the rewritten URL or a typed rejection
//
// Examples:
//   "https://github.com/golang/go" + https://mirror.example
//     -> "https://mirror.example/github.com/golang/go"
//   "raw.githubusercontent.com/golang/go/master/README.md"
//     -> "https://mirror.example/raw.githubusercontent.com/golang/go/master/README.md"
pub fn rewrite(input: &str, origin: &Origin) -> RewriteResult {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return RewriteResult::Rejected {
            reason: RejectReason::InvalidFormat,
        };
    }

    let cleaned = strip_prefixes(trimmed);

    // Basic URL-shape check: there must be a host-like token (something
    // containing a dot) before the first '/'. "hello" is not a URL;
    // "gitlab.com/foo" is a URL, just not one we support.
    if !has_host_token(cleaned) {
        return RewriteResult::Rejected {
            reason: RejectReason::InvalidFormat,
        };
    }

    // Host matching is case-insensitive; everything AFTER the host is
    // preserved byte-for-byte (paths, query strings, and fragments are
    // case-sensitive on GitHub's side)
    let lowered = cleaned.to_ascii_lowercase();

    for rule in RULES {
        if lowered.starts_with(rule.host_prefix) {
            // Slice the remainder out of the ORIGINAL cleaned input, not the
            // lowercased copy - the prefix is pure ASCII so its byte length
            // is the same in both
            let remainder = &cleaned[rule.host_prefix.len()..];
            return RewriteResult::Rewritten {
                url: format!("{}{}{}", origin.prefix(), rule.canonical_segment, remainder),
            };
        }
    }

    RewriteResult::Rejected {
        reason: RejectReason::UnsupportedHost,
    }
}

// Strips the parts of the input that don't participate in host matching:
// an "http://" or "https://" scheme, a protocol-relative "//", and a
// leading "www.". All case-insensitive, each stripped at most once.
fn strip_prefixes(input: &str) -> &str {
    let mut rest = input;

    // Scheme first ("https://github.com/..."), then the protocol-relative
    // form ("//github.com/...") - an input has one or the other, not both
    if let Some(stripped) = strip_ascii_prefix(rest, "https://") {
        rest = stripped;
    } else if let Some(stripped) = strip_ascii_prefix(rest, "http://") {
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix("//") {
        rest = stripped;
    }

    if let Some(stripped) = strip_ascii_prefix(rest, "www.") {
        rest = stripped;
    }

    rest
}

// Like str::strip_prefix but ASCII case-insensitive
// ("HTTPS://github.com/x" should strip just like "https://github.com/x")
fn strip_ascii_prefix<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    // Compare as bytes so non-ASCII input can't land us on a bad char
    // boundary; a byte-wise ASCII match guarantees the slice below is valid
    let bytes = input.as_bytes();
    if bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    {
        Some(&input[prefix.len()..])
    } else {
        None
    }
}

// Checks for a discernible host-like token: the part before the first '/'
// must be non-empty and contain at least one dot
fn has_host_token(cleaned: &str) -> bool {
    let host_end = cleaned.find('/').unwrap_or(cleaned.len());
    let host = &cleaned[..host_end];
    !host.is_empty() && host.contains('.')
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return an enum instead of Result?
//    - A rejected input is a normal, expected outcome - not an error
//    - Result is for things going WRONG (network down, file missing)
//    - The enum forces callers to handle both cases explicitly
//
// 2. What does matches! do?
//    - A macro that returns true if a value matches a pattern
//    - Shorthand for a match expression that returns bool
//
// 3. Why slice the original input instead of the lowercased copy?
//    - Lowercasing is only for MATCHING the host
//    - GitHub paths are case-sensitive ("README.md" != "readme.md")
//    - The prefixes are plain ASCII, so byte offsets line up exactly
//
// 4. What is &'a str in strip_ascii_prefix?
//    - A lifetime annotation: the returned slice borrows from `input`
//    - The compiler checks that we never use the slice after input is gone
// -----------------------------------------------------------------------------
