// src/rewrite/rules.rs
// =============================================================================
// This module defines WHERE we can rewrite from and WHAT the output looks like.
//
// Two pieces live here:
// - Origin: the mirror we rewrite towards (protocol + host, parsed once)
// - RULES: the table of GitHub-family hosts we recognize
//
// Why a rule table?
// - The upstream mirror accepts a fixed set of source hosts
// - Each host maps to one canonical path segment in the rewritten URL
// - Keeping them in one table means there is exactly ONE place that decides
//   which hosts are supported (no duplicated if/else chains to drift apart)
//
// Rust concepts used:
// - const arrays: Compile-time tables with zero runtime cost
// - Structs: Grouping the protocol and host of the mirror
// - &'static str: String data baked into the binary
// =============================================================================

use anyhow::{anyhow, Result};
use url::Url;

// One recognized source host and the path segment it becomes in the output.
//
// For github.com and raw.githubusercontent.com the segment is just the host
// itself. The gist family is special: BOTH gist hosts map to the single
// canonical segment "gist.github.com/" (see the note on RULES below).
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    /// Host prefix to match against the cleaned input, including the
    /// trailing slash (e.g. "github.com/")
    pub host_prefix: &'static str,
    /// Path segment emitted after the mirror origin, including the
    /// trailing slash (e.g. "github.com/")
    pub canonical_segment: &'static str,
}

// The rule table, ordered most-specific-first.
//
// Order matters! "gist.github.com/" must be tried before "github.com/"
// because the latter is a suffix of the former - if we tried "github.com/"
// first it would never match anything (the gist host doesn't START with it),
// but keeping longest-first makes the intent obvious and protects us if a
// future rule ever does share a literal prefix.
//
// Canonical gist behavior: both gist.githubusercontent.com and
// gist.github.com inputs rewrite to the "gist.github.com/" segment.
// The mirror's backend matches gist requests by that canonical host, so
// normalizing here means every gist input produces the same output shape.
pub const RULES: &[RewriteRule] = &[
    RewriteRule {
        host_prefix: "gist.githubusercontent.com/",
        canonical_segment: "gist.github.com/",
    },
    RewriteRule {
        host_prefix: "gist.github.com/",
        canonical_segment: "gist.github.com/",
    },
    RewriteRule {
        host_prefix: "raw.githubusercontent.com/",
        canonical_segment: "raw.githubusercontent.com/",
    },
    RewriteRule {
        host_prefix: "github.com/",
        canonical_segment: "github.com/",
    },
];

// The mirror origin we rewrite towards
//
// Every rewritten URL starts with "{protocol}://{host}/". We parse this
// once from the user-supplied base URL instead of re-parsing per rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// URL scheme without the "://" (e.g. "https")
    pub protocol: String,
    /// Host, including the port if one was given (e.g. "mirror.example:8080")
    pub host: String,
}

impl Origin {
    /// Parses a mirror base URL like "https://mirror.example" into its parts.
    ///
    /// Any path, query, or fragment on the base URL is ignored - only the
    /// scheme and authority matter for building rewritten URLs.
    pub fn parse(base: &str) -> Result<Self> {
        let parsed = Url::parse(base.trim())
            .map_err(|e| anyhow!("Invalid mirror origin '{}': {}", base, e))?;

        // file:// and data: URLs have no host - reject them up front
        let host = parsed
            .host_str()
            .ok_or_else(|| anyhow!("Mirror origin has no host: {}", base))?;

        // Keep a non-default port as part of the host, like the browser's
        // window.location.host does
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Origin {
            protocol: parsed.scheme().to_string(),
            host,
        })
    }

    /// Returns the "{protocol}://{host}/" prefix every rewritten URL starts with.
    pub fn prefix(&self) -> String {
        format!("{}://{}/", self.protocol, self.host)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is &'static str?
//    - A string slice that lives for the entire program
//    - String literals in the source code are 'static automatically
//    - Perfect for compile-time tables like RULES
//
// 2. Why const instead of static?
//    - const values are inlined wherever they're used
//    - For a small read-only table, const is the simplest choice
//
// 3. Why derive Copy on RewriteRule?
//    - The struct only holds two references (16 bytes)
//    - Copy lets us pass rules around without borrow bookkeeping
//
// 4. Why does Origin own Strings instead of borrowing?
//    - The origin outlives the base URL string it was parsed from
//    - Owned data means no lifetime parameters on the struct
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_origin() {
        let origin = Origin::parse("https://mirror.example").unwrap();
        assert_eq!(origin.protocol, "https");
        assert_eq!(origin.host, "mirror.example");
        assert_eq!(origin.prefix(), "https://mirror.example/");
    }

    #[test]
    fn test_parse_origin_with_port() {
        let origin = Origin::parse("http://localhost:8080").unwrap();
        assert_eq!(origin.protocol, "http");
        assert_eq!(origin.host, "localhost:8080");
        assert_eq!(origin.prefix(), "http://localhost:8080/");
    }

    #[test]
    fn test_parse_origin_ignores_path() {
        let origin = Origin::parse("https://mirror.example/some/page?x=1").unwrap();
        assert_eq!(origin.prefix(), "https://mirror.example/");
    }

    #[test]
    fn test_parse_origin_rejects_garbage() {
        assert!(Origin::parse("not a url").is_err());
        assert!(Origin::parse("").is_err());
    }

    #[test]
    fn test_rules_are_most_specific_first() {
        // Every later rule must not be a prefix of an earlier one,
        // otherwise the earlier rule would shadow it
        for (i, earlier) in RULES.iter().enumerate() {
            for later in &RULES[i + 1..] {
                assert!(
                    !later.host_prefix.starts_with(earlier.host_prefix),
                    "rule '{}' is shadowed by earlier rule '{}'",
                    later.host_prefix,
                    earlier.host_prefix
                );
            }
        }
    }
}
