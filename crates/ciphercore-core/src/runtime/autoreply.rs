// crates/ciphercore-core/src/runtime/autoreply.rs
// ============================================================================
// Module: CipherCore Chat Auto-Responder
// Description: Static keyword matcher mapping visitor messages to canned replies.
// Purpose: Provide the consultancy's scripted chat responses without any model.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The auto-responder is a constant rule table scanned in order: the first
//! rule with any keyword contained in the lowercased visitor message wins,
//! and a generic fallback covers everything else. It is a pure function; the
//! API layer decides whether the reply is recorded as a non-visitor chat
//! message (off by default).

// ============================================================================
// SECTION: Reply Rules
// ============================================================================

/// Keyword rule mapping message content to a canned reply.
struct ReplyRule {
    /// Lowercase keywords that trigger the rule.
    keywords: &'static [&'static str],
    /// Reply sent when any keyword matches.
    reply: &'static str,
}

/// Ordered keyword rules; the first match wins.
const REPLY_RULES: &[ReplyRule] = &[
    ReplyRule {
        keywords: &["price", "cost", "pricing"],
        reply: "Our services start from $2,800 for Cloud Security Review. For detailed pricing \
                on specific services like SOC 2 ($3,500), ISO 27001 ($4,800), HIPAA ($3,200), or \
                NIST/CMMC ($5,000), I'd recommend scheduling a free consultation where we can \
                discuss your specific needs.",
    },
    ReplyRule {
        keywords: &["soc 2", "soc2"],
        reply: "Our SOC 2 Readiness assessment prepares your organization for a successful Type \
                I or Type II audit. Starting at $3,500, it includes comprehensive gap analysis, \
                risk assessment, and a 30-day post-assessment support. Would you like to \
                schedule a consultation?",
    },
    ReplyRule {
        keywords: &["iso", "27001"],
        reply: "ISO 27001 certification helps establish a world-class information security \
                management system. Our readiness assessment starts at $4,800 and includes full \
                ISMS gap analysis and certification body liaison assistance.",
    },
    ReplyRule {
        keywords: &["hipaa"],
        reply: "Our HIPAA Compliance Validation ensures your organization meets all requirements \
                for protecting patient health information. Starting at $3,200, we cover Privacy \
                Rule, Security Rule, and Breach Notification Rule assessments.",
    },
    ReplyRule {
        keywords: &["timeline", "how long"],
        reply: "Project timelines vary by service: Cloud Security Review (2-4 weeks), HIPAA (3-5 \
                weeks), SOC 2 (4-6 weeks), ISO 27001 (6-8 weeks), and NIST/CMMC (6-10 weeks). We \
                can discuss your specific timeline during a consultation.",
    },
    ReplyRule {
        keywords: &["contact", "call", "schedule"],
        reply: "You can schedule a free 30-minute consultation by clicking the 'Schedule \
                Consultation' button in the header, or visit our Contact page. We typically \
                respond within 24 hours.",
    },
];

/// Reply used when no keyword rule matches.
pub const FALLBACK_REPLY: &str = "Thank you for your message! A member of our team will review \
                                  this and get back to you shortly. In the meantime, feel free \
                                  to browse our services or schedule a consultation for \
                                  immediate assistance.";

// ============================================================================
// SECTION: Matcher
// ============================================================================

/// Returns the canned reply for a visitor message.
#[must_use]
pub fn reply_for(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    for rule in REPLY_RULES {
        if rule.keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return rule.reply;
        }
    }
    FALLBACK_REPLY
}
