//! Email-confirmation support: classifying service rejections that require a
//! verified email, and the best-effort strategy for triggering the
//! confirmation email. The probe walk stays outside the optimizer; callers
//! supply the concrete remote operations.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::RegexSet;

/// Rejection texts that mean "verify the email address first".
static CONFIRMATION_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)email.*not.*verif",
        r"(?i)email.*not.*confirm",
        r"(?i)verify.*email",
        r"(?i)confirm.*email",
        r"(?i)email.*validation.*required",
        r"(?i)please.*confirm.*email",
        r"(?i)unverified.*email",
    ])
    .expect("confirmation patterns are valid")
});

/// True when a service rejection says the email address must be verified
/// before the service will book.
pub fn confirmation_required(message: &str) -> bool {
    CONFIRMATION_PATTERNS.is_match(message)
}

/// Outcome of asking one remote operation to send the confirmation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The operation accepted the request.
    Sent { message: String },
    /// The operation does not exist on this deployment.
    NotSupported,
    /// The operation answered with an error.
    Failed { message: String },
}

/// One candidate remote operation for triggering the confirmation email.
#[async_trait]
pub trait ConfirmationProbe: Send + Sync {
    /// Identifier used in reporting, typically the endpoint URL.
    fn endpoint(&self) -> &str;

    async fn request(&self, email: &str) -> ProbeOutcome;
}

/// Result of walking the probe list.
#[derive(Debug, Clone)]
pub struct ConfirmationOutcome {
    pub success: bool,
    pub message: String,
    pub endpoint: Option<String>,
}

/// Try each probe in order until one sends the email or answers with a
/// definitive error; unsupported operations fall through to the next.
pub async fn request_confirmation(
    probes: &[Box<dyn ConfirmationProbe>],
    email: &str,
) -> ConfirmationOutcome {
    for probe in probes {
        match probe.request(email).await {
            ProbeOutcome::Sent { message } => {
                return ConfirmationOutcome {
                    success: true,
                    message,
                    endpoint: Some(probe.endpoint().to_string()),
                };
            }
            ProbeOutcome::NotSupported => continue,
            ProbeOutcome::Failed { message } => {
                // A "not found" answer means the operation itself is missing;
                // anything else is the right operation reporting a real error.
                if message.to_lowercase().contains("not found") {
                    continue;
                }
                return ConfirmationOutcome {
                    success: false,
                    message,
                    endpoint: Some(probe.endpoint().to_string()),
                };
            }
        }
    }

    ConfirmationOutcome {
        success: false,
        message: "could not find a confirmation operation; the service may have changed"
            .to_string(),
        endpoint: None,
    }
}
