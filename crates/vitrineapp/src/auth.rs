//! # OTP Login Flow
//!
//! Sign-in is a three-state machine. Every event is a method; an event that does
//! not apply to the current state returns [`VitrineError::Login`] and leaves the
//! state untouched.
//!
//! ```text
//!                 request_otp                 verify (correct)
//!  EnterContact ──────────────► AwaitingOtp ─────────────────► Verified
//!       ▲  ▲                      │    ▲ │                          │
//!       │  │   change_contact     │    └─┘ resend, verify (wrong)   │
//!       │  └──────────────────────┘                                 │
//!       │        3rd wrong code                                     │
//!       │◄──────────────────────── (from AwaitingOtp)               │
//!       └───────────────────────────────────────────────────────────┘
//!                                sign_out
//! ```
//!
//! Delivering and checking codes is the job of an [`OtpGateway`]; the flow only
//! tracks state and attempts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Result, VitrineError};

pub const CODE_LENGTH: usize = 6;
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Contact {
    Email(String),
    /// Digits only, with a leading `+` if one was given.
    Phone(String),
}

impl Contact {
    pub fn parse(raw: &str) -> Result<Contact> {
        let raw = raw.trim();
        if raw.contains('@') {
            return parse_email(raw);
        }
        parse_phone(raw)
    }
}

fn parse_email(raw: &str) -> Result<Contact> {
    let invalid = || VitrineError::Login(format!("Invalid email address: {}", raw));
    let (local, domain) = raw.split_once('@').ok_or_else(invalid)?;
    let domain_ok = domain
        .split('.')
        .filter(|part| !part.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty()
        || !domain_ok
        || domain.contains('@')
        || raw.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(Contact::Email(raw.to_lowercase()))
}

fn parse_phone(raw: &str) -> Result<Contact> {
    let compact: String = raw.chars().filter(|c| *c != ' ' && *c != '-').collect();
    let (plus, digits) = match compact.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", compact.as_str()),
    };
    if !(10..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(VitrineError::Login(format!(
            "Enter a valid email or a phone number with 10-15 digits: {}",
            raw
        )));
    }
    Ok(Contact::Phone(format!("{}{}", plus, digits)))
}

impl FromStr for Contact {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self> {
        Contact::parse(s)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contact::Email(email) => write!(f, "{}", email),
            Contact::Phone(phone) => write!(f, "{}", phone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpChallenge {
    pub request_id: Uuid,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub contact: Contact,
    pub verified_at: DateTime<Utc>,
}

/// Sends one-time codes and checks them.
pub trait OtpGateway {
    fn send_code(&mut self, contact: &Contact) -> Result<OtpChallenge>;

    /// `Ok(false)` for a wrong code; `Err` only when the check itself failed.
    fn check_code(&mut self, contact: &Contact, challenge: &OtpChallenge, code: &str)
        -> Result<bool>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    EnterContact,
    AwaitingOtp {
        contact: Contact,
        challenge: OtpChallenge,
        attempts: u32,
    },
    Verified {
        session: Session,
    },
}

impl LoginState {
    fn name(&self) -> &'static str {
        match self {
            LoginState::EnterContact => "entering contact",
            LoginState::AwaitingOtp { .. } => "awaiting code",
            LoginState::Verified { .. } => "signed in",
        }
    }
}

pub struct LoginFlow<G: OtpGateway> {
    gateway: G,
    state: LoginState,
}

impl<G: OtpGateway> LoginFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: LoginState::EnterContact,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            LoginState::Verified { session } => Some(session),
            _ => None,
        }
    }

    fn illegal(&self, event: &str) -> VitrineError {
        VitrineError::Login(format!("Cannot {} while {}", event, self.state.name()))
    }

    pub fn request_otp(&mut self, raw_contact: &str) -> Result<&OtpChallenge> {
        if self.state != LoginState::EnterContact {
            return Err(self.illegal("request a code"));
        }
        let contact = Contact::parse(raw_contact)?;
        let challenge = self.gateway.send_code(&contact)?;
        tracing::debug!(request = %challenge.request_id, "otp sent");
        self.state = LoginState::AwaitingOtp {
            contact,
            challenge,
            attempts: 0,
        };
        self.current_challenge()
    }

    /// Sends a fresh code to the same contact and resets the attempt count.
    pub fn resend(&mut self) -> Result<&OtpChallenge> {
        let LoginState::AwaitingOtp { contact, .. } = &self.state else {
            return Err(self.illegal("resend a code"));
        };
        let contact = contact.clone();
        let challenge = self.gateway.send_code(&contact)?;
        tracing::debug!(request = %challenge.request_id, "otp resent");
        self.state = LoginState::AwaitingOtp {
            contact,
            challenge,
            attempts: 0,
        };
        self.current_challenge()
    }

    pub fn verify(&mut self, code: &str) -> Result<&Session> {
        let LoginState::AwaitingOtp {
            contact,
            challenge,
            attempts,
        } = &self.state
        else {
            return Err(self.illegal("verify a code"));
        };

        let code = code.trim();
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(VitrineError::Login(format!(
                "The code must be {} digits",
                CODE_LENGTH
            )));
        }

        if self.gateway.check_code(contact, challenge, code)? {
            let session = Session {
                id: Uuid::new_v4(),
                contact: contact.clone(),
                verified_at: Utc::now(),
            };
            self.state = LoginState::Verified { session };
            return self
                .session()
                .ok_or_else(|| VitrineError::Login("Session was not stored".to_string()));
        }

        let attempts = attempts + 1;
        if attempts >= MAX_ATTEMPTS {
            tracing::warn!(attempts, "too many incorrect codes, restarting login");
            self.state = LoginState::EnterContact;
            return Err(VitrineError::Login(
                "Too many incorrect codes. Please start again".to_string(),
            ));
        }

        if let LoginState::AwaitingOtp { attempts: stored, .. } = &mut self.state {
            *stored = attempts;
        }
        Err(VitrineError::Login(format!(
            "Incorrect code, {} attempt(s) left",
            MAX_ATTEMPTS - attempts
        )))
    }

    pub fn change_contact(&mut self) -> Result<()> {
        if !matches!(self.state, LoginState::AwaitingOtp { .. }) {
            return Err(self.illegal("change contact"));
        }
        self.state = LoginState::EnterContact;
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        if !matches!(self.state, LoginState::Verified { .. }) {
            return Err(self.illegal("sign out"));
        }
        self.state = LoginState::EnterContact;
        Ok(())
    }

    fn current_challenge(&self) -> Result<&OtpChallenge> {
        match &self.state {
            LoginState::AwaitingOtp { challenge, .. } => Ok(challenge),
            _ => Err(VitrineError::Login("No code has been requested".to_string())),
        }
    }
}
