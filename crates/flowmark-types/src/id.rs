//! State identifiers and their compact token encoding.
//!
//! A [`StateId`] is a plain signed integer. Non-negative ids name ordinary
//! states, negative ids name checkbox-branch states, and zero means "unset".
//!
//! Tokens are the short text form embedded in documents. Ordinary ids are
//! written in base 36 directly; checkbox ids are shifted by
//! [`CHECKBOX_TOKEN_OFFSET`] first so every token is a non-negative base-36
//! string. Ordinary ids must therefore stay below the offset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Added to the magnitude of a checkbox-branch id before base-36 encoding.
pub const CHECKBOX_TOKEN_OFFSET: i64 = 900_000;

const RADIX: u32 = 36;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identity of a single workflow state.
///
/// Equality between states is always by id, never by label or color. The
/// default is [`StateId::UNSET`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(i64);

impl StateId {
    /// The "unset / not yet allocated" id. Never persisted.
    pub const UNSET: StateId = StateId(0);

    /// Sentinel reported for references that cannot be resolved.
    pub const UNKNOWN: StateId = StateId(-999);

    /// Wrap a raw integer id.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` for the reserved zero id.
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if this id names a checkbox-branch state.
    pub const fn is_checkbox(self) -> bool {
        self.0 < 0
    }

    /// Returns `true` if this id can be encoded into a token that decodes
    /// back to the same id.
    pub const fn is_encodable(self) -> bool {
        self.0 < CHECKBOX_TOKEN_OFFSET
    }

    /// The negated id, used to derive checkbox-branch ids from generated ones.
    pub const fn negated(self) -> Self {
        Self(self.0.wrapping_neg())
    }

    /// Encode this id as a base-36 token.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowmark_types::StateId;
    ///
    /// assert_eq!(StateId::new(35).to_token(), "z");
    /// assert_eq!(StateId::new(-1).to_token(), "jag1");
    /// ```
    pub fn to_token(self) -> String {
        let shifted = if self.0 < 0 {
            CHECKBOX_TOKEN_OFFSET as u64 + self.0.unsigned_abs()
        } else {
            self.0 as u64
        };
        to_base36(shifted)
    }

    /// Strictly parse a token produced by [`to_token`](Self::to_token).
    ///
    /// Tokens are case-insensitive. Anything other than a non-empty run of
    /// ASCII alphanumerics is rejected.
    pub fn parse_token(token: &str) -> Result<Self, TypeError> {
        let trimmed = token.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(TypeError::InvalidToken(token.to_string()));
        }
        let value = u64::from_str_radix(&trimmed.to_ascii_lowercase(), RADIX)
            .map_err(|_| TypeError::TokenOutOfRange(token.to_string()))?;

        let offset = CHECKBOX_TOKEN_OFFSET as u64;
        if value >= offset {
            let magnitude = value - offset;
            let raw = 0i64
                .checked_sub_unsigned(magnitude)
                .ok_or_else(|| TypeError::TokenOutOfRange(token.to_string()))?;
            Ok(Self(raw))
        } else {
            Ok(Self(value as i64))
        }
    }

    /// Decode a token, degrading to [`StateId::UNKNOWN`] when it cannot be
    /// parsed. Never fails; callers treat the sentinel as "not found".
    pub fn from_token(token: &str) -> Self {
        Self::parse_token(token).unwrap_or(Self::UNKNOWN)
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(13);
    while value > 0 {
        buf.push(DIGITS[(value % RADIX as u64) as usize]);
        value /= RADIX as u64;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({})", self.0)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for StateId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}
