use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::store::{MemoryTokenStore, TokenStore};

/// Role claim embedded in the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RoleRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
}

/// User identity decoded from the session token.
///
/// Never stored on its own: it is recomputed from the token on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DecodedUser {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: RoleRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl DecodedUser {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Informational only. Nothing logs the user out when this turns true.
    pub fn is_expired(&self) -> bool {
        self.expires_at().map(|exp| Utc::now() > exp).unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.role.name.eq_ignore_ascii_case("admin")
    }
}

/// Backends issue numeric or string ids; both are kept as strings.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Decode the claims of a session token.
///
/// The signature is not verified and `exp` is not enforced; the backend is
/// the authority on both. Any malformed input yields `None`.
pub fn decode(token: &str) -> Option<DecodedUser> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match jsonwebtoken::decode::<DecodedUser>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!(error = %e, "Session token did not decode");
            None
        }
    }
}

/// Owner of the session token.
///
/// Every write goes through here so subscribers see it. Reads always go to
/// the durable store, so a token cleared elsewhere (a `401` in the HTTP
/// client) is observed on the next read.
///
/// A clear that the durable store refuses still signs the session out: the
/// store is masked until the next successful write.
pub struct SessionStore {
    store: Box<dyn TokenStore>,
    signed_out: AtomicBool,
    tx: watch::Sender<Option<String>>,
}

impl SessionStore {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self::from_boxed(Box::new(store))
    }

    pub fn from_boxed(store: Box<dyn TokenStore>) -> Self {
        let (tx, _rx) = watch::channel(store.get());
        Self {
            store,
            signed_out: AtomicBool::new(false),
            tx,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// The stored token. An empty value counts as no token.
    pub fn token(&self) -> Option<String> {
        if self.signed_out.load(Ordering::Acquire) {
            return None;
        }
        self.store.get().filter(|token| !token.is_empty())
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.write(Some(token))
    }

    pub fn clear(&self) -> Result<()> {
        self.write(None)
    }

    fn write(&self, token: Option<&str>) -> Result<()> {
        let result = self.store.set(token);
        match (&result, token) {
            (Ok(()), _) => self.signed_out.store(false, Ordering::Release),
            (Err(e), None) => {
                warn!(error = %e, "Failed to remove session token, signing out in memory");
                self.signed_out.store(true, Ordering::Release);
            }
            (Err(e), Some(_)) => warn!(error = %e, "Failed to persist session token"),
        }
        self.tx.send_replace(self.token());
        result
    }

    pub fn current_user(&self) -> Option<DecodedUser> {
        self.token().as_deref().and_then(decode)
    }

    /// Presence of a token, decodable or not.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Receive the token after every write.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_claims, sign, FailingTokenStore};
    use serde_json::json;

    #[test]
    fn test_decode_valid_token() {
        let user = decode(&sign(&admin_claims())).expect("token should decode");
        assert_eq!(user.id, "1");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.name, "A");
        assert_eq!(user.role, RoleRef { id: "1".into(), name: "ADMIN".into() });
        assert!(user.is_admin());
    }

    #[test]
    fn test_decode_numeric_ids() {
        let token = sign(&json!({
            "id": 7, "email": "m@b.com", "name": "Mesero",
            "role": {"id": 3, "name": "WAITER"}, "iat": 1_700_000_000
        }));
        let user = decode(&token).unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.role.id, "3");
        assert_eq!(user.issued_at().unwrap().timestamp(), 1_700_000_000);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let mut claims = admin_claims();
        claims["exp"] = json!(1_000);
        let user = decode(&sign(&claims)).expect("expired tokens still decode");
        assert!(user.is_expired());
    }

    #[test]
    fn test_decode_never_fails_loudly() {
        let inputs = [
            "",
            ".",
            "..",
            "validtoken",
            "a.b.c",
            "eyJhbGciOiJIUzI1NiJ9.e30.",
            "\u{0}\u{1}garbage",
            "ñandú.ñandú.ñandú",
        ];
        for input in inputs {
            assert_eq!(decode(input), None, "input {:?}", input);
        }
    }

    #[test]
    fn test_decode_missing_claims() {
        let token = sign(&json!({"id": "1", "email": "a@b.com"}));
        assert_eq!(decode(&token), None);
    }

    #[test]
    fn test_authenticated_by_presence() {
        let session = SessionStore::in_memory();
        assert!(!session.is_authenticated());

        session.set_token("not-a-jwt").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let session = SessionStore::new(MemoryTokenStore::with_token(""));
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_clear_notifies_subscribers() {
        let session = SessionStore::new(MemoryTokenStore::with_token("abc"));
        let mut rx = session.subscribe();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("abc"));

        session.clear().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_refused_clear_still_signs_out() {
        let session = SessionStore::new(FailingTokenStore::with_token("stuck"));
        let mut rx = session.subscribe();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("stuck"));

        assert!(session.clear().is_err());
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.current_user(), None);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[test]
    fn test_refused_write_keeps_signed_out() {
        let session = SessionStore::new(FailingTokenStore::with_token("stuck"));
        let _ = session.clear();

        assert!(session.set_token("fresh").is_err());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_successful_write_lifts_sign_out() {
        let store = FailingTokenStore::with_token("stuck");
        let healed = store.handle();
        let session = SessionStore::new(store);
        let _ = session.clear();
        assert!(!session.is_authenticated());

        healed.set_failing(false);
        session.set_token("fresh").unwrap();
        assert_eq!(session.token().as_deref(), Some("fresh"));
    }
}
