//! Accounts Module Tests
//!
//! ## Test Scopes
//! - **AccountService**: Registration uniqueness, hashing, authentication, id lookup.
//! - **SessionSigner**: Token issue/verify, tampering, cookie formatting.
//! - **Protocol**: Credential validation at the boundary.

#[cfg(test)]
mod tests {
    use crate::accounts::protocol::CredentialsRequest;
    use crate::accounts::service::AccountService;
    use crate::accounts::session::{SESSION_COOKIE, SessionSigner, read_cookie};
    use crate::accounts::types::AccountError;
    use crate::error::AppError;
    use crate::storage::{EntryId, MemoryCache};

    use axum::http::{HeaderMap, HeaderValue, header};
    use std::sync::Arc;

    // Lowest cost bcrypt accepts; keeps the tests fast.
    const TEST_COST: u32 = 4;

    fn service() -> Arc<AccountService> {
        AccountService::new(MemoryCache::new(), TEST_COST)
    }

    fn signer() -> Arc<SessionSigner> {
        SessionSigner::new(b"0123456789abcdef0123456789abcdef", false).unwrap()
    }

    // ============================================================
    // ACCOUNT SERVICE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_register_creates_account_with_hashed_password() {
        let accounts = service();

        let account = accounts.register("alice", "secret1").await.unwrap();

        assert_eq!(account.value.name, "alice");
        assert_ne!(account.value.password_hash, "secret1");
        assert!(account.value.password_hash.starts_with("$2"));
        assert_eq!(accounts.account_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_name_conflicts_without_write() {
        let accounts = service();
        accounts.register("alice", "secret1").await.unwrap();

        let result = accounts.register("alice", "other12").await;

        assert!(matches!(result, Err(AccountError::AlreadyExists)));
        assert_eq!(accounts.account_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        let accounts = service();
        accounts.register("alice", "secret1").await.unwrap();

        assert!(accounts.register("Alice", "secret1").await.is_ok());
        assert_eq!(accounts.account_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_authenticate_accepts_correct_password() {
        let accounts = service();
        let registered = accounts.register("alice", "secret1").await.unwrap();

        let account = accounts.authenticate("alice", "secret1").await.unwrap();

        assert_eq!(account.id, registered.id);
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let accounts = service();
        accounts.register("alice", "secret1").await.unwrap();

        let wrong_password = accounts.authenticate("alice", "wrong999").await;
        let unknown_user = accounts.authenticate("mallory", "secret1").await;

        assert!(matches!(wrong_password, Err(AccountError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let accounts = service();
        let alice = accounts.register("alice", "secret1").await.unwrap();
        accounts.register("bob", "secret2").await.unwrap();

        let found = accounts.find_by_id(&alice.id).await.unwrap();
        assert_eq!(found.map(|account| account.value.name), Some("alice".to_string()));

        assert!(accounts.find_by_id(&EntryId::new()).await.unwrap().is_none());
    }

    // ============================================================
    // SESSION SIGNER TESTS
    // ============================================================

    #[test]
    fn test_issued_token_verifies() {
        let signer = signer();
        let id = EntryId::new();

        let token = signer.issue(&id);

        assert!(token.starts_with(id.as_str()));
        assert_eq!(signer.verify(&token), Some(id));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let signer = signer();
        let token = signer.issue(&EntryId::new());
        let (_, signature) = token.rsplit_once('.').unwrap();

        let forged = format!("{}.{}", EntryId::new(), signature);

        assert_eq!(signer.verify(&forged), None);
        assert_eq!(signer.verify("no-signature"), None);
        assert_eq!(signer.verify("abc.!!not-base64!!"), None);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = SessionSigner::new(b"another secret of sufficient size!", false).unwrap();
        let token = other.issue(&EntryId::new());

        assert_eq!(signer().verify(&token), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let id = EntryId::new();

        let plain = signer().session_cookie(&id);
        assert!(plain.starts_with(&format!("{}={}.", SESSION_COOKIE, id)));
        assert!(plain.contains("HttpOnly"));
        assert!(!plain.contains("Secure"));

        let secure = SessionSigner::new(b"0123456789abcdef0123456789abcdef", true).unwrap();
        assert!(secure.session_cookie(&id).ends_with("Secure"));

        let cleared = signer().clear_cookie();
        assert!(cleared.starts_with("sid=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark; sid=abc.def"));
        headers.append(header::COOKIE, HeaderValue::from_static("lang=en"));

        assert_eq!(read_cookie(&headers, "sid"), Some("abc.def"));
        assert_eq!(read_cookie(&headers, "lang"), Some("en"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    // ============================================================
    // PROTOCOL TESTS
    // ============================================================

    fn credentials(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_credentials_validation() {
        assert!(credentials("alice", "secret1").validate().is_ok());
        let longest = "x".repeat(30);
        let too_long = "x".repeat(31);
        assert!(credentials("abc", longest.as_str()).validate().is_ok());

        for (username, password) in [
            ("al", "secret1"),
            ("alice", too_long.as_str()),
            ("al ice", "secret1"),
            ("alice", "pass-word"),
            ("", ""),
        ] {
            assert!(
                matches!(
                    credentials(username, password).validate(),
                    Err(AppError::Validation(_))
                ),
                "{:?}/{:?} should be rejected",
                username,
                password
            );
        }
    }
}
