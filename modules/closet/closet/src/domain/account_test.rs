#[cfg(test)]
mod tests {
    use super::super::account::{AccountService, PASSWORDS_MISMATCH, RegistrationForm};
    use super::super::error::DomainError;
    use super::super::session::SessionHub;
    use crate::infra::auth::InMemoryAuthProvider;
    use crate::infra::auth::memory::INVALID_CREDENTIALS;
    use secrecy::SecretString;
    use std::sync::Arc;

    fn service() -> (AccountService, Arc<InMemoryAuthProvider>, SessionHub) {
        let auth = Arc::new(InMemoryAuthProvider::new());
        let hub = SessionHub::new();
        (AccountService::new(auth.clone(), hub.clone()), auth, hub)
    }

    fn form(email: &str) -> RegistrationForm {
        RegistrationForm::new("Ann Lee", email, "secret-pw", "secret-pw")
    }

    fn password(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[tokio::test]
    async fn test_register_publishes_session() {
        let (accounts, auth, hub) = service();
        let mut sub = hub.subscribe();

        let session = accounts.register(form("ann@example.com")).await.unwrap();

        assert_eq!(session.email(), "ann@example.com");
        assert_eq!(session.display_name(), Some("Ann Lee"));
        assert_eq!(sub.changed().await, Some(Some(session.clone())));
        assert!(auth.is_signed_in(session.user_id()));
    }

    #[tokio::test]
    async fn test_register_rejects_email_in_use() {
        let (accounts, _auth, hub) = service();
        accounts.register(form("ann@example.com")).await.unwrap();
        hub.publish(None);

        let err = accounts
            .register(form("ANN@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::EmailInUse));
        assert_eq!(err.user_message(), "Email is already in use.");
        assert!(hub.current().is_none());
    }

    #[tokio::test]
    async fn test_register_validates_before_calling_provider() {
        let (accounts, _auth, hub) = service();
        let bad = RegistrationForm::new("Ann", "ann@example.com", "one", "two");

        let err = accounts.register(bad).await.unwrap_err();

        assert_eq!(err.user_message(), PASSWORDS_MISMATCH);
        assert!(hub.current().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let (accounts, auth, hub) = service();
        let registered = accounts.register(form("ann@example.com")).await.unwrap();
        accounts.sign_out().await.unwrap();
        assert!(hub.current().is_none());
        assert!(!auth.is_signed_in(registered.user_id()));

        let session = accounts
            .sign_in("ann@example.com", &password("secret-pw"))
            .await
            .unwrap();
        assert_eq!(session.user_id(), registered.user_id());
        assert_eq!(hub.require().unwrap(), session);
    }

    #[tokio::test]
    async fn test_wrong_password_is_auth_error() {
        let (accounts, _auth, hub) = service();
        accounts.register(form("ann@example.com")).await.unwrap();
        accounts.sign_out().await.unwrap();

        let err = accounts
            .sign_in("ann@example.com", &password("nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Auth { .. }));
        assert_eq!(err.user_message(), INVALID_CREDENTIALS);
        assert!(hub.current().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_when_signed_out_is_noop() {
        let (accounts, _auth, hub) = service();
        accounts.sign_out().await.unwrap();
        assert!(hub.current().is_none());
    }

    #[tokio::test]
    async fn test_username_availability() {
        let (accounts, _auth, _hub) = service();
        accounts.register(form("ann@example.com")).await.unwrap();

        assert!(!accounts.is_username_available("ann lee").await.unwrap());
        assert!(accounts.is_username_available("someone").await.unwrap());
        assert!(matches!(
            accounts.is_username_available("   ").await,
            Err(DomainError::Validation { .. })
        ));
    }
}
