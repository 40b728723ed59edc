//! Unit tests for session token claims and expiry.

#[cfg(test)]
mod tests {
    use crate::auth::Claims;
    use crate::config::JwtConfig;
    use crate::jwt::{JwtError, JwtService};
    use crate::types::Role;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            token_expiry_secs: 5 * 60 * 60,
        })
    }

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let account_id = Uuid::new_v4();
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::hours(5);

        let claims = Claims::new(account_id, Role::Admin, issued_at, expires_at);

        assert_eq!(claims.sub, account_id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_claims_account_id_returns_sub() {
        let account_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = Claims::new(account_id, Role::Student, now, now + Duration::hours(1));

        assert_eq!(claims.account_id(), account_id);
    }

    #[test]
    fn test_token_older_than_five_hours_is_expired() {
        let service = service("expiry-secret");
        let issued_at = Utc::now() - Duration::hours(5) - Duration::seconds(5);

        let token = service
            .issue_token_at(Uuid::new_v4(), Role::Student, issued_at)
            .unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_token_just_inside_window_is_valid() {
        let service = service("expiry-secret");
        let issued_at = Utc::now() - Duration::hours(4) - Duration::minutes(59);
        let account_id = Uuid::new_v4();

        let token = service
            .issue_token_at(account_id, Role::Admin, issued_at)
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.account_id(), account_id);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = service("secret-one");
        let verifier = service("secret-two");

        let token = issuer.issue_token(Uuid::new_v4(), Role::Admin).unwrap();

        assert!(matches!(
            verifier.validate_token(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = service("tamper-secret");
        let token = service.issue_token(Uuid::new_v4(), Role::Student).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = service
            .issue_token(Uuid::new_v4(), Role::Admin)
            .unwrap()
            .split('.')
            .nth(1)
            .unwrap()
            .to_string();
        parts[1] = &forged_payload;
        let forged = parts.join(".");

        assert!(service.validate_token(&forged).is_err());
    }

    #[test]
    fn test_role_survives_round_trip() {
        let service = service("role-secret");
        for role in [Role::Admin, Role::Student] {
            let token = service.issue_token(Uuid::new_v4(), role).unwrap();
            assert_eq!(service.validate_token(&token).unwrap().role, role);
        }
    }
}
