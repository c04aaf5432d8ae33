use super::validate_login;
use super::validate_signup;
use crate::domain::models::ClientError;

#[test]
fn it_accepts_complete_signups() {
    assert!(validate_signup("ada", "a@b.com", "secret1").is_ok());
    assert!(validate_signup("ada", "a@b.com", "sixsix").is_ok());
}

#[test]
fn it_rejects_empty_fields() {
    for (user_name, email, password) in [
        ("", "a@b.com", "secret1"),
        ("ada", "", "secret1"),
        ("ada", "a@b.com", ""),
    ] {
        assert_eq!(
            validate_signup(user_name, email, password),
            Err(ClientError::Validation(
                "Please fill in all fields".to_string()
            ))
        );
    }
}

#[test]
fn it_rejects_short_passwords() {
    let res = validate_signup("ada", "a@b.com", "five5");
    insta::assert_snapshot!(res.unwrap_err().to_string(), @"Password must be at least 6 characters long");
}

#[test]
fn it_rejects_empty_login() {
    assert!(validate_login("", "secret1").is_err());
    assert!(validate_login("a@b.com", "").is_err());
    assert!(validate_login("a@b.com", "x").is_ok());
}
