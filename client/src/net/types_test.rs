use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Homeowner).unwrap(), "\"homeowner\"");
    assert_eq!(serde_json::to_string(&Role::Estate).unwrap(), "\"estate\"");
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
}

#[test]
fn role_parse_is_case_insensitive() {
    assert_eq!(Role::parse("Estate"), Some(Role::Estate));
    assert_eq!(Role::parse(" ADMIN "), Some(Role::Admin));
}

#[test]
fn role_parse_rejects_unknown() {
    assert_eq!(Role::parse("security"), None);
    assert_eq!(Role::parse(""), None);
}

// =============================================================
// User
// =============================================================

#[test]
fn user_deserializes_camel_case_and_keeps_extra_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "u-1",
        "role": "homeowner",
        "email": "ada@example.com",
        "firstName": "Ada",
        "estateId": "e-9"
    }))
    .unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.role_kind(), Some(Role::Homeowner));
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(user.extra.get("estateId"), Some(&serde_json::json!("e-9")));
}

#[test]
fn user_profile_fields_tolerate_non_string_values() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": null,
        "role": "homeowner",
        "phone": 2_348_012_345_678_u64,
        "email": {"primary": "ada@example.com"},
        "firstName": true
    }))
    .unwrap();
    assert_eq!(user.id, "");
    assert_eq!(user.role_kind(), Some(Role::Homeowner));
    assert_eq!(user.phone.as_deref(), Some("2348012345678"));
    assert_eq!(user.email, None);
    assert_eq!(user.first_name.as_deref(), Some("true"));
}

#[test]
fn user_with_numeric_phone_survives_storage_round_trip() {
    let user: User = serde_json::from_value(serde_json::json!({"id": 7, "phone": 123})).unwrap();
    let stored = serde_json::to_string(&user).unwrap();
    let reloaded: User = serde_json::from_str(&stored).unwrap();
    assert_eq!(reloaded.id, "7");
    assert_eq!(reloaded.phone.as_deref(), Some("123"));
}

#[test]
fn user_role_kind_none_for_unknown_role() {
    let user = User { role: Some("guard".to_owned()), ..User::default() };
    assert_eq!(user.role_kind(), None);
}

#[test]
fn display_name_prefers_full_name_then_email() {
    let mut user = User {
        first_name: Some("Ada".to_owned()),
        last_name: Some("Obi".to_owned()),
        email: Some("ada@example.com".to_owned()),
        ..User::default()
    };
    assert_eq!(user.display_name(), "Ada Obi");
    user.first_name = None;
    user.last_name = None;
    assert_eq!(user.display_name(), "ada@example.com");
}

// =============================================================
// Request bodies
// =============================================================

#[test]
fn signup_fields_serialize_camel_case() {
    let fields = SignupFields {
        first_name: "Ada".to_owned(),
        last_name: "Obi".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: "+2348000000000".to_owned(),
        password: "hunter22".to_owned(),
        role: Role::Estate,
    };
    let json = serde_json::to_value(&fields).unwrap();
    assert_eq!(json["firstName"], "Ada");
    assert_eq!(json["role"], "estate");
}

#[test]
fn google_auth_request_omits_role_on_sign_in() {
    let body = GoogleAuthRequest { credential: "id-token".to_owned(), role: None };
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("role").is_none());
}

#[test]
fn reset_password_request_uses_new_password_key() {
    let body = ResetPasswordRequest {
        email: "a@b.com".to_owned(),
        otp: "123456".to_owned(),
        new_password: "secret123".to_owned(),
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["newPassword"], "secret123");
}

// =============================================================
// SubscriptionStatus
// =============================================================

#[test]
fn subscription_active_only_for_active_status() {
    let active: SubscriptionStatus = serde_json::from_value(serde_json::json!({"status": "Active"})).unwrap();
    assert!(active.is_active());
    let inactive: SubscriptionStatus = serde_json::from_value(serde_json::json!({"status": "inactive"})).unwrap();
    assert!(!inactive.is_active());
    assert!(!SubscriptionStatus::default().is_active());
}
