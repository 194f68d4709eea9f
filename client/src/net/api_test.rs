use super::*;

// =============================================================
// Pure helpers
// =============================================================

#[test]
fn bearer_header_formats_token() {
    assert_eq!(bearer_header("abc"), "Bearer abc");
}

#[test]
fn verify_payment_path_encodes_reference() {
    assert_eq!(verify_payment_path("T12345"), "/payment/paystack/verify/T12345");
    assert_eq!(verify_payment_path("ref/1 2"), "/payment/paystack/verify/ref%2F1%202");
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message(502), "request failed: 502");
}

// =============================================================
// interpret_response
// =============================================================

#[test]
fn interpret_response_ok_parses_json() {
    let body = interpret_response(200, true, r#"{"data":{"accessToken":"a"}}"#).unwrap();
    assert_eq!(body["data"]["accessToken"], "a");
}

#[test]
fn interpret_response_ok_empty_body_is_null() {
    assert_eq!(interpret_response(204, true, "").unwrap(), Value::Null);
}

#[test]
fn interpret_response_error_uses_backend_message() {
    let err = interpret_response(401, false, r#"{"message":"Invalid email or password"}"#).unwrap_err();
    assert_eq!(
        err,
        AuthError::Rejected { status: 401, message: "Invalid email or password".to_owned() }
    );
    assert!(err.is_unauthorized());
}

#[test]
fn interpret_response_error_plain_text_body() {
    let err = interpret_response(503, false, "Service Unavailable").unwrap_err();
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[test]
fn interpret_response_error_without_message_falls_back_to_status() {
    let err = interpret_response(500, false, r#"{"ok":false}"#).unwrap_err();
    assert_eq!(err.to_string(), "request failed: 500");
}

// =============================================================
// Outside the browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_api_is_unavailable_without_hydrate() {
    let api = HttpApi::new(ClientConfig::default());
    let creds = Credentials { email: "a@b.com".to_owned(), password: "pw".to_owned() };
    let result = futures::executor::block_on(api.login(&creds));
    assert_eq!(result, Err(AuthError::Unavailable));
}

#[test]
fn google_identity_requires_client_id() {
    let identity = GoogleIdentity::new(&ClientConfig::default());
    let err = futures::executor::block_on(identity.google_credential()).unwrap_err();
    assert!(matches!(err, AuthError::Identity(_)));
}
