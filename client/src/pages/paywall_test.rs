use super::*;

fn homeowner() -> User {
    User { id: "u-1".to_owned(), role: Some("homeowner".to_owned()), ..User::default() }
}

// =============================================================
// Return path
// =============================================================

#[test]
fn billing_return_path_prefers_preserved_destination() {
    assert_eq!(billing_return_path(Some("/dashboard/estate"), Some(&homeowner())), "/dashboard/estate");
}

#[test]
fn billing_return_path_falls_back_to_landing() {
    assert_eq!(billing_return_path(None, Some(&homeowner())), "/dashboard/homeowner/overview");
    assert_eq!(
        billing_return_path(Some("https://evil.test"), Some(&homeowner())),
        "/dashboard/homeowner/overview"
    );
}

#[test]
fn billing_return_path_never_loops_into_billing() {
    assert_eq!(
        billing_return_path(Some("/billing/paywall?redirect=%2F"), Some(&homeowner())),
        "/dashboard/homeowner/overview"
    );
}

#[test]
fn billing_return_path_without_user_goes_home() {
    assert_eq!(billing_return_path(None, None), "/");
    let unmapped = User { role: Some("guard".to_owned()), ..User::default() };
    assert_eq!(billing_return_path(None, Some(&unmapped)), "/");
}

// =============================================================
// Callback reference
// =============================================================

#[test]
fn callback_reference_prefers_reference_then_trxref() {
    assert_eq!(callback_reference(Some("ref-1".to_owned()), Some("trx-1".to_owned())), Some("ref-1".to_owned()));
    assert_eq!(callback_reference(None, Some(" trx-1 ".to_owned())), Some("trx-1".to_owned()));
    assert_eq!(callback_reference(Some("  ".to_owned()), Some("trx-1".to_owned())), Some("trx-1".to_owned()));
}

#[test]
fn callback_reference_missing_is_none() {
    assert_eq!(callback_reference(None, None), None);
    assert_eq!(callback_reference(Some(String::new()), None), None);
}
