use super::*;
use crate::net::types::User;

fn signed_in(role: &str) -> Session {
    Session {
        access_token: "tok".to_owned(),
        refresh_token: "ref".to_owned(),
        user: Some(User { id: "u-1".to_owned(), role: Some(role.to_owned()), ..User::default() }),
    }
}

#[test]
fn anonymous_goes_to_login() {
    assert_eq!(home_destination(&Session::default()), Ok("/login"));
}

#[test]
fn signed_in_goes_to_landing() {
    assert_eq!(home_destination(&signed_in("estate")), Ok("/dashboard/estate"));
    assert_eq!(home_destination(&signed_in("admin")), Ok("/dashboard/admin"));
}

#[test]
fn unmapped_role_is_reported() {
    assert_eq!(
        home_destination(&signed_in("guard")),
        Err("no dashboard is configured for role `guard`".to_owned())
    );
}
