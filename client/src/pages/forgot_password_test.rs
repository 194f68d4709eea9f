use super::*;

#[test]
fn reset_link_encodes_email() {
    assert_eq!(reset_link("ada+home@example.com"), "/reset-password?email=ada%2Bhome%40example%2Ecom");
}

#[test]
fn reset_link_with_plain_address_round_trips_through_decoding() {
    let link = reset_link("ada@example.com");
    let encoded = link.strip_prefix("/reset-password?email=").unwrap();
    let decoded = percent_encoding::percent_decode_str(encoded).decode_utf8().unwrap();
    assert_eq!(decoded, "ada@example.com");
}
