//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn valid_id() -> UserId {
    UserId::new(VALID_ID).expect("fixture id is a UUID")
}

#[fixture]
fn ann(valid_id: UserId) -> User {
    User::new(
        valid_id,
        EmailAddress::new("a@x.io").expect("valid email"),
        PersonName::new("Ann").expect("valid name"),
        PersonName::new("Lee").expect("valid name"),
        PasswordHash::new("$2b$04$notarealhashnotarealhashnotarealhashnotarealhashnotr"),
    )
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_from_uuid_avoids_round_trip_parse() {
    let uuid = Uuid::parse_str(VALID_ID).expect("valid UUID");
    let user_id = UserId::from_uuid(uuid);

    assert_eq!(user_id.as_uuid(), &uuid);
    assert_eq!(user_id.as_ref(), VALID_ID);
}

#[rstest]
fn random_ids_differ() {
    assert_ne!(UserId::random(), UserId::random());
}

#[rstest]
#[case("a@x.io", "a@x.io")]
#[case("  Ann@Example.COM\t", "ann@example.com")]
#[case("first.last+tag@sub.example.org", "first.last+tag@sub.example.org")]
fn email_is_trimmed_and_lowercased(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::MalformedEmail)]
#[case("@x.io", UserValidationError::MalformedEmail)]
#[case("a@", UserValidationError::MalformedEmail)]
#[case("a@b@c", UserValidationError::MalformedEmail)]
#[case("a b@x.io", UserValidationError::MalformedEmail)]
fn email_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw).expect_err("invalid email"), expected);
}

#[rstest]
fn email_length_is_bounded() {
    let domain = "@x.io";
    let at_limit = format!("{}{domain}", "a".repeat(EMAIL_MAX - domain.len()));
    assert!(EmailAddress::new(&at_limit).is_ok());

    let over = format!("a{at_limit}");
    assert_eq!(
        EmailAddress::new(&over).expect_err("too long"),
        UserValidationError::EmailTooLong { max: EMAIL_MAX }
    );
}

#[rstest]
#[case("  Ann ", "Ann")]
#[case("Mary Jane", "Mary Jane")]
fn person_name_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(PersonName::new(raw).expect("valid name").as_ref(), expected);
}

#[rstest]
fn person_name_rejects_blank_and_overlong() {
    assert_eq!(
        PersonName::new(" \t ").expect_err("blank"),
        UserValidationError::EmptyName
    );
    assert!(PersonName::new("a".repeat(PERSON_NAME_MAX)).is_ok());
    assert_eq!(
        PersonName::new("a".repeat(PERSON_NAME_MAX + 1)).expect_err("too long"),
        UserValidationError::NameTooLong {
            max: PERSON_NAME_MAX
        }
    );
}

#[rstest]
fn password_hash_debug_is_redacted(ann: User) {
    let rendered = format!("{ann:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains(ann.password_hash().as_str()));
}

#[rstest]
fn email_deserialization_normalises() {
    let email: EmailAddress =
        serde_json::from_value(serde_json::json!("Bob@X.IO")).expect("deserialize email");
    assert_eq!(email.as_ref(), "bob@x.io");
}

#[given("raw account fields")]
fn raw_account_fields() -> (String, String, String) {
    (" A@X.io ".to_owned(), " Ann ".to_owned(), "Lee".to_owned())
}

#[when("the user is assembled")]
fn the_user_is_assembled(
    fields: (String, String, String),
) -> Result<User, UserValidationError> {
    let (email, first, last) = fields;
    Ok(User::new(
        UserId::random(),
        EmailAddress::new(email)?,
        PersonName::new(first)?,
        PersonName::new(last)?,
        PasswordHash::new("hash"),
    ))
}

#[then("the fields are stored in canonical form")]
fn the_fields_are_stored_in_canonical_form(result: Result<User, UserValidationError>) {
    let user = result.expect("user should be assembled");
    assert_eq!(user.email().as_ref(), "a@x.io");
    assert_eq!(user.first_name().as_ref(), "Ann");
    assert_eq!(user.last_name().as_ref(), "Lee");
}

#[rstest]
fn assembling_a_user_canonicalises_fields() {
    let fields = raw_account_fields();
    let result = the_user_is_assembled(fields);
    the_fields_are_stored_in_canonical_form(result);
}
