//! Account-creation detail validation.
//!
//! A pure, stateless predicate with no protocol involvement: the
//! account-creation form calls it before a `CREATE_ACCOUNT` message is
//! ever built. The server enforces its own rules; this is the client-side
//! gate that keeps obviously bad input off the wire.

/// Validates the four fields of the account-creation form.
///
/// Rules:
/// - username: 4-16 characters, ASCII alphanumeric only
/// - password: 8-20 characters with at least one uppercase letter, one
///   lowercase letter, and one digit (other characters are allowed)
/// - password must equal its confirmation
/// - email: `local@domain.tld` with the local part restricted to ASCII
///   alphanumerics plus `. _ + -`, alphanumeric-or-hyphen domain labels,
///   and a purely alphabetic top-level domain of 2-4 characters
pub fn validate_details(
    username: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> bool {
    valid_username(username)
        && valid_email(email)
        && valid_password(password)
        && password == confirmation
}

fn valid_username(username: &str) -> bool {
    (4..=16).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric())
}

fn valid_password(password: &str) -> bool {
    (8..=20).contains(&password.chars().count())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-')
        })
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let tld = labels[labels.len() - 1];
    if !(2..=4).contains(&tld.len())
        || !tld.chars().all(|c| c.is_ascii_alphabetic())
    {
        return false;
    }
    labels[..labels.len() - 1].iter().all(|label| {
        !label.is_empty()
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_EMAIL: &str = "AXC1153@student.bham.ac.uk";
    const VALID_PASSWORD: &str = "Oliver2000!";

    fn check(username: &str, email: &str, password: &str) -> bool {
        validate_details(username, email, password, password)
    }

    #[test]
    fn test_valid_details_pass() {
        assert!(check("Jamie", VALID_EMAIL, VALID_PASSWORD));
    }

    #[test]
    fn test_username_rules() {
        assert!(!check("Bob", VALID_EMAIL, VALID_PASSWORD), "too short");
        assert!(
            !check("AlexIsTheBest2000", VALID_EMAIL, VALID_PASSWORD),
            "too long"
        );
        assert!(
            !check("Adam#", VALID_EMAIL, VALID_PASSWORD),
            "non-alphanumeric"
        );
        assert!(check("Al3x", VALID_EMAIL, VALID_PASSWORD), "4 chars, digits ok");
    }

    #[test]
    fn test_password_rules() {
        assert!(!check("Jamie", VALID_EMAIL, "Max2019"), "too short");
        assert!(
            !check("Jamie", VALID_EMAIL, "ThisIsAReallyLongPassword123456789"),
            "too long"
        );
        assert!(!check("Jamie", VALID_EMAIL, "richard65"), "no uppercase");
        assert!(!check("Jamie", VALID_EMAIL, "05BETHANY01"), "no lowercase");
        assert!(!check("Jamie", VALID_EMAIL, "SecurePassword"), "no digit");
    }

    #[test]
    fn test_password_must_match_confirmation() {
        assert!(!validate_details(
            "Jamie",
            VALID_EMAIL,
            "Oliver2000!",
            "Oliver2001!"
        ));
    }

    #[test]
    fn test_email_rules() {
        assert!(
            !check("Jamie", "sop%hie@gmail.com", VALID_PASSWORD),
            "bad local character"
        );
        assert!(
            !check("Jamie", "sop%hie@gm%ail.com", VALID_PASSWORD),
            "bad domain character"
        );
        assert!(
            !check("Jamie", "sophie@gmail.commercial", VALID_PASSWORD),
            "TLD too long"
        );
        assert!(!check("Jamie", "pineapple", VALID_PASSWORD), "no @ at all");
        assert!(
            !check("Jamie", "sophie@gmail", VALID_PASSWORD),
            "no TLD separator"
        );
        assert!(check("Jamie", "sophie@gmail.com", VALID_PASSWORD));
    }
}
