use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

static USER_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r##"(?i)^(?:[-!#$%&'*+/=?^_`{}|~0-9a-z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9a-z]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0d-\x7f])*")$"##,
    )
    .expect("user part pattern is valid")
});

static DOMAIN_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9-]{2,63}$")
        .expect("domain pattern is valid")
});

/// Longest address accepted, per RFC 3696 errata.
const MAX_LENGTH: usize = 320;

/// Checks an address the way HTML form backends usually do: a dot-atom or
/// quoted local part, then a host name, `localhost`, or a bracketed IP literal.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.len() > MAX_LENGTH {
        return false;
    }
    let Some((user, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if !USER_PART.is_match(user) {
        return false;
    }

    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        let literal = literal.strip_prefix("IPv6:").unwrap_or(literal);
        return literal.parse::<IpAddr>().is_ok();
    }

    let domain = domain.strip_suffix('.').unwrap_or(domain);
    DOMAIN_PART.is_match(domain) && !domain.ends_with('-')
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_common_addresses() {
        for ok in [
            "jane@example.com",
            "jane.doe+forms@mail.example.co.uk",
            "root@localhost",
            "ops@[10.0.0.1]",
            "\"odd..name\"@example.org",
        ] {
            assert!(is_valid_email(ok), "{ok} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "jane@",
            "jane@example",
            "jane..doe@example.com",
            "jane@exa mple.com",
            "jane@example.c-",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }
}
