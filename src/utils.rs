//! Naming-scheme helpers for transient and neutrino identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

static ZTF_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ZTF[1-2]\d[a-z]{7}$").expect("static regex"));

// Day-of-month validity baked into the pattern, leap years included.
static ICECUBE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^IC((\d{2}((0[13578]|1[02])(0[1-9]|[12]\d|3[01])|(0[13456789]|1[012])(0[1-9]|[12]\d|30)|02(0[1-9]|1\d|2[0-8])))|([02468][048]|[13579][26])0229)[a-zA-Z]$",
    )
    .expect("static regex")
});

/// Check if a string adheres to the ZTF naming scheme (e.g. `ZTF19accdntg`).
pub fn is_ztf_name(name: &str) -> bool {
    ZTF_NAME.is_match(name)
}

/// Check if a string adheres to the IceCube naming scheme (e.g. `IC201021B`).
pub fn is_icecube_name(name: &str) -> bool {
    ICECUBE_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ztf_names() {
        assert!(is_ztf_name("ZTF19accdntg"));
        assert!(is_ztf_name("ZTF21abcdefg"));
        assert!(!is_ztf_name("ZTF19accdnt"));
        assert!(!is_ztf_name("ZTF39accdntg"));
        assert!(!is_ztf_name("AT2019abcdefg"));
    }

    #[test]
    fn icecube_names() {
        assert!(is_icecube_name("IC201021B"));
        assert!(is_icecube_name("IC220624A"));
        // Leap-day alert only valid in leap years
        assert!(is_icecube_name("IC200229A"));
        assert!(!is_icecube_name("IC210229A"));
        assert!(!is_icecube_name("IC201301A"));
        assert!(!is_icecube_name("IC20102B"));
    }
}
