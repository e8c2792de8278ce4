// Domain module tests.

use super::*;

fn test_lookup() -> PslLookup {
    PslLookup
}

#[test]
fn test_has_https_scheme() {
    assert!(has_https_scheme("https://example.com"));
    assert!(!has_https_scheme("http://example.com"));
    assert!(!has_https_scheme("example.com"));
    // Scheme check is literal, not case-folded
    assert!(!has_https_scheme("HTTPS://example.com"));
}

#[test]
fn test_is_etld_plus1_simple_tld() {
    let lookup = test_lookup();
    assert!(is_etld_plus1(&lookup, "https://primary.com"));
}

#[test]
fn test_is_etld_plus1_multi_part_suffix() {
    let lookup = test_lookup();
    assert!(is_etld_plus1(&lookup, "https://primary.com.ar"));
    assert!(is_etld_plus1(&lookup, "https://example.co.uk"));
}

#[test]
fn test_is_etld_plus1_rejects_bare_suffix() {
    let lookup = test_lookup();
    // 7.bg is itself on the public suffix list
    assert!(!is_etld_plus1(&lookup, "https://7.bg"));
    assert!(!is_etld_plus1(&lookup, "https://co.uk"));
}

#[test]
fn test_is_etld_plus1_rejects_subdomain() {
    let lookup = test_lookup();
    assert!(!is_etld_plus1(&lookup, "https://subdomain.primary.com"));
}

#[test]
fn test_is_etld_plus1_rejects_unknown_tld() {
    let lookup = test_lookup();
    assert!(!is_etld_plus1(&lookup, "https://primary.c2om"));
}

#[test]
fn test_is_etld_plus1_rejects_unparseable() {
    let lookup = test_lookup();
    assert!(!is_etld_plus1(&lookup, "primary.com"));
    assert!(!is_etld_plus1(&lookup, ""));
}

#[test]
fn test_is_etld_plus1_with_stub_lookup() {
    struct FixedLookup;
    impl SuffixLookup for FixedLookup {
        fn registrable_domain(&self, host: &str) -> Option<String> {
            host.strip_suffix(".test")
                .and_then(|rest| rest.rsplit('.').next())
                .map(|label| format!("{label}.test"))
        }
    }

    assert!(is_etld_plus1(&FixedLookup, "https://site.test"));
    assert!(!is_etld_plus1(&FixedLookup, "https://www.site.test"));
    assert!(!is_etld_plus1(&FixedLookup, "https://site.com"));
}

#[test]
fn test_second_level_label() {
    assert_eq!(second_level_label("https://primary.com"), "primary");
    assert_eq!(second_level_label("https://primary2.co.uk"), "primary2");
    assert_eq!(second_level_label("https://primary.com/path"), "primary");
    // Missing scheme still yields a label
    assert_eq!(second_level_label("primary.ca"), "primary");
}

#[test]
fn test_top_level_label() {
    assert_eq!(top_level_label("https://primary.com"), "com");
    assert_eq!(top_level_label("https://primary2.co.uk"), "uk");
    assert_eq!(top_level_label("https://primary.gov:8443"), "gov");
    assert_eq!(top_level_label("primary.ca"), "ca");
}

#[test]
fn test_icann_tlds_parse() {
    let tlds = IcannTlds::parse("# country codes\nca\n\n.UK\n  de  \n");
    assert_eq!(tlds.len(), 3);
    assert!(tlds.contains("ca"));
    assert!(tlds.contains("uk"));
    assert!(tlds.contains("de"));
    assert!(!tlds.contains("com"));
}

#[test]
fn test_icann_tlds_bundled() {
    let tlds = IcannTlds::bundled();
    assert!(!tlds.is_empty());
    for label in ["ca", "uk", "de", "jp", "ar", "bg"] {
        assert!(tlds.contains(label), "{label} should be a bundled ccTLD");
    }
    for label in ["com", "gov", "edu", "org"] {
        assert!(!tlds.contains(label), "{label} is not a country code");
    }
}

#[test]
fn test_icann_tlds_from_iter() {
    let tlds: IcannTlds = ["ca", "uk"].into_iter().collect();
    assert!(tlds.contains("ca"));
    assert!(!tlds.contains("de"));
}
