//! Country-code TLD to country name lookup.

static COUNTRY_TLDS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "uk" => "United Kingdom",
    "us" => "United States",
    "de" => "Germany",
    "fr" => "France",
    "jp" => "Japan",
    "ca" => "Canada",
    "au" => "Australia",
    "ch" => "Switzerland",
    "cn" => "China",
    "es" => "Spain",
    "it" => "Italy",
    "nl" => "Netherlands",
    "se" => "Sweden",
    "no" => "Norway",
    "ru" => "Russia",
    "br" => "Brazil",
    "in" => "India",
    "kr" => "South Korea",
    "pl" => "Poland",
    "at" => "Austria",
    "be" => "Belgium",
    "dk" => "Denmark",
    "fi" => "Finland",
    "ie" => "Ireland",
    "pt" => "Portugal",
    "gr" => "Greece",
    "cz" => "Czech Republic",
    "nz" => "New Zealand",
    "mx" => "Mexico",
    "ar" => "Argentina",
    "za" => "South Africa",
};

/// Returns the country for a bare country-code TLD such as `"uk"`.
///
/// Matching is case-insensitive. Generic TLDs and unlisted country codes
/// return `None`.
pub fn lookup(tld: &str) -> Option<&'static str> {
    COUNTRY_TLDS.get(tld.to_ascii_lowercase().as_str()).copied()
}

/// Looks up the country for a public suffix, using its last label so that
/// `"co.uk"` resolves through `"uk"`.
pub fn country_for_suffix(suffix: &str) -> Option<&'static str> {
    let last_label = suffix.trim_end_matches('.').rsplit('.').next()?;
    lookup(last_label)
}
