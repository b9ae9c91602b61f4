//! Static country data for the phone field's country prefix.
//!
//! Stands in for an external locale database: ISO code, display name, flag,
//! and international calling code, with a simple substring search for the
//! picker dialog.

/// One entry in the country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (uppercase)
    pub iso: &'static str,
    /// English display name
    pub name: &'static str,
    /// Emoji flag
    pub flag: &'static str,
    /// International calling code without the leading `+`
    pub calling_code: &'static str,
}

impl Country {
    /// Prefix shown next to the phone input, e.g. `🇺🇸 +1`.
    #[must_use]
    pub fn prefix_label(&self) -> String {
        format!("{} +{}", self.flag, self.calling_code)
    }
}

/// All countries the picker offers, ordered by display name.
pub const COUNTRIES: &[Country] = &[
    Country { iso: "AR", name: "Argentina", flag: "🇦🇷", calling_code: "54" },
    Country { iso: "AU", name: "Australia", flag: "🇦🇺", calling_code: "61" },
    Country { iso: "AT", name: "Austria", flag: "🇦🇹", calling_code: "43" },
    Country { iso: "BE", name: "Belgium", flag: "🇧🇪", calling_code: "32" },
    Country { iso: "BR", name: "Brazil", flag: "🇧🇷", calling_code: "55" },
    Country { iso: "CA", name: "Canada", flag: "🇨🇦", calling_code: "1" },
    Country { iso: "CL", name: "Chile", flag: "🇨🇱", calling_code: "56" },
    Country { iso: "CN", name: "China", flag: "🇨🇳", calling_code: "86" },
    Country { iso: "CO", name: "Colombia", flag: "🇨🇴", calling_code: "57" },
    Country { iso: "DK", name: "Denmark", flag: "🇩🇰", calling_code: "45" },
    Country { iso: "EG", name: "Egypt", flag: "🇪🇬", calling_code: "20" },
    Country { iso: "FI", name: "Finland", flag: "🇫🇮", calling_code: "358" },
    Country { iso: "FR", name: "France", flag: "🇫🇷", calling_code: "33" },
    Country { iso: "DE", name: "Germany", flag: "🇩🇪", calling_code: "49" },
    Country { iso: "GH", name: "Ghana", flag: "🇬🇭", calling_code: "233" },
    Country { iso: "IN", name: "India", flag: "🇮🇳", calling_code: "91" },
    Country { iso: "ID", name: "Indonesia", flag: "🇮🇩", calling_code: "62" },
    Country { iso: "IE", name: "Ireland", flag: "🇮🇪", calling_code: "353" },
    Country { iso: "IT", name: "Italy", flag: "🇮🇹", calling_code: "39" },
    Country { iso: "JP", name: "Japan", flag: "🇯🇵", calling_code: "81" },
    Country { iso: "KE", name: "Kenya", flag: "🇰🇪", calling_code: "254" },
    Country { iso: "MX", name: "Mexico", flag: "🇲🇽", calling_code: "52" },
    Country { iso: "NL", name: "Netherlands", flag: "🇳🇱", calling_code: "31" },
    Country { iso: "NZ", name: "New Zealand", flag: "🇳🇿", calling_code: "64" },
    Country { iso: "NG", name: "Nigeria", flag: "🇳🇬", calling_code: "234" },
    Country { iso: "NO", name: "Norway", flag: "🇳🇴", calling_code: "47" },
    Country { iso: "PH", name: "Philippines", flag: "🇵🇭", calling_code: "63" },
    Country { iso: "PL", name: "Poland", flag: "🇵🇱", calling_code: "48" },
    Country { iso: "PT", name: "Portugal", flag: "🇵🇹", calling_code: "351" },
    Country { iso: "SG", name: "Singapore", flag: "🇸🇬", calling_code: "65" },
    Country { iso: "ZA", name: "South Africa", flag: "🇿🇦", calling_code: "27" },
    Country { iso: "KR", name: "South Korea", flag: "🇰🇷", calling_code: "82" },
    Country { iso: "ES", name: "Spain", flag: "🇪🇸", calling_code: "34" },
    Country { iso: "SE", name: "Sweden", flag: "🇸🇪", calling_code: "46" },
    Country { iso: "CH", name: "Switzerland", flag: "🇨🇭", calling_code: "41" },
    Country { iso: "TR", name: "Türkiye", flag: "🇹🇷", calling_code: "90" },
    Country { iso: "GB", name: "United Kingdom", flag: "🇬🇧", calling_code: "44" },
    Country { iso: "US", name: "United States", flag: "🇺🇸", calling_code: "1" },
];

/// Looks up a country by ISO code (case-insensitive).
#[must_use]
pub fn by_iso(iso: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.iso.eq_ignore_ascii_case(iso))
}

/// Returns all countries whose name or ISO code contains the query
/// (case-insensitive). An empty query returns the full table.
#[must_use]
pub fn search(query: &str) -> Vec<&'static Country> {
    if query.is_empty() {
        return COUNTRIES.iter().collect();
    }
    let query_lower = query.to_lowercase();
    COUNTRIES
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&query_lower)
                || c.iso.to_lowercase().contains(&query_lower)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_iso_case_insensitive() {
        assert_eq!(by_iso("us").unwrap().name, "United States");
        assert_eq!(by_iso("US").unwrap().calling_code, "1");
        assert!(by_iso("ZZ").is_none());
    }

    #[test]
    fn test_search_by_name_fragment() {
        let hits = search("king");
        assert!(hits.iter().any(|c| c.iso == "GB"));
    }

    #[test]
    fn test_empty_query_returns_all() {
        assert_eq!(search("").len(), COUNTRIES.len());
    }

    #[test]
    fn test_prefix_label() {
        let us = by_iso("US").unwrap();
        assert_eq!(us.prefix_label(), "🇺🇸 +1");
    }
}
