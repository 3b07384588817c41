//! Time/location slot parsing
//!
//! A slot fragment is `<time-text>#<location-html>`. The parser
//! canonicalizes the time range, cleans the location text and
//! opportunistically pulls a map link, coordinates and a street address out
//! of embedded anchor markup.

use serde::Serialize;

use crate::dom::DomNode;
use crate::error::{Result, ScheduleError};

/// Anchor href patterns that positively identify a map link
const PRIMARY_MAP_PATTERNS: [&str; 3] = ["google.com/maps", "goo.gl/maps", "maps.google.com"];

/// Looser patterns tried only when no primary pattern matched any anchor
///
/// The source's links are inconsistently authored; this tier trades
/// precision for coverage. Checks are case-sensitive substring matches and
/// the first anchor in document order wins within each tier.
const FALLBACK_MAP_PATTERNS: [&str; 3] = ["maps", "goo.gl", "google"];

/// One parsed time/location slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotInfo {
    /// Canonical `HH:MM-HH:MM` range; empty for non-working placeholders
    pub time_range: String,
    /// Decoded, whitespace-collapsed visible text of the location markup
    pub location: String,
    /// Href of the detected map anchor, if any
    pub map_url: Option<String>,
    /// `lat,lon` pulled from the map URL, if the URL carries them inline
    pub coordinates: Option<String>,
    /// Street address from the anchor text, when it differs from `location`
    pub address: Option<String>,
}

/// Split a raw fragment into its time and location sides
///
/// # Errors
///
/// Returns [`ScheduleError::MalformedSlot`] unless splitting on `#` yields
/// exactly two parts.
pub fn split_slot(fragment: &str) -> Result<(&str, &str)> {
    let mut parts = fragment.split('#');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(time), Some(location), None) => Ok((time, location)),
        _ => Err(ScheduleError::MalformedSlot {
            fragment: fragment.to_string(),
        }),
    }
}

/// Parse one slot fragment against its already-parsed location markup
///
/// `location` is the parsed tree of the fragment's location side, supplied
/// by the caller's DOM adapter.
///
/// # Errors
///
/// Returns [`ScheduleError::MalformedSlot`] when the fragment does not
/// split into exactly two parts on `#`. The time side is canonicalized but
/// deliberately not validated here; session expansion rejects ranges that
/// do not parse.
pub fn parse_slot(fragment: &str, location: &DomNode) -> Result<SlotInfo> {
    let (time_text, _) = split_slot(fragment)?;

    let cleaned = cleaned_text(location);
    let anchor = find_map_anchor(location);
    if anchor.is_none() {
        log::debug!("no map link found for location {cleaned:?}");
    }

    let map_url = anchor
        .and_then(|a| a.attr("href"))
        .map(std::string::ToString::to_string);
    let coordinates = map_url.as_deref().and_then(extract_coordinates);
    let address = anchor.and_then(|a| candidate_address(a, &cleaned));

    Ok(SlotInfo {
        time_range: canonicalize_time(time_text),
        location: cleaned,
        map_url,
        coordinates,
        address,
    })
}

/// Visible text of the location markup with tab/CR/LF and non-breaking
/// spaces collapsed into single spaces
fn cleaned_text(location: &DomNode) -> String {
    let mut text = location
        .inner_text()
        .replace(['\t', '\r', '\n', '\u{a0}'], " ");
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }
    text.trim().to_string()
}

/// First anchor matching a primary pattern, else first matching a fallback
/// pattern, else none
fn find_map_anchor(location: &DomNode) -> Option<&DomNode> {
    let anchors = location.anchors();
    for tier in [&PRIMARY_MAP_PATTERNS, &FALLBACK_MAP_PATTERNS] {
        let hit = anchors.iter().copied().find(|anchor| {
            let href = anchor.attr("href").unwrap_or_default();
            tier.iter().any(|pattern| href.contains(pattern))
        });
        if hit.is_some() {
            return hit;
        }
    }
    None
}

/// Anchor text (preferring a nested `<strong>`) when it adds information
/// beyond the cleaned location text
fn candidate_address(anchor: &DomNode, cleaned: &str) -> Option<String> {
    let mut link_text = anchor.inner_text().trim().to_string();
    if let Some(strong) = anchor.first_descendant("strong") {
        let strong_text = strong.inner_text().trim().to_string();
        if !strong_text.is_empty() {
            link_text = strong_text;
        }
    }

    if !link_text.is_empty() && link_text != cleaned {
        Some(link_text)
    } else {
        None
    }
}

/// Pull inline coordinates out of a map URL
///
/// `@lat,lon,...` place URLs take priority over `ll=lat%2Clon` query URLs;
/// shortened links carry no inline coordinates at all.
fn extract_coordinates(url: &str) -> Option<String> {
    if let Some(at) = url.find('@') {
        return coordinates_after_at(&url[at + 1..]);
    }

    if let Some(ll) = url.find("ll=") {
        let start = ll + 3;
        let end = url[start..].find('&').map_or(url.len(), |i| start + i);
        let encoded = &url[start..end];
        return Some(
            urlencoding::decode(encoded)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| encoded.to_string()),
        );
    }

    None
}

/// Coordinates are everything up to the nearer of the second comma or the
/// next slash after the `@`; a URL with no comma after the `@` has none
fn coordinates_after_at(tail: &str) -> Option<String> {
    let first_comma = tail.find(',')?;
    let next_comma = tail[first_comma + 1..].find(',').map(|i| first_comma + 1 + i);
    let next_slash = tail[first_comma..].find('/').map(|i| first_comma + i);

    let end = match (next_comma, next_slash) {
        (Some(comma), Some(slash)) => comma.min(slash),
        (Some(comma), None) => comma,
        (None, Some(slash)) => slash,
        (None, None) => tail.len(),
    };

    Some(tail[..end].to_string())
}

/// Strip whitespace and zero-pad the two single-digit-hour shapes the
/// source emits; anything else passes through untouched
fn canonicalize_time(raw: &str) -> String {
    let mut chars: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if chars.get(1) == Some(&':') {
        chars.insert(0, '0');
    }

    let second_colon = chars
        .get(3..)
        .and_then(|tail| tail.iter().position(|&c| c == ':'))
        .map(|offset| offset + 3);
    if second_colon == Some(7) {
        chars.insert(6, '0');
    }

    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> DomNode {
        DomNode::text(text)
    }

    fn anchor(href: &str, children: Vec<DomNode>) -> DomNode {
        DomNode::element(
            "a",
            vec![("href".to_string(), href.to_string())],
            children,
        )
    }

    #[test]
    fn test_plain_text_slot() {
        let slot = parse_slot("9:00-11:15#Plain text", &plain("Plain text")).unwrap();
        assert_eq!(slot.time_range, "09:00-11:15");
        assert_eq!(slot.location, "Plain text");
        assert_eq!(slot.map_url, None);
        assert_eq!(slot.coordinates, None);
        assert_eq!(slot.address, None);
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let err = parse_slot("09:00-11:15 Plain text", &plain("")).unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedSlot { .. }));
    }

    #[test]
    fn test_extra_separator_is_malformed() {
        let err = split_slot("09:00#a#b").unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedSlot { .. }));
    }

    #[test]
    fn test_single_digit_end_hour_is_padded() {
        let slot = parse_slot("09:00-9:30#x", &plain("x")).unwrap();
        assert_eq!(slot.time_range, "09:00-09:30");
    }

    #[test]
    fn test_both_hours_single_digit() {
        let slot = parse_slot("9:00-9:30#x", &plain("x")).unwrap();
        assert_eq!(slot.time_range, "09:00-09:30");
    }

    #[test]
    fn test_already_canonical_time_is_untouched() {
        let slot = parse_slot("09:00-11:15#x", &plain("x")).unwrap();
        assert_eq!(slot.time_range, "09:00-11:15");
    }

    #[test]
    fn test_internal_whitespace_is_stripped() {
        let slot = parse_slot(" 9:00 - 11:15 #x", &plain("x")).unwrap();
        assert_eq!(slot.time_range, "09:00-11:15");
    }

    #[test]
    fn test_odd_widths_pass_through() {
        // Neither single-digit-hour pattern applies; the text survives
        // stripped but otherwise unchanged.
        let slot = parse_slot("09:5-1:0#x", &plain("x")).unwrap();
        assert_eq!(slot.time_range, "09:5-1:0");
    }

    #[test]
    fn test_location_whitespace_collapses() {
        let location = plain("Trg\tbana\r\nJela\u{10d}i\u{107}a\u{a0}\u{a0}1");
        let slot = parse_slot("09:00-11:00#ignored", &location).unwrap();
        assert_eq!(slot.location, "Trg bana Jela\u{10d}i\u{107}a 1");
    }

    #[test]
    fn test_primary_map_link_wins_over_earlier_fallback() {
        let location = DomNode::element(
            "p",
            vec![],
            vec![
                anchor("https://example.com/maps-of-art", vec![plain("first")]),
                anchor(
                    "https://www.google.com/maps/place/X/@45.83,15.98,17z/data",
                    vec![plain("second")],
                ),
            ],
        );
        let slot = parse_slot("09:00-11:00#ignored", &location).unwrap();
        assert_eq!(
            slot.map_url.as_deref(),
            Some("https://www.google.com/maps/place/X/@45.83,15.98,17z/data")
        );
    }

    #[test]
    fn test_fallback_tier_takes_first_match() {
        let location = DomNode::element(
            "p",
            vec![],
            vec![
                anchor("https://example.com/other", vec![plain("no")]),
                anchor("https://goo.gl/abc123", vec![plain("short")]),
                anchor("https://google.com/search", vec![plain("late")]),
            ],
        );
        let slot = parse_slot("09:00-11:00#ignored", &location).unwrap();
        assert_eq!(slot.map_url.as_deref(), Some("https://goo.gl/abc123"));
    }

    #[test]
    fn test_at_coordinates_end_at_second_comma() {
        assert_eq!(
            extract_coordinates("https://maps.google.com/maps/@45.832091,15.988697,17z"),
            Some("45.832091,15.988697".to_string())
        );
    }

    #[test]
    fn test_at_coordinates_end_at_slash() {
        assert_eq!(
            extract_coordinates("https://www.google.com/maps/place/X/@45.83,15.98/data"),
            Some("45.83,15.98".to_string())
        );
    }

    #[test]
    fn test_at_coordinates_run_to_end_of_string() {
        assert_eq!(
            extract_coordinates("https://maps.google.com/@45.83,15.98"),
            Some("45.83,15.98".to_string())
        );
    }

    #[test]
    fn test_at_without_comma_has_no_coordinates() {
        assert_eq!(extract_coordinates("https://maps.google.com/@zagreb"), None);
    }

    #[test]
    fn test_ll_coordinates_are_percent_decoded() {
        assert_eq!(
            extract_coordinates("https://maps.google.com/?ll=45.748839%2C15.946312&z=16"),
            Some("45.748839,15.946312".to_string())
        );
    }

    #[test]
    fn test_ll_coordinates_without_ampersand() {
        assert_eq!(
            extract_coordinates("https://maps.google.com/?ll=45.74,15.94"),
            Some("45.74,15.94".to_string())
        );
    }

    #[test]
    fn test_shortened_link_has_no_coordinates() {
        assert_eq!(extract_coordinates("https://goo.gl/maps/abc123"), None);
    }

    #[test]
    fn test_strong_text_becomes_address() {
        let location = DomNode::element(
            "p",
            vec![],
            vec![
                anchor(
                    "https://goo.gl/maps/abc",
                    vec![DomNode::element(
                        "strong",
                        vec![],
                        vec![plain("Av. Dubrava 256")],
                    )],
                ),
                plain(" Dubrava"),
            ],
        );
        let slot = parse_slot("09:00-11:00#ignored", &location).unwrap();
        assert_eq!(slot.location, "Av. Dubrava 256 Dubrava");
        assert_eq!(slot.address.as_deref(), Some("Av. Dubrava 256"));
    }

    #[test]
    fn test_anchor_text_matching_location_is_not_an_address() {
        let location = anchor("https://goo.gl/maps/abc", vec![plain("Sesvete")]);
        let slot = parse_slot("09:00-11:00#ignored", &location).unwrap();
        assert_eq!(slot.location, "Sesvete");
        assert_eq!(slot.address, None);
    }

    #[test]
    fn test_blank_strong_falls_back_to_anchor_text() {
        let location = DomNode::element(
            "p",
            vec![],
            vec![
                anchor(
                    "https://goo.gl/maps/abc",
                    vec![
                        DomNode::element("strong", vec![], vec![plain("  ")]),
                        plain("Trnava"),
                    ],
                ),
                plain(" i okolica"),
            ],
        );
        let slot = parse_slot("09:00-11:00#ignored", &location).unwrap();
        assert_eq!(slot.address.as_deref(), Some("Trnava"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let slot = SlotInfo {
            time_range: "09:00-11:00".to_string(),
            location: "Sesvete".to_string(),
            map_url: Some("https://goo.gl/maps/abc".to_string()),
            coordinates: None,
            address: None,
        };
        let value = serde_json::to_value(&slot).unwrap();
        assert!(value.get("timeRange").is_some());
        assert!(value.get("mapUrl").is_some());
    }
}
