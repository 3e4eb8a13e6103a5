use piwik_tracker::tracker::{decode_query, encode_query};
use piwik_tracker::{ParameterSet, TrackingClient};
use proptest::prelude::*;

// ── Encoding is reversible ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn decoding_recovers_encoded_pairs(
        pairs in prop::collection::vec((".{1,12}", ".{0,40}"), 0..8)
    ) {
        let query = encode_query(pairs.clone());
        prop_assert_eq!(decode_query(&query), pairs);
    }

    #[test]
    fn encoded_query_has_only_safe_characters(
        key in ".{1,12}",
        value in ".{0,40}"
    ) {
        let query = encode_query([(key, value)]);
        let separators = query.matches('=').count();
        prop_assert_eq!(separators, 1, "unexpected separators in {}", query);
        prop_assert!(
            query.bytes().all(|b| b.is_ascii_alphanumeric() || b"-._~%=".contains(&b)),
            "unsafe character in {}",
            query
        );
    }
}

// ── Builder values survive the trip to the wire ───────────────────────────

proptest! {
    #[test]
    fn page_url_and_title_survive_encoding(
        url in ".{0,60}",
        title in ".{0,30}"
    ) {
        let client = TrackingClient::new("http://example.com/piwik", 6).unwrap();
        let params: ParameterSet = client.request(None).url(url.clone()).into_pageview(title.clone());

        let hit = client.prepare(&params).unwrap();
        let query = hit.path_and_query.strip_prefix("piwik.php?").unwrap();
        let pairs = decode_query(query);

        prop_assert_eq!(&pairs[3], &("url".to_string(), url));
        prop_assert_eq!(&pairs[4], &("action_name".to_string(), title));
    }
}
