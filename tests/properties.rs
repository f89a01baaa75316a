use proptest::prelude::*;
use uriclean::{
    build, build_query, clean_path, is_valid, parse, parse_query, sanitise, ParseOptions, QueryMap,
};

// Paths made of dot segments, empty segments and plain names.
fn dotted_path() -> impl Strategy<Value = String> {
    let segment = prop_oneof![Just("."), Just(".."), Just(""), Just("a"), Just("b")];
    (any::<bool>(), prop::collection::vec(segment, 0..8)).prop_map(|(absolute, segments)| {
        let path = segments.join("/");
        if absolute {
            format!("/{}", path)
        } else {
            path
        }
    })
}

fn host() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{1,8}\\.[a-z]{2,4}".prop_map(|s| s),
        "[a-z0-9]{1,8}\\.[a-z0-9]{1,8}\\.[a-z]{2,4}".prop_map(|s| s),
        Just("localhost".to_string()),
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d)),
    ]
}

fn url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("http"), Just("https")],
        host(),
        prop::option::of(1u16..=65535),
        "(/([a-z0-9._-]|%25|%[0-9A-F]{2}){1,8}){0,3}/?",
        prop::option::of(
            "([a-z]|%25|%[0-9A-F]{2}){1,5}=([a-z0-9]|%25|%[0-9A-F]{2}){1,5}\
             (&([a-z]|%25|%[0-9A-F]{2}){1,5}=([a-z0-9]|%25|%[0-9A-F]{2}){1,5}){0,2}"
        ),
        prop::option::of("([a-zA-Z0-9_-]|%25|%[0-9A-F]{2}){1,8}"),
    )
        .prop_map(|(scheme, host, port, path, query, fragment)| {
            let mut url = format!("{}://{}", scheme, host);
            if let Some(port) = port {
                url.push_str(&format!(":{}", port));
            }
            url.push_str(&path);
            if let Some(query) = query {
                url.push('?');
                url.push_str(&query);
            }
            if let Some(fragment) = fragment {
                url.push('#');
                url.push_str(&fragment);
            }
            url
        })
}

proptest! {
    #[test]
    fn clean_path_is_idempotent(path in dotted_path()) {
        let once = clean_path(&path);
        prop_assert_eq!(clean_path(&once), once);
    }
}

proptest! {
    #[test]
    fn clean_path_leaves_no_dot_segments(path in dotted_path()) {
        let cleaned = clean_path(&path);
        prop_assert!(!cleaned.split('/').any(|segment| segment == "."));
        prop_assert!(!cleaned.contains("//"));
    }
}

proptest! {
    #[test]
    fn query_round_trip(
        vars in prop::collection::hash_map("[a-z]{1,6}", "[ -~]{0,8}", 0..6)
    ) {
        let map = vars
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect::<QueryMap>();
        prop_assert_eq!(parse_query(&build_query(&map)), map);
    }
}

proptest! {
    #[test]
    fn build_after_parse_is_stable(url in url()) {
        prop_assert!(is_valid(&url));
        let components = parse(&url, ParseOptions::default()).unwrap();
        let rebuilt = build(&components).unwrap();
        prop_assert_eq!(parse(&rebuilt, ParseOptions::default()), Ok(components));
        prop_assert_eq!(sanitise(&rebuilt), Ok(rebuilt.clone()));
    }
}
