//! End-to-end routing scenarios.

use proptest::prelude::*;
use wayfarer::prelude::*;

fn reference_tree() -> PathTree<&'static str> {
    let mut tree = PathTree::new();
    tree.append("/hello", "hello").unwrap();
    tree.append("/hello/{time:int}", "hello-time").unwrap();
    tree.append("/hello/world", "hello-world").unwrap();
    tree.append("/sayhi/{name}", "sayhi").unwrap();
    tree.append("/sayhi/{name}/suffix", "sayhi-suffix").unwrap();
    tree.append("/sayhi/{name}/avatar.{suffix}", "avatar").unwrap();
    tree
}

#[test]
fn tree_success_search() {
    let tree = reference_tree();
    let cases: [(&str, PathParams); 6] = [
        ("/hello", params! {}),
        ("/hello/world", params! {}),
        ("/hello/123", params! { "time" => 123 }),
        ("/sayhi/aber", params! { "name" => "aber" }),
        ("/sayhi/aber/suffix", params! { "name" => "aber" }),
        (
            "/sayhi/aber/avatar.png",
            params! { "name" => "aber", "suffix" => "png" },
        ),
    ];
    for (path, expected) in cases {
        let found = tree.search(path).unwrap_or_else(|| panic!("error in {path}"));
        assert_eq!(found.convert().unwrap(), expected, "params for {path}");
    }
}

#[test]
fn tree_fail_search() {
    let tree = reference_tree();
    for path in ["", "/hello/", "/hello/world/", "/sayhi/aber/avatar"] {
        assert!(tree.search(path).is_none(), "error in {path}");
    }
}

fn reference_router() -> Router<&'static str> {
    Router::from_routes(
        Routes::new()
            .http_named("/hello/world", "hello world", "hello-world")
            .http_named("/sayhi/{name}", "sayhi", "sayhi")
            .http("/about", "about")
            .http_named("/about/{name}", "about", "about")
            .http("/http_view", "http view")
            .websocket_named("/socket_view", "socket view", "socket"),
    )
    .unwrap()
}

#[test]
fn router_success_search() {
    let router = reference_router();
    let cases: [(Protocol, &str, PathParams); 5] = [
        (Protocol::HTTP, "/hello/world", params! {}),
        (Protocol::HTTP, "/sayhi/aber", params! { "name" => "aber" }),
        (Protocol::HTTP, "/about", params! {}),
        (Protocol::HTTP, "/http_view", params! {}),
        (Protocol::WEBSOCKET, "/socket_view", params! {}),
    ];
    for (protocol, path, expected) in cases {
        let hit = router.search(&protocol, path).unwrap();
        assert_eq!(hit.params, expected, "params for {protocol} {path}");
    }
}

#[test]
fn router_fail_search() {
    let router = reference_router();
    let cases = [
        (Protocol::HTTP, "/hello/world/"),
        (Protocol::HTTP, "/sayhi/"),
        (Protocol::HTTP, "/about/aber/"),
        (Protocol::HTTP, "/http_view/123"),
        (Protocol::WEBSOCKET, "/"),
        (Protocol::WEBSOCKET, "/socket"),
        (Protocol::WEBSOCKET, "/socket_view/"),
    ];
    for (protocol, path) in cases {
        let error = router.search(&protocol, path).unwrap_err();
        assert_eq!(
            error,
            NoMatchFound {
                protocol,
                path: path.to_owned()
            }
        );
    }
}

#[test]
fn router_success_url_for() {
    let router = reference_router();
    let cases = [
        (Protocol::HTTP, "hello-world", params! {}, "/hello/world"),
        (
            Protocol::HTTP,
            "sayhi",
            params! { "name" => "aber" },
            "/sayhi/aber",
        ),
        (
            Protocol::HTTP,
            "about",
            params! { "name" => "aber" },
            "/about/aber",
        ),
        (Protocol::WEBSOCKET, "socket", params! {}, "/socket_view"),
    ];
    for (protocol, name, params, url) in cases {
        assert_eq!(router.url_for_in(&protocol, name, &params).unwrap(), url);
        // The unscoped form finds the same routes here: no name is
        // registered under more than one protocol.
        assert_eq!(router.url_for(name, &params).unwrap(), url);
    }
}

#[test]
fn router_fail_url_for() {
    let router = reference_router();
    assert_eq!(
        router.url_for("longlongname", &params! {}).unwrap_err(),
        NoRouteFound::UnknownName {
            name: "longlongname".to_owned()
        }
    );
}

#[test]
fn generated_urls_search_back() {
    let router = reference_router();
    let params = params! { "name" => "aber" };
    let url = router.url_for("sayhi", &params).unwrap();
    let hit = router.search(&Protocol::HTTP, &url).unwrap();
    assert_eq!(hit.params, params);
    assert_eq!(hit.endpoint, &"sayhi");
}

proptest! {
    // Round-trip law: any value whose rendered form survives its
    // converter comes back unchanged through url_for -> search.
    #[test]
    fn round_trip_string_param(name in "[a-z][a-z0-9_-]{0,15}") {
        let router = reference_router();
        let params = params! { "name" => name.clone() };
        let url = router.url_for("sayhi", &params).unwrap();
        let hit = router.search(&Protocol::HTTP, &url).unwrap();
        prop_assert_eq!(hit.params.get_str("name"), Some(name.as_str()));
    }

    #[test]
    fn round_trip_int_param(time in 0i64..=i64::MAX) {
        let mut router = Router::new();
        router
            .add_named(Protocol::HTTP, "/hello/{time:int}", "clock", "clock")
            .unwrap();
        let url = router.url_for("clock", &params! { "time" => time }).unwrap();
        let hit = router.search(&Protocol::HTTP, &url).unwrap();
        prop_assert_eq!(hit.params.get_i64("time"), Some(time));
    }

    #[test]
    fn round_trip_mixed_segment(name in "[a-z]{1,12}", suffix in "[a-z]{1,5}") {
        let mut router = Router::new();
        router
            .add_named(
                Protocol::HTTP,
                "/sayhi/{name}/avatar.{suffix}",
                "avatar",
                "avatar",
            )
            .unwrap();
        let params = params! { "name" => name, "suffix" => suffix };
        let url = router.url_for("avatar", &params).unwrap();
        let hit = router.search(&Protocol::HTTP, &url).unwrap();
        prop_assert_eq!(&hit.params, &params);
    }
}
