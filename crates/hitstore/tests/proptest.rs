//! Property-based tests for the hit store using proptest.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, Duration, TimeZone, Utc};
use hitstore::criterion::ip::{equals_ip, is_greater_than_ip, is_less_than_ip};
use hitstore::criterion::string::equals_string;
use hitstore::criterion::time::{is_after, is_before_or_equals, is_between_times};
use hitstore::{does_not, Filter, Hit, Requester, Store, Where};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2009, 4, 13, 0, 0, 0).unwrap()
}

fn minutes(m: i64) -> DateTime<Utc> {
    base() + Duration::minutes(m)
}

const CITIES: [&str; 3] = ["Alternia", "Beforus", "Skaia"];

// Strategy to generate hits with clustered times and a few cities
fn hit_strategy() -> impl Strategy<Value = Hit> {
    (0i64..120, 0usize..3, prop::option::of(any::<u32>())).prop_map(|(m, city, addr)| {
        Hit::new(minutes(m), "example.org", "/").with_client(Requester::new(
            addr.map(|a| IpAddr::V4(Ipv4Addr::from(a))),
            "Beforus",
            CITIES[city],
        ))
    })
}

fn store_strategy() -> impl Strategy<Value = Store> {
    prop::collection::vec(hit_strategy(), 0..60).prop_map(Store::from_hits)
}

fn is_sorted(hits: &[Hit]) -> bool {
    hits.windows(2).all(|w| w[0].time <= w[1].time)
}

fn brute_force(store: &Store, filter: &dyn Filter) -> Vec<Hit> {
    store
        .select(None)
        .unwrap()
        .into_iter()
        .filter(|h| filter.matches(h))
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Narrowed scans return exactly what a full scan returns.
    #[test]
    fn narrowing_never_changes_results(
        store in store_strategy(),
        a in 0i64..130,
        b in 0i64..130,
    ) {
        let filter = Where::new().time(is_between_times(minutes(a), minutes(b)));
        prop_assert_eq!(store.select(Some(&filter)).unwrap(), brute_force(&store, &filter));

        let filter = Where::new().time(is_after(minutes(a))).client_city(equals_string("Skaia"));
        prop_assert_eq!(store.select(Some(&filter)).unwrap(), brute_force(&store, &filter));
    }

    /// The empty conjunction matches every hit.
    #[test]
    fn empty_where_matches_everything(hit in hit_strategy()) {
        prop_assert!(Where::new().matches(&hit));
    }

    /// Between is inclusive on both ends.
    #[test]
    fn between_times_is_inclusive(a in 0i64..200, b in 0i64..200, v in 0i64..200) {
        let c = is_between_times(minutes(a), minutes(b));
        prop_assert_eq!(c.meets(&minutes(v)), a <= v && v <= b);
    }

    /// Negating twice gives back the original verdict.
    #[test]
    fn double_negation_is_identity(bound in any::<u32>(), v in prop::option::of(any::<u32>())) {
        let literal = Ipv4Addr::from(bound).to_string();
        let value = v.map(|a| IpAddr::V4(Ipv4Addr::from(a)));
        for c in [is_less_than_ip(&literal), is_greater_than_ip(&literal), equals_ip(&literal)] {
            let twice = does_not(does_not(c.clone()));
            prop_assert_eq!(twice.meets(&value), c.meets(&value));
        }
    }

    /// An IPv4 address and its mapped IPv6 form are the same address.
    #[test]
    fn mapped_addresses_are_equal(addr in any::<u32>()) {
        let v4 = Ipv4Addr::from(addr);
        let c = equals_ip(&v4.to_string());
        prop_assert!(c.meets(&Some(IpAddr::V4(v4))));
        prop_assert!(c.meets(&Some(IpAddr::V6(v4.to_ipv6_mapped()))));
        prop_assert!(!c.meets(&None));
        prop_assert!(!c.meets(&Some(IpAddr::V6(Ipv6Addr::from(u128::from(addr) + (1u128 << 64))))));
    }

    /// OR selects the union of both sides, each hit once.
    #[test]
    fn or_is_union(store in store_strategy(), city in 0usize..3, m in 0i64..120) {
        let a = Where::new().client_city(equals_string(CITIES[city]));
        let b = Where::new().time(is_before_or_equals(minutes(m)));

        let union = store.select(Some(&a.clone().or(b.clone()))).unwrap();
        let expected: Vec<Hit> = store
            .select(None)
            .unwrap()
            .into_iter()
            .filter(|h| a.matches(h) || b.matches(h))
            .collect();
        prop_assert_eq!(union, expected);
    }

    /// NOT selects the complement.
    #[test]
    fn not_is_complement(store in store_strategy(), city in 0usize..3) {
        let a = Where::new().client_city(equals_string(CITIES[city]));
        let inside = store.count(Some(&a)).unwrap();
        let outside = store.select(Some(&a.clone().negate())).unwrap();

        prop_assert_eq!(inside + outside.len(), store.len());
        prop_assert!(outside.iter().all(|h| !a.matches(h)));
    }

    /// Updates keep the store sorted and never count more than they match.
    #[test]
    fn update_preserves_order(
        mut store in store_strategy(),
        m in 0i64..120,
        shift in -200i64..200,
    ) {
        let filter = Where::new().time(is_after(minutes(m)));
        let (matched, updated) = store
            .update(Some(&filter), |mut h| {
                h.time = h.time + Duration::minutes(shift);
                h
            })
            .unwrap();

        prop_assert!(matched >= updated);
        if shift == 0 {
            prop_assert_eq!(updated, 0);
        } else {
            prop_assert_eq!(updated, matched);
        }
        prop_assert!(is_sorted(&store.select(None).unwrap()));
    }

    /// Delete removes exactly what select would have returned.
    #[test]
    fn delete_matches_select(mut store in store_strategy(), city in 0usize..3, m in 0i64..120) {
        let filter = Where::new()
            .time(is_after(minutes(m)))
            .client_city(equals_string(CITIES[city]));

        let before = store.select(None).unwrap();
        let doomed = store.select(Some(&filter)).unwrap();
        let deleted = store.delete(Some(&filter)).unwrap();

        prop_assert_eq!(deleted, doomed.len());
        let expected: Vec<Hit> = before.into_iter().filter(|h| !filter.matches(h)).collect();
        prop_assert_eq!(store.select(None).unwrap(), expected);
    }
}

// ============================================================================
// Additional edge case tests
// ============================================================================

#[test]
fn empty_store_returns_empty() {
    let mut store = Store::new();
    let filter = Where::new().time(is_after(base()));

    assert!(store.select(Some(&filter)).unwrap().is_empty());
    assert_eq!(store.count(Some(&filter)).unwrap(), 0);
    assert_eq!(store.update(Some(&filter), |h| h).unwrap(), (0, 0));
    assert_eq!(store.delete(Some(&filter)).unwrap(), 0);
}
