use helio_core::mocks::{FailingHttp, StaticArp, StaticHttp};
use helio_core::{HelioError, NetPoller, PollEvent, PollerCfg};
use helio_traits::{ManualClock, MonotonicClock};
use std::time::Duration;

const TABLE: &str = "? (192.168.1.42) at 9c:9c:1f:c5:77:d4 on en0 ifscope [ethernet]\n";

fn mac() -> helio_config::MacAddr {
    "9c-9c-1f-c5-77-d4".parse().unwrap()
}

fn fast_cfg() -> PollerCfg {
    PollerCfg {
        interval: Duration::from_millis(5),
        http_timeout: Duration::from_millis(100),
        data_path: "/data".to_string(),
    }
}

#[test]
fn successful_tick_forwards_the_body() {
    let poller = NetPoller::spawn(
        StaticArp(TABLE.into()),
        StaticHttp(r#"{"sensors":{"LG":512}}"#.into()),
        mac(),
        fast_cfg(),
        MonotonicClock::new(),
    );

    match poller.recv_timeout(Duration::from_secs(2)) {
        Some(PollEvent::Payload(body)) => assert!(body.contains("512")),
        other => panic!("expected a payload, got {other:?}"),
    }
    poller.stop();
}

#[test]
fn arp_miss_is_reported_and_retried() {
    let poller = NetPoller::spawn(
        StaticArp("? (192.168.1.7) at aa:bb:cc:dd:ee:ff on en0\n".into()),
        StaticHttp(String::new()),
        mac(),
        fast_cfg(),
        MonotonicClock::new(),
    );

    // Two consecutive misses prove the worker keeps ticking after a fault.
    for _ in 0..2 {
        match poller.recv_timeout(Duration::from_secs(2)) {
            Some(PollEvent::Fault(HelioError::ArpMiss(m))) => {
                assert_eq!(m, "9c:9c:1f:c5:77:d4");
            }
            other => panic!("expected an ARP miss, got {other:?}"),
        }
    }
    poller.stop();
}

#[test]
fn http_failure_skips_the_tick_and_continues() {
    let poller = NetPoller::spawn(
        StaticArp(TABLE.into()),
        FailingHttp("connection refused"),
        mac(),
        fast_cfg(),
        MonotonicClock::new(),
    );

    for _ in 0..2 {
        match poller.recv_timeout(Duration::from_secs(2)) {
            Some(PollEvent::Fault(e)) => {
                assert!(format!("{e}").contains("connection refused"));
            }
            other => panic!("expected a fault, got {other:?}"),
        }
    }
    poller.stop();
}

#[test]
fn pacing_uses_the_injected_clock() {
    // With a manual clock the one-hour interval collapses to simulated
    // time, so multiple ticks arrive immediately.
    let poller = NetPoller::spawn(
        StaticArp(TABLE.into()),
        StaticHttp("{}".into()),
        mac(),
        PollerCfg {
            interval: Duration::from_secs(3600),
            ..fast_cfg()
        },
        ManualClock::new(),
    );

    for _ in 0..3 {
        assert!(
            poller.recv_timeout(Duration::from_secs(2)).is_some(),
            "ticks must not wait for wall-clock intervals"
        );
    }
    poller.stop();
}

#[test]
fn poller_stops_promptly() {
    let poller = NetPoller::spawn(
        StaticArp(TABLE.into()),
        StaticHttp("{}".into()),
        mac(),
        PollerCfg {
            interval: Duration::from_millis(50),
            ..fast_cfg()
        },
        MonotonicClock::new(),
    );
    // Let a tick or two happen.
    let _ = poller.recv_timeout(Duration::from_secs(2));

    let start = std::time::Instant::now();
    poller.stop();
    let elapsed = start.elapsed();
    // Worst case is one full interval sleep plus join overhead.
    assert!(
        elapsed < Duration::from_millis(500),
        "stop took {elapsed:?}, expected < 500ms"
    );
}
