use super::*;
use clap::Parser;

fn minimal_args() -> Vec<&'static str> {
    vec![
        "crn-watch",
        "--registrar-base-url",
        "https://oscar.gatech.edu/pls/bprod/bwckschd.p_disp_detail_sched",
        "--term",
        "202508",
        "--sms-endpoint",
        "https://sms.example.com/send",
    ]
}

#[test]
fn parses_required_fields_and_defaults() {
    let config = Config::parse_from(minimal_args());
    assert_eq!(config.term, "202508");
    assert_eq!(config.base_interval_secs, 15);
    assert_eq!(config.fast_interval_secs, 5);
    assert_eq!(config.slow_interval_secs, 20);
    assert_eq!(config.open_course_interval_secs, 30);
    assert_eq!(config.fetch_concurrency, 50);
    assert_eq!(config.max_runtime(), Duration::from_secs(780));
}

#[test]
fn overrides_interval_via_flag() {
    let mut args = minimal_args();
    args.extend(["--fast-interval-secs", "1"]);
    let config = Config::parse_from(args);
    assert_eq!(config.fast_interval(), Duration::from_secs(1));
}
