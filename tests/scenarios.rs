use netcalc::prelude::*;
use netcalc::{schedule, transmission_time, utilization};

#[test]
fn gigabit_stop_and_wait_then_pipelined() {
    let tt = transmission_time(1000, 1000.0).unwrap();
    assert!((tt - 0.008).abs() < 1e-12);

    let plain = UtilizationInput::stop_and_wait(1000, 1000.0, 30.0);
    let u = utilization(&plain).unwrap();
    assert!((u - tt / (tt + 30.0)).abs() < 1e-15);

    let piped = utilization(&plain.with_window(5020)).unwrap();
    assert!((piped / u - 5.02).abs() < 1e-12);
}

#[test]
fn shared_link_with_a_large_and_a_small_file() {
    let config = MultiplexConfig {
        total_link_rate_mbps: 5.2,
        sharing_computers_count: 2,
        starting_time_seconds: 0.0,
        file_sizes_bytes: vec![mib_to_bytes(3), kib_to_bytes(165)],
        packet_payload_size_bytes: 1000,
        packet_header_size_bytes: 24,
    };

    let plan = MultiplexingScheduler::new(config.clone()).unwrap().run().unwrap();
    let needed: Vec<u64> = plan.jobs().iter().map(|j| j.job.needed_packets).collect();
    assert_eq!(needed, vec![169, 3146]);

    let completions = schedule(&config).unwrap();
    assert_eq!(completions.len(), 2);
    assert_eq!(completions[0].turn_order, 1);
    assert_eq!(completions[1].turn_order, 0);
    assert!(completions[0].completion_time_seconds < completions[1].completion_time_seconds);
    assert!((completions[0].completion_time_seconds - 0.53248).abs() < 1e-9);
}

#[test]
fn equal_packet_counts_keep_turn_order() {
    // 1001..=2000 bytes all need two packets
    let config = MultiplexConfig::default().with_files(vec![2000, 1500, 1001, 1999]);
    let turns: Vec<usize> = schedule(&config)
        .unwrap()
        .into_iter()
        .map(|c| c.turn_order)
        .collect();
    assert_eq!(turns, vec![0, 1, 2, 3]);
}

#[test]
fn completions_never_go_backwards() {
    let config = MultiplexConfig::default()
        .with_files(vec![9_000, 1_000, 9_500, 10_000, 3_000, 3_100, 50_000])
        .with_start(1.0);
    let completions = schedule(&config).unwrap();
    for pair in completions.windows(2) {
        assert!(pair[0].completion_time_seconds <= pair[1].completion_time_seconds);
    }
    assert!(completions[0].completion_time_seconds > 1.0);
}

#[test]
fn sender_count_must_match_files() {
    let config = MultiplexConfig::default().with_senders(5);
    assert_eq!(
        schedule(&config),
        Err(CalcError::SenderCountMismatch { senders: 5, files: 2 })
    );
}

#[test]
fn sizes_from_strings() {
    let sizes: Vec<u64> = "3MiB,165KiB"
        .split(',')
        .map(|s| parse_size(s).unwrap())
        .collect();
    assert_eq!(sizes, MultiplexConfig::default().file_sizes_bytes);
}
