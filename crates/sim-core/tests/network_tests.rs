//! Integration tests for the emulator core with file-backed logs.

use sim_core::{
    CallStatus, Directory, FileLogBook, LogChannel, LoopbackAuthenticator, Network, SimError,
    SmsStatus,
};
use std::fs;
use std::path::Path;

const ALICE: &str = "123456789012345";
const BOB: &str = "987654321098765";
const CAROL: &str = "111122223333444";

fn file_network(dir: &Path) -> Network<LoopbackAuthenticator, FileLogBook> {
    Network::new(
        Directory::sample(),
        LoopbackAuthenticator::seeded(99),
        FileLogBook::new(dir),
    )
}

fn log_lines(dir: &Path, channel: LogChannel) -> Vec<String> {
    fs::read_to_string(dir.join(channel.file_name()))
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_every_directory_subscriber_registers() {
    let dir = tempfile::tempdir().unwrap();
    let mut net = file_network(dir.path());

    for imsi in [ALICE, BOB, CAROL] {
        let outcome = net.register(imsi).unwrap();
        let tmsi: u32 = outcome.value.tmsi.as_str().parse().unwrap();
        assert!((10_000..=99_999).contains(&tmsi));
        assert!(net.is_registered(imsi));
    }

    assert_eq!(log_lines(dir.path(), LogChannel::Communication).len(), 3);
}

#[test]
fn test_example_from_single_entry_directory() {
    let dir = tempfile::tempdir().unwrap();
    let directory = Directory::from_entries([(ALICE, "secretkey1")]).unwrap();
    let mut net = Network::new(
        directory,
        LoopbackAuthenticator::new(),
        FileLogBook::new(dir.path()),
    );

    let outcome = net.register(ALICE).unwrap();
    assert_eq!(outcome.value.tmsi.as_str().len(), 5);

    let err = net.register("000000000000000").unwrap_err();
    assert!(matches!(err, SimError::IdentityNotFound(_)));
    assert_eq!(net.registry().count(), 1);
}

#[test]
fn test_full_session_log_contents() {
    let dir = tempfile::tempdir().unwrap();
    let mut net = file_network(dir.path());

    let alice = net.register(ALICE).unwrap().value;
    net.register(BOB).unwrap();

    assert!(net.place_call(ALICE, BOB).value.is_connected());
    assert!(matches!(
        net.place_call(ALICE, CAROL).value,
        CallStatus::Rejected(SimError::CalleeUnregistered(_))
    ));
    assert!(net.send_sms(ALICE, BOB, "see you at 5").value.is_sent());
    assert!(matches!(
        net.send_sms(ALICE, CAROL, "lost").value,
        SmsStatus::Rejected(SimError::CalleeUnregistered(_))
    ));

    let comm: Vec<String> = log_lines(dir.path(), LogChannel::Communication)
        .into_iter()
        .map(|l| l[22..].to_string())
        .collect();
    assert_eq!(
        comm[0],
        format!(
            "SIM {} authenticated successfully. Assigned TMSI {}",
            ALICE, alice.tmsi
        )
    );
    assert_eq!(comm[2], format!("Call: {} ➝ {} (Connected)", ALICE, BOB));
    assert_eq!(
        comm[3],
        format!("Call: {} ➝ {} (Failed - Not Registered)", ALICE, CAROL)
    );
    assert_eq!(comm[4], format!("SMS: {} ➝ {}: see you at 5", ALICE, BOB));
    assert_eq!(comm.len(), 5);

    let sms = log_lines(dir.path(), LogChannel::Sms);
    assert_eq!(sms.len(), 1);
    assert!(sms[0].ends_with(&format!("From {} ➝ {}: see you at 5", ALICE, BOB)));

    assert_eq!(net.view_log().unwrap().lines().count(), 5);
}

#[test]
fn test_unwritable_log_dir_is_non_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut net = file_network(&dir.path().join("does-not-exist"));

    let outcome = net.register(ALICE).unwrap();
    assert_eq!(outcome.warnings.len(), 1);
    assert!(net.is_registered(ALICE));

    let sms = net.send_sms(ALICE, ALICE, "hello me");
    assert!(sms.value.is_sent());
    assert_eq!(sms.warnings.len(), 2);

    assert!(net.view_log().is_err());
}

#[test]
fn test_directory_file_drives_registration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subscribers.json");
    fs::write(&path, r#"{"001010123456789": "lab-ki"}"#).unwrap();

    let mut net = Network::new(
        Directory::from_json_file(&path).unwrap(),
        LoopbackAuthenticator::seeded(5),
        FileLogBook::new(dir.path()),
    );

    assert!(net.register("001010123456789").is_ok());
    assert!(matches!(
        net.register(ALICE),
        Err(SimError::IdentityNotFound(_))
    ));
}

#[test]
fn test_multiline_sms_body_stays_on_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut net = file_network(dir.path());
    net.register(ALICE).unwrap();
    let before = log_lines(dir.path(), LogChannel::Communication).len()
        + log_lines(dir.path(), LogChannel::Sms).len();

    let body = format!(
        "hi\n[2024-01-01 00:00:00] SIM {} authenticated successfully. Assigned TMSI 00000",
        BOB
    );
    assert!(net.send_sms(ALICE, ALICE, &body).value.is_sent());

    let comm = log_lines(dir.path(), LogChannel::Communication);
    let sms = log_lines(dir.path(), LogChannel::Sms);
    assert_eq!(comm.len() + sms.len(), before + 2);
    assert!(comm.iter().all(|l| !l[22..].starts_with("SIM 987654321098765")));
    assert!(!net.is_registered(BOB));
}
