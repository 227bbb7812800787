use std::collections::HashMap;
use std::path::PathBuf;

use easyflow_export::generate::CollisionPolicy;
use easyflow_web::config::AppConfig;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_nothing_is_set() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.bind.to_string(), "127.0.0.1:8501");
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert!(config.sender.is_none());
    assert_eq!(config.collisions, CollisionPolicy::Overwrite);
}

#[test]
fn reads_sender_and_collision_policy() {
    let config = AppConfig::from_lookup(lookup(&[
        ("EASYFLOW_BIND", "0.0.0.0:9000"),
        ("EASYFLOW_OUTPUT_DIR", "/tmp/notas"),
        ("EASYFLOW_SENDER_NAME", "Secretaría"),
        ("EASYFLOW_SENDER_EMAIL", "notas@example.com"),
        ("EASYFLOW_COLLISIONS", "Suffix"),
    ]))
    .unwrap();

    assert_eq!(config.bind.port(), 9000);
    assert_eq!(config.output_dir, PathBuf::from("/tmp/notas"));
    let sender = config.sender.unwrap();
    assert_eq!(sender.name, "Secretaría");
    assert_eq!(sender.phone, "");
    assert_eq!(config.collisions, CollisionPolicy::Suffix);
}

#[test]
fn rejects_bad_values() {
    assert!(AppConfig::from_lookup(lookup(&[("EASYFLOW_BIND", "nowhere")])).is_err());
    assert!(AppConfig::from_lookup(lookup(&[("EASYFLOW_COLLISIONS", "merge")])).is_err());
}
