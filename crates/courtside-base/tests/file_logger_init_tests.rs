use courtside_base::init_file_logger;
use std::fs;

// Installing the global logger is once per process, so this lives in its own test binary.
#[test]
fn test_init_file_logger_routes_log_macros() {
    let test_dir =
        std::env::temp_dir().join(format!("courtside-log-test-{}-init", std::process::id()));
    let _ = fs::remove_dir_all(&test_dir);

    init_file_logger(&test_dir).expect("Failed to install file logger");
    log::warn!("frame dropped");
    log::logger().flush();

    let entries: Vec<_> = fs::read_dir(&test_dir).unwrap().flatten().collect();
    assert_eq!(entries.len(), 1);
    let content = fs::read_to_string(entries[0].path()).unwrap();
    assert!(content.contains("[WARN]"));
    assert!(content.contains("frame dropped"));

    // second call is ignored, not an error
    init_file_logger(&test_dir).expect("Repeated init should succeed");

    let _ = fs::remove_dir_all(&test_dir);
}
