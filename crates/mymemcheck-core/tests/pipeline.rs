use std::io::Write;

use mymemcheck_core::units::{KBYTE, MBYTE};
use mymemcheck_core::{
    estimate, parse_string, read_settings, render, validate, Error, MemoryOptions, MemoryReport,
    SettingValue, Verdict,
};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Helper: full pipeline (read → validate → estimate)
// ---------------------------------------------------------------------------

const SMALL_SERVER: &str = "\
[client]
sort_buffer_size = 64M

[mysqld]
key_buffer_size=16M
innodb_buffer_pool_size=128M
innodb_log_buffer_size=8M
innodb_additional_mem_pool_size=8M
net_buffer_length=16K
sort_buffer_size=2M
myisam_sort_buffer_size=8M
read_buffer_size=128K
join_buffer_size=128K
read_rnd_buffer_size=256K
innodb_log_files_in_group=2
max_connections=100
";

fn write_cnf(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(content.as_bytes()).expect("write");
    file
}

fn pipeline(content: &str, options: &MemoryOptions) -> mymemcheck_core::Result<MemoryReport> {
    let file = write_cnf(content);
    let settings = read_settings(file.path())?;
    validate(&settings)?;
    Ok(estimate(&settings, options))
}

#[test]
fn small_server_totals() {
    let report = pipeline(SMALL_SERVER, &MemoryOptions::default()).unwrap();

    let global = 16 * MBYTE + 128 * MBYTE + 8 * MBYTE + 8 * MBYTE + 16 * KBYTE;
    let thread = 2 * MBYTE + 8 * MBYTE + 128 * KBYTE + 128 * KBYTE + 256 * KBYTE;
    assert_eq!(report.global_buffer_size, global);
    assert_eq!(report.thread_buffer_size, thread);
    assert_eq!(report.max_connections, 100);
    assert_eq!(report.minimal_memory, global + thread * 100);
    assert_eq!(report.total_memory, global + thread * 100 + 256 * MBYTE);

    // thread buffers alone pass 1G at 100 connections, but the total stays under 4G
    assert!(thread * 100 > 1024 * MBYTE);
    assert_eq!(report.verdict, Verdict::Safe);
}

#[test]
fn small_server_on_one_gigabyte_machine_is_over() {
    let options = MemoryOptions {
        machine_memory: "1G".parse().unwrap(),
        ..MemoryOptions::default()
    };
    let report = pipeline(SMALL_SERVER, &options).unwrap();
    assert_eq!(report.verdict, Verdict::Over);

    let text = render(&report, false);
    assert!(text.contains("= 1537228800 (1.432 [G]) > 1G (Over!!)"), "{text}");
}

#[test]
fn client_section_does_not_leak() {
    let settings = parse_string(SMALL_SERVER);
    assert_eq!(
        settings.get("sort_buffer_size"),
        Some(&SettingValue::Bytes(2 * MBYTE))
    );
}

#[test]
fn missing_max_connections_aborts_before_estimate() {
    let content = SMALL_SERVER.replace("max_connections=100\n", "");
    match pipeline(&content, &MemoryOptions::default()) {
        Err(Error::MissingSettings(names)) => assert_eq!(names, vec!["max_connections"]),
        other => panic!("expected MissingSettings, got {other:?}"),
    }
}

#[test]
fn setting_above_first_header_is_reported_missing() {
    let content = format!(
        "max_connections=100\n{}",
        SMALL_SERVER.replace("max_connections=100\n", "")
    );
    match pipeline(&content, &MemoryOptions::default()) {
        Err(Error::MissingSettings(names)) => assert_eq!(names, vec!["max_connections"]),
        other => panic!("expected MissingSettings, got {other:?}"),
    }
}

#[test]
fn aliased_buffer_satisfies_validation() {
    let content = SMALL_SERVER.replace("sort_buffer_size=2M", "sort_buffer 256K");
    let report = pipeline(&content, &MemoryOptions::default()).unwrap();
    assert_eq!(report.thread_buffers[0].name, "sort_buffer_size");
    assert_eq!(report.thread_buffers[0].bytes, 262144);
}

#[test]
fn unreadable_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_settings(&dir.path().join("absent.cnf")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn render_lists_every_buffer_in_group_order() {
    let report = pipeline(SMALL_SERVER, &MemoryOptions::default()).unwrap();
    let text = render(&report, false);
    let names: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("  ") && !l.trim_start().starts_with('='))
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(
        names,
        vec![
            "key_buffer_size",
            "innodb_buffer_pool_size",
            "innodb_log_buffer_size",
            "innodb_additional_mem_pool_size",
            "net_buffer_length",
            "sort_buffer_size",
            "myisam_sort_buffer_size",
            "read_buffer_size",
            "join_buffer_size",
            "read_rnd_buffer_size",
        ]
    );
    assert!(text.contains("= 1268793344 (1.182 [G])"));
    assert!(text.contains("< 4G (Safe)"));
}
