use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Buffers allocated once for the whole server, independent of connection count.
pub const GLOBAL_BUFFERS: &[&str] = &[
    "key_buffer_size",
    "innodb_buffer_pool_size",
    "innodb_log_buffer_size",
    "innodb_additional_mem_pool_size",
    "net_buffer_length",
];

/// Buffers allocated per client connection.
pub const THREAD_BUFFERS: &[&str] = &[
    "sort_buffer_size",
    "myisam_sort_buffer_size",
    "read_buffer_size",
    "join_buffer_size",
    "read_rnd_buffer_size",
];

/// Settings bounded by the server process heap.
pub const HEAP_LIMIT: &[&str] = &[
    "innodb_buffer_pool_size",
    "key_buffer_size",
    "sort_buffer_size",
    "read_buffer_size",
    "read_rnd_buffer_size",
];

/// Settings that size the InnoDB redo log.
pub const INNODB_LOG_FILES: &[&str] = &["innodb_buffer_pool_size", "innodb_log_files_in_group"];

pub const OTHER_SETTINGS: &[&str] = &[MAX_CONNECTIONS];

pub const MAX_CONNECTIONS: &str = "max_connections";

/// Union of every group, sorted and deduplicated.
pub static REQUIRED_SETTINGS: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    [
        GLOBAL_BUFFERS,
        THREAD_BUFFERS,
        HEAP_LIMIT,
        INNODB_LOG_FILES,
        OTHER_SETTINGS,
    ]
    .iter()
    .flat_map(|group| group.iter().copied())
    .collect()
});

/// Source of the minimal memory formula, printed in the report header.
pub const FORMULA_REFERENCE: &str = "High Performance MySQL, Solving Memory Bottlenecks, p125";

/// The only option file section the reader looks at.
pub const SERVER_SECTION: &str = "mysqld";

pub const DEFAULT_MACHINE_MEMORY: &str = "4G";
pub const DEFAULT_SYSTEM_MEMORY: &str = "256M";
