//! Minimal memory formula and the human-readable report.
//!
//! ```text
//! min_memory_needed = global_buffers + (thread_buffers * max_connections)
//! total             = min_memory_needed + system_memory_size
//! ```

use tracing::debug;

use crate::catalogs::{FORMULA_REFERENCE, GLOBAL_BUFFERS, MAX_CONNECTIONS, THREAD_BUFFERS};
use crate::types::{BufferLine, MemoryOptions, MemoryReport, SettingMap, Verdict};
use crate::units::to_human_unit;

const OVER_TEXT: &str = "Over!!";
const SAFE_TEXT: &str = "Safe";

/// Numeric value of a setting, zero when absent or non-numeric.
pub fn setting_bytes(settings: &SettingMap, name: &str) -> u64 {
    settings.get(name).map(|v| v.as_bytes()).unwrap_or(0)
}

fn buffer_lines(settings: &SettingMap, group: &[&str]) -> Vec<BufferLine> {
    group
        .iter()
        .map(|name| BufferLine {
            name: name.to_string(),
            bytes: setting_bytes(settings, name),
        })
        .collect()
}

fn sum(lines: &[BufferLine]) -> u64 {
    lines.iter().fold(0u64, |acc, l| acc.saturating_add(l.bytes))
}

/// Compute the minimal memory formula for validated settings.
pub fn estimate(settings: &SettingMap, options: &MemoryOptions) -> MemoryReport {
    let global_buffers = buffer_lines(settings, GLOBAL_BUFFERS);
    let thread_buffers = buffer_lines(settings, THREAD_BUFFERS);
    let global_buffer_size = sum(&global_buffers);
    let thread_buffer_size = sum(&thread_buffers);
    let max_connections = setting_bytes(settings, MAX_CONNECTIONS);

    let minimal_memory =
        global_buffer_size.saturating_add(thread_buffer_size.saturating_mul(max_connections));
    let total_memory = minimal_memory.saturating_add(options.system_memory.bytes);

    // Equal to the machine memory still counts as safe.
    let verdict = if total_memory > options.machine_memory.bytes {
        Verdict::Over
    } else {
        Verdict::Safe
    };

    debug!(
        global_buffer_size,
        thread_buffer_size,
        max_connections,
        total_memory,
        ?verdict,
        "estimated memory"
    );

    MemoryReport {
        global_buffers,
        thread_buffers,
        global_buffer_size,
        thread_buffer_size,
        max_connections,
        minimal_memory,
        system_memory: options.system_memory.clone(),
        total_memory,
        machine_memory: options.machine_memory.clone(),
        verdict,
    }
}

/// Verdict suffix of the totals line, e.g. `> 4G (Over!!)`.
pub fn verdict_marker(report: &MemoryReport, color: bool) -> String {
    let (sign, text, ansi) = match report.verdict {
        Verdict::Over => (">", OVER_TEXT, "31;1"),
        Verdict::Safe => ("<", SAFE_TEXT, "32;1"),
    };
    if color {
        format!("{sign} {} (\x1b[{ansi}m{text}\x1b[m)", report.machine_memory)
    } else {
        format!("{sign} {} ({text})", report.machine_memory)
    }
}

/// Render the report in the fixed multi-line layout.
pub fn render(report: &MemoryReport, color: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("[ minimal memory ]".into());
    lines.push(format!("ref: {FORMULA_REFERENCE}"));
    lines.push(String::new());

    lines.push("global buffers".into());
    render_buffers(&mut lines, &report.global_buffers);
    lines.push(String::new());

    lines.push("thread buffers".into());
    render_buffers(&mut lines, &report.thread_buffers);
    lines.push(String::new());

    lines.push(format!("{:<34} {:>12}", MAX_CONNECTIONS, report.max_connections));
    lines.push(String::new());

    lines.push("min_memory_needed = global_buffers + (thread_buffers * max_connections)".into());
    lines.push(format!(
        "                  = {} + {} * {}",
        report.global_buffer_size, report.thread_buffer_size, report.max_connections
    ));
    lines.push(format!(
        "                  = {} ({})",
        report.minimal_memory,
        to_human_unit(report.minimal_memory)
    ));
    lines.push(String::new());

    lines.push(format!("system memory size = {}", report.system_memory));
    lines.push(String::new());

    lines.push("total require memory = min_memory_needed + system_memory_size".into());
    lines.push(format!(
        "                     = {} + {}",
        report.minimal_memory, report.system_memory.bytes
    ));
    lines.push(format!(
        "                     = {} ({}) {}",
        report.total_memory,
        to_human_unit(report.total_memory),
        verdict_marker(report, color)
    ));

    // Trailing newline after the totals line
    lines.push(String::new());
    lines.join("\n")
}

fn render_buffers(lines: &mut Vec<String>, buffers: &[BufferLine]) {
    for buffer in buffers {
        lines.push(format!(
            "  {:<32} {:>12}  {:>12}",
            buffer.name,
            buffer.bytes,
            to_human_unit(buffer.bytes)
        ));
    }
}
