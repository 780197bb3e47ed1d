//! Text rendering of results and the append-only run log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Format rows as left-aligned columns.
///
/// Each column is as wide as its widest cell plus `spaces`. Trailing
/// padding is trimmed and every row ends with a newline.
///
/// ```
/// use maexchen::evaluation::format_table;
///
/// let rows = vec![
///     vec!["a".to_string(), "bbb".to_string()],
///     vec!["cc".to_string(), "d".to_string()],
/// ];
/// assert_eq!(format_table(&rows, 2), "a   bbb\ncc  d\n");
/// ```
#[must_use]
pub fn format_table(rows: &[Vec<String>], spaces: usize) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                + spaces
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str(&format!("{:<width$}", cell, width = *width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render one run-log block.
///
/// `roster_names` lists the strategy name of every seat; equal names are
/// grouped as `- Name x count` in order of first appearance.
#[must_use]
pub fn run_log_block(started_at: SystemTime, roster_names: &[String], repetitions: u32, summary: &str) -> String {
    let mut counted: Vec<(&str, usize)> = Vec::new();
    for name in roster_names {
        match counted.iter_mut().find(|(n, _)| *n == name.as_str()) {
            Some(entry) => entry.1 += 1,
            None => counted.push((name.as_str(), 1)),
        }
    }

    let timestamp = started_at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut block = format!("\n\n{} Simulation started.\n", timestamp);
    block.push_str(&format!("repetitions = {}\nplayers:\n", repetitions));
    for (name, count) in counted {
        block.push_str(&format!(" - {} x {}\n", name, count));
    }
    block.push_str("results:\n");
    block.push_str(summary);
    block
}

/// Append a run-log block to `path`, creating the file if needed.
///
/// The parent directory must already exist.
pub fn append_run_log(
    path: &Path,
    started_at: SystemTime,
    roster_names: &[String],
    repetitions: u32,
    summary: &str,
) -> std::io::Result<()> {
    let block = run_log_block(started_at, roster_names, repetitions, summary);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(block.as_bytes())?;
    log::info!("Appended run log to {}", path.display());
    Ok(())
}

/// Whether the directory that would hold `path` exists.
#[must_use]
pub fn parent_dir_exists(path: &Path) -> bool {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.is_dir(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_table_pads_columns() {
        let rows = vec![
            names(&["Player", "Wins"]),
            names(&["ShowOff (12)", "7"]),
        ];
        assert_eq!(format_table(&rows, 2), "Player        Wins\nShowOff (12)  7\n");
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_table(&[], 2), "");
    }

    #[test]
    fn test_run_log_block() {
        let started = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let block = run_log_block(started, &names(&["Dummy", "Threshold", "Dummy"]), 50, "table\n");
        assert_eq!(
            block,
            "\n\n1700000000 Simulation started.\nrepetitions = 50\nplayers:\n - Dummy x 2\n - Threshold x 1\nresults:\ntable\n"
        );
    }

    #[test]
    fn test_append_run_log() {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let path = std::env::temp_dir().join(format!("maexchen-runlog-{}-{}.txt", std::process::id(), nanos));

        append_run_log(&path, UNIX_EPOCH, &names(&["Dummy"]), 1, "first\n").unwrap();
        append_run_log(&path, UNIX_EPOCH, &names(&["Dummy"]), 2, "second\n").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(contents.contains("first\n"));
        assert!(contents.ends_with("second\n"));
        assert_eq!(contents.matches("Simulation started.").count(), 2);
    }

    #[test]
    fn test_parent_dir_exists() {
        assert!(parent_dir_exists(Path::new("log.txt")));
        assert!(parent_dir_exists(&std::env::temp_dir().join("log.txt")));
        assert!(!parent_dir_exists(Path::new("/definitely/not/here/log.txt")));
    }
}
