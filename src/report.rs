//! Result rendering
//!
//! Everything here is written to standard error: standard output belongs to
//! the ring once it has been built.

use crate::protocol::Histogram;
use crate::ring::RingPosition;
use console::style;
use std::io::{self, Write};
use std::path::Path;

/// Format a count with a comma between each group of three digits
fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Number of bar characters for `count`, scaled so `max` gets `bar_length`
///
/// Always at least one, including when every bucket is empty.
pub fn bar_width(count: u64, max: u64, bar_length: usize) -> usize {
    if max == 0 {
        return 1;
    }
    let scaled = u128::from(count) * bar_length as u128 / u128::from(max);
    (scaled as usize).max(1)
}

/// Write the per-letter histogram for the origin
pub fn write_results<W: Write>(
    out: &mut W,
    histogram: &Histogram,
    position: RingPosition,
    max_count: u64,
    bar_length: usize,
) -> io::Result<()> {
    let width = histogram
        .buckets
        .iter()
        .map(|c| c.to_string().len())
        .max()
        .unwrap_or(1);

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        style(format!(
            "Processing complete on ring with {} processes",
            position.ring_size
        ))
        .for_stderr()
        .green()
        .bold()
    )?;
    writeln!(out)?;

    for (letter, count) in histogram.iter() {
        writeln!(
            out,
            "Process {} got char {}: {:<width$} | {}",
            position.rank,
            letter,
            count,
            "*".repeat(bar_width(count, max_count, bar_length)),
            width = width
        )?;
    }

    writeln!(out, "{}", style("─".repeat(50)).for_stderr().dim())?;
    writeln!(
        out,
        "  {} {}",
        style("Total characters:").for_stderr().bold(),
        format_number(histogram.total)
    )?;
    writeln!(
        out,
        "  {} {}",
        style("Letters:").for_stderr().bold(),
        format_number(histogram.letters_total())
    )?;
    writeln!(out)?;
    Ok(())
}

/// Print the final histogram to standard error
pub fn print_results(
    histogram: &Histogram,
    position: RingPosition,
    bar_length: usize,
) -> io::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_results(&mut out, histogram, position, histogram.max_bucket(), bar_length)
}

/// Print a header before the ring is built
pub fn print_header(dir: &Path, ring_size: usize, files: usize) {
    eprintln!();
    eprintln!(
        "{} {}",
        style("char-ring").for_stderr().cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!("{}", style("─".repeat(50)).for_stderr().dim());
    eprintln!("  {} {}", style("Directory:").for_stderr().bold(), dir.display());
    eprintln!("  {} {}", style("Ring size:").for_stderr().bold(), ring_size);
    eprintln!("  {} {}", style("Files:").for_stderr().bold(), format_number(files as u64));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CountMode;
    use crate::ring::Rank;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(123456), "123,456");
        assert_eq!(format_number(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(10, 10, 70), 70);
        assert_eq!(bar_width(5, 10, 70), 35);
        assert_eq!(bar_width(0, 10, 70), 1);
        assert_eq!(bar_width(0, 0, 70), 1);
        assert_eq!(bar_width(u64::MAX, u64::MAX, 70), 70);
    }

    #[test]
    fn test_write_results() {
        let mut h = Histogram::new();
        h.record_all(b"aaaab 12", CountMode::AllBytes);
        let position = RingPosition::new(Rank::ORIGIN, 3);

        let mut out = Vec::new();
        write_results(&mut out, &h, position, h.max_bucket(), 8).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("ring with 3 processes"));
        assert!(text.contains("Process 1 got char a: 4 | ********\n"));
        assert!(text.contains("Process 1 got char b: 1 | **\n"));
        assert!(text.contains("Process 1 got char z: 0 | *\n"));
        assert_eq!(text.matches("got char").count(), 26);
        assert!(text.contains(" 8\n"));
    }
}
