//! Terminal rendering of chain updates.
//!
//! Each update re-sends the full step list, so the printer tracks how
//! many it has already written and prints only the new tail.

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::chain::{ChainUpdate, TimedStep};

/// Incremental stdout renderer for one chain run.
pub struct StepPrinter {
    printed: usize,
}

impl StepPrinter {
    pub fn new() -> Self {
        Self { printed: 0 }
    }

    /// Print whatever this update added, and the total when present.
    pub fn render(&mut self, update: &ChainUpdate) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.render_to(update, &mut out)
    }

    pub fn render_to<W: Write>(&mut self, update: &ChainUpdate, out: &mut W) -> io::Result<()> {
        for step in update.steps.get(self.printed..).unwrap_or(&[]) {
            if step.label == "Final Answer" {
                write_final(step, out)?;
            } else {
                write_step(step, out)?;
            }
            self.printed += 1;
        }

        if let Some(total) = update.total_seconds {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                format!("Total thinking time: {total:.2} seconds").bold()
            )?;
        }
        Ok(())
    }
}

fn write_step<W: Write>(step: &TimedStep, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} {}  {}",
        "▸".dark_grey(),
        step.label.as_str().bold(),
        format!("({:.2}s)", step.seconds).dark_grey()
    )?;
    for line in step.content.lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}

fn write_final<W: Write>(step: &TimedStep, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}  {}",
        step.label.as_str().green().bold(),
        format!("({:.2}s)", step.seconds).dark_grey()
    )?;
    writeln!(out, "{}", step.content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(label: &str, content: &str, seconds: f64) -> TimedStep {
        TimedStep {
            label: label.into(),
            content: content.into(),
            seconds,
        }
    }

    fn rendered(printer: &mut StepPrinter, update: &ChainUpdate) -> String {
        let mut buf = Vec::new();
        printer.render_to(update, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prints_each_step_once_across_updates() {
        let mut printer = StepPrinter::new();

        let first = ChainUpdate {
            steps: vec![timed("Step 1: Look", "hmm", 1.0)],
            total_seconds: None,
        };
        let out = rendered(&mut printer, &first);
        assert!(out.contains("Step 1: Look"));
        assert!(out.contains("hmm"));

        let second = ChainUpdate {
            steps: vec![
                timed("Step 1: Look", "hmm", 1.0),
                timed("Step 2: Check", "aha", 0.5),
            ],
            total_seconds: None,
        };
        let out = rendered(&mut printer, &second);
        assert!(!out.contains("Step 1: Look"));
        assert!(out.contains("Step 2: Check"));

        // Re-rendering an already-seen update prints nothing.
        let out = rendered(&mut printer, &second);
        assert!(out.is_empty());
    }

    #[test]
    fn shorter_update_prints_nothing() {
        let mut printer = StepPrinter::new();
        let two = ChainUpdate {
            steps: vec![
                timed("Step 1: Look", "hmm", 1.0),
                timed("Step 2: Check", "aha", 0.5),
            ],
            total_seconds: None,
        };
        rendered(&mut printer, &two);

        // Updates normally only grow; a replayed shorter snapshot must
        // print nothing rather than panic.
        let one = ChainUpdate {
            steps: vec![timed("Step 1: Look", "hmm", 1.0)],
            total_seconds: None,
        };
        let out = rendered(&mut printer, &one);
        assert!(out.is_empty());
    }

    #[test]
    fn step_content_is_indented() {
        let mut printer = StepPrinter::new();
        let update = ChainUpdate {
            steps: vec![timed("Step 1: Split", "first line\nsecond line", 0.2)],
            total_seconds: None,
        };
        let out = rendered(&mut printer, &update);
        assert!(out.contains("    first line\n"));
        assert!(out.contains("    second line\n"));
    }

    #[test]
    fn final_answer_content_stays_flush() {
        let mut printer = StepPrinter::new();
        let update = ChainUpdate {
            steps: vec![
                timed("Step 1: Count", "c, a, t", 0.4),
                timed("Final Answer", "3", 0.1),
            ],
            total_seconds: Some(0.5),
        };
        let out = rendered(&mut printer, &update);
        assert!(out.contains("Final Answer"));
        assert!(out.contains("\n3\n"));
        assert!(!out.contains("    3"));
    }

    #[test]
    fn total_line_only_when_present() {
        let mut printer = StepPrinter::new();
        let without = ChainUpdate {
            steps: vec![timed("Step 1: Go", "x", 1.0)],
            total_seconds: None,
        };
        let out = rendered(&mut printer, &without);
        assert!(!out.contains("Total thinking time"));

        let with = ChainUpdate {
            steps: vec![timed("Step 1: Go", "x", 1.0)],
            total_seconds: Some(3.5),
        };
        let out = rendered(&mut printer, &with);
        assert!(out.contains("Total thinking time: 3.50 seconds"));
    }

    #[test]
    fn duration_shown_with_two_decimals() {
        let mut printer = StepPrinter::new();
        let update = ChainUpdate {
            steps: vec![timed("Step 1: Go", "x", 1.2345)],
            total_seconds: None,
        };
        let out = rendered(&mut printer, &update);
        assert!(out.contains("(1.23s)"));
    }
}
