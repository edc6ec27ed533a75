//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use remod_ops::OperationResult;
use remod_types::{ColorChoice, ReinstallReport, TaskStatus};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_table(result)
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    /// Render as formatted output
    fn render_table(&self, result: &OperationResult) -> io::Result<()> {
        match result {
            OperationResult::Reinstall(report) => self.render_reinstall_report(report),
            OperationResult::Success(message) => self.render_success_message(message),
        }
    }

    /// Render reinstall report
    fn render_reinstall_report(&self, report: &ReinstallReport) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Outcome").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("Remove old dependencies"),
            self.format_task_status(&report.removal.status),
            Cell::new(format_duration(report.removal.elapsed_ms)),
        ]);
        table.add_row(vec![
            Cell::new("Install"),
            self.format_task_status(&report.install.status),
            Cell::new(format_duration(report.install.elapsed_ms)),
        ]);

        println!("{table}");

        if report.time_saved_ms > 0 {
            let headline = format!(
                "You saved {} by removing in the background",
                format_duration(report.time_saved_ms)
            );
            println!("{}", self.style_headline(&headline));
            if let Some(total) = report.total_saved_ms {
                println!("Total saved so far: {}", format_duration(total));
            }
        }

        println!("Done in {}", format_duration(report.duration_ms));
        Ok(())
    }

    /// Render success message
    fn render_success_message(&self, message: &str) -> io::Result<()> {
        println!("{message}");
        Ok(())
    }

    /// Format task status as colored cell
    fn format_task_status(&self, status: &TaskStatus) -> Cell {
        match status {
            TaskStatus::Completed => Cell::new("Completed").fg(Color::Green),
            TaskStatus::Skipped => Cell::new("Skipped").fg(Color::Yellow),
            TaskStatus::Failed { message } => {
                Cell::new(format!("Failed: {message}")).fg(Color::Red)
            }
        }
    }

    /// Style the savings headline
    fn style_headline(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().bold().green().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

/// Format a millisecond count in human readable form
pub(crate) fn format_duration(ms: u64) -> String {
    if ms >= 60_000 {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) as f64 / 1000.0;
        format!("{minutes}m {seconds:.1}s")
    } else if ms >= 1000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{ms}ms")
    }
}
