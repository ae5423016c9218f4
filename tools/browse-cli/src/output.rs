//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use turbo_browse::ResourceStatus;
use turbo_filter::present::{DisplayList, PageLink};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print products, item range and the pagination bar.
    pub fn display_list(&self, list: &DisplayList) {
        if self.json {
            return;
        }
        if list.is_empty() {
            self.info("No products match these filters.");
            return;
        }

        let widths = [10, 40, 10];
        self.table_row(&["ID", "NAME", "PRICE"], &widths);
        for product in &list.products {
            let price = product.price.display_amount();
            self.table_row(&[product.id.as_str(), &product.name, &price], &widths);
        }

        let p = &list.pagination;
        println!();
        self.kv(
            "Showing",
            &format!("{}-{} of {}", p.start_item(), p.end_item(), p.total),
        );
        self.kv("Pages", &page_bar(&list.window, p.page));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Render a pagination window, highlighting the current page.
pub fn page_bar(window: &[PageLink], current: u32) -> String {
    window
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current => style(format!("[{}]", n)).bold().to_string(),
            other => other.label(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Status badge for resource states.
pub fn status_badge(status: &ResourceStatus) -> String {
    match status {
        ResourceStatus::Settled => style(status.name()).green().to_string(),
        ResourceStatus::Pending => style(status.name()).yellow().to_string(),
        ResourceStatus::Failed(_) => style(status.name()).red().to_string(),
        ResourceStatus::Idle => style(status.name()).dim().to_string(),
    }
}
