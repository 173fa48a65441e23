use crate::terminal::colors;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "pcislot::print";
pub const RAW_FIELD: &str = "raw_msg";

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// Tool name and version, framed by a heavy rule.
pub fn banner() {
    let title: String = format!(" pcislot {} ", env!("CARGO_PKG_VERSION"));
    let subtitle: &str = " proxmox pci slot inspector ";
    let used: usize = UnicodeWidthStr::width(title.as_str()) + UnicodeWidthStr::width(subtitle) + 3;
    let rule: String = "━".repeat(TOTAL_WIDTH.saturating_sub(used));
    print(&format!(
        "{}{}{}{}{}",
        "┏".color(colors::SEPARATOR),
        title.color(colors::PRIMARY).bold(),
        "┃".color(colors::SEPARATOR),
        subtitle.color(colors::ACCENT),
        format!("{rule}┓").color(colors::SEPARATOR)
    ));
}

/// Section title, left aligned and padded with a thin rule.
pub fn header(msg: &str) {
    let title: String = format!("▌{} ", msg.to_uppercase());
    let rule: String = "╌".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(&title)));
    print(&format!(
        "{}{}",
        title.color(colors::PRIMARY).bold(),
        rule.color(colors::SEPARATOR)
    ));
}

pub fn fat_separator() {
    print(&format!("{}", "━".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    print(&format!(
        "{} {}",
        "»".color(colors::ACCENT),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
    print(&output);
}

/// Prints `key....: value` rows as one tree level, dot-padding keys to the
/// longest one.
pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    let key_width: usize = key_value_pair
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(0);

    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(key_width - key.len()).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

/// Indented verbatim block, used for multi-line enumerator output.
pub fn indented_block(text: &str) {
    for line in text.lines() {
        print(&format!("    {}", line.color(colors::SEPARATOR)));
    }
}

pub fn centerln(msg: &str) {
    let pad: usize = TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{}{}", " ".repeat(pad), msg));
}

const EMPTY_SLOT: [&str; 5] = [
    "┌──────────────────────┐",
    "│  ▯ ▯ ▯ ▯ ▯ ▯ ▯ ▯ ▯  │",
    "│    nothing found     │",
    "│  ▯ ▯ ▯ ▯ ▯ ▯ ▯ ▯ ▯  │",
    "└──┬┬┬┬┬┬┬┬┬┬┬┬┬┬┬┬┬┬─┘",
];

/// An empty expansion card, shown when a listing has no entries.
pub fn no_results() {
    for line in EMPTY_SLOT {
        centerln(&format!("{}", line.color(colors::MISSING)));
    }
}

pub fn end_of_program() {
    fat_separator();
}
