use crate::ui::{Icons, theme};
use owo_colors::OwoColorize;
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `HYGDB_QUIET=1` silences everything but errors
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("HYGDB_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

pub fn banner(title: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::TELESCOPE, title.style(theme().heading.clone()));
}

pub fn step(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::GEAR.style(theme().faint.clone()), text);
}

pub fn detail(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!("   {} {}", format!("{}:", label).style(theme().faint.clone()), value);
}

pub fn magnitude_range(label: &str, first: f64, last: f64) {
    detail(
        &format!("{} magnitude range", label),
        &format!("{:.2} to {:.2}", first, last).style(theme().accent.clone()).to_string(),
    );
}

pub fn success(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, text.style(theme().good.clone()));
}

pub fn warn(text: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("{} {}", Icons::WARN, text.style(theme().caution.clone()));
}

pub fn error(text: &str) {
    eprintln!("{} {}", Icons::CROSS, text.style(theme().bad.clone()));
}
