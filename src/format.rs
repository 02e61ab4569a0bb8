//! Human-readable figures for CLI output.

/// Compact magnitude formatting: `1500` -> `"1.5K"`, `2_300_000` -> `"2.3M"`.
pub fn format_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Per-second rate: `format_number` plus a `/s` suffix.
pub fn format_rate(rate: f64) -> String {
    format!("{}/s", format_number(rate))
}

/// Binary-unit byte formatting with up to two decimals, trailing zeros
/// trimmed: `1536` -> `"1.5 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    const SIZES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(SIZES.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exp as i32);
    let mut s = format!("{value:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    format!("{s} {}", SIZES[exp])
}
