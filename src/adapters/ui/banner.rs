//! Neon ASCII banner with a vertical gradient (TIKTOK-PILOT).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

const TITLE: [&str; 5] = [
    "█████ ███ █   █ █████  ███  █   █      ████  ███ █      ███  █████",
    "  █    █  █  █    █   █   █ █  █       █   █  █  █     █   █   █  ",
    "  █    █  ███     █   █   █ ███   ████ ████   █  █     █   █   █  ",
    "  █    █  █  █    █   █   █ █  █       █      █  █     █   █   █  ",
    "  █   ███ █   █   █    ███  █   █      █     ███ █████  ███    █  ",
];

/// Hot pink (#fe2c55).
const NEON_PINK: (u8, u8, u8) = (0xfe, 0x2c, 0x55);
/// Cyber cyan (#25f4ee).
const CYBER_CYAN: (u8, u8, u8) = (0x25, 0xf4, 0xee);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner from cyan to pink, then version and "Powered by Rust".
pub fn print_welcome() {
    let mut out = stdout();
    let total = TITLE.len();

    for (i, line) in TITLE.iter().enumerate() {
        let t = i as f64 / (total - 1) as f64;
        let (r, g, b) = lerp_rgb(CYBER_CYAN, NEON_PINK, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: NEON_PINK.0,
        g: NEON_PINK.1,
        b: NEON_PINK.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Powered by Rust\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(CYBER_CYAN, NEON_PINK, 0.0), CYBER_CYAN);
        assert_eq!(lerp_rgb(CYBER_CYAN, NEON_PINK, 1.0), NEON_PINK);
        assert_eq!(lerp_rgb((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
    }

    #[test]
    fn test_title_rows_same_width() {
        let width = TITLE[0].chars().count();
        assert!(TITLE.iter().all(|l| l.chars().count() == width));
    }
}
