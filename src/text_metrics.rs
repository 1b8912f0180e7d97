//! Advance widths of the PDF base-14 Helvetica faces, used to measure and
//! wrap text in layout units (millimetres).

use serde::Serialize;

pub const PT_TO_MM: f32 = 25.4 / 72.0;
/// Baseline-to-baseline distance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
        }
    }
}

// AFM advance widths for code points 32..=126, in 1/1000 em.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // '{'..'~'
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const BULLET_WIDTH: u16 = 350;
const FALLBACK_WIDTH: u16 = 556;

fn advance(ch: char, face: FontFace) -> u16 {
    let table = match face {
        FontFace::Bold => &HELVETICA_BOLD,
        FontFace::Regular | FontFace::Italic => &HELVETICA,
    };
    match ch {
        ' '..='~' => table[ch as usize - 32],
        '\u{2022}' => BULLET_WIDTH,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in millimetres at `font_size` points.
pub fn measure_text_width(text: &str, font_size: f32, face: FontFace) -> f32 {
    if text.is_empty() || font_size <= 0.0 {
        return 0.0;
    }
    let units: u32 = text
        .chars()
        .filter(|ch| *ch != '\n')
        .map(|ch| advance(ch, face) as u32)
        .sum();
    units as f32 / 1000.0 * font_size * PT_TO_MM
}

/// Baseline advance in millimetres for one line at `font_size` points.
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR * PT_TO_MM
}

/// Greedy word wrap. Words longer than `max_width` are broken by character.
pub fn wrap_text(text: &str, font_size: f32, face: FontFace, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure_text_width(&candidate, font_size, face) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure_text_width(word, font_size, face) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, font_size, face, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn break_word(word: &str, font_size: f32, face: FontFace, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if current.chars().count() > 1 && measure_text_width(&current, font_size, face) > max_width
        {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    pieces.push(current);
    pieces
}
