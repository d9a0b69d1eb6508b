//! Spanish-oriented phonetic encoding
//!
//! Maps names that sound alike in Spanish to the same code, so "Cintia" and
//! "Sintia", or "Ximena" and "Jimena", compare equal.
//!
//! Encoding steps:
//! 1. Lowercase, strip diacritics (NFD, drop combining marks), keep `a-z` only
//! 2. Ordered substitutions:
//!    `h` → ∅, `w`/`v` → `b`, `z` → `s`, `c[ei]` → `s[ei]`, `c`/`k`/`q` → `k`,
//!    `g[ei]` → `j[ei]`, `x` → `j`, `ll` → `i`, `y` → `i`
//! 3. Collapse runs of the same letter

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Encode `text` into its phonetic code. Total: empty input yields `""`.
pub fn encode(text: &str) -> String {
    let mut chars: Vec<char> = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    if chars.is_empty() {
        return String::new();
    }

    // Order matters: each pass sees the output of the previous one
    chars.retain(|&c| c != 'h');
    replace_each(&mut chars, |c| matches!(c, 'w' | 'v'), 'b');
    replace_each(&mut chars, |c| c == 'z', 's');
    replace_before_front_vowel(&mut chars, 'c', 's');
    replace_each(&mut chars, |c| matches!(c, 'c' | 'k' | 'q'), 'k');
    replace_before_front_vowel(&mut chars, 'g', 'j');
    replace_each(&mut chars, |c| c == 'x', 'j');
    merge_double_l(&mut chars);
    replace_each(&mut chars, |c| c == 'y', 'i');

    chars.dedup();
    chars.into_iter().collect()
}

#[inline]
fn replace_each(chars: &mut [char], pred: impl Fn(char) -> bool, to: char) {
    for c in chars.iter_mut() {
        if pred(*c) {
            *c = to;
        }
    }
}

/// Replace `from` with `to` when followed by `e` or `i`.
fn replace_before_front_vowel(chars: &mut [char], from: char, to: char) {
    for i in 1..chars.len() {
        if chars[i - 1] == from && matches!(chars[i], 'e' | 'i') {
            chars[i - 1] = to;
        }
    }
}

/// Replace each non-overlapping `ll` with a single `i`, left to right.
fn merge_double_l(chars: &mut Vec<char>) {
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == 'l' && chars.get(i + 1) == Some(&'l') {
            out.push('i');
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    *chars = out;
}
