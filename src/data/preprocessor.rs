// ============================================================
// Layer 4 - Text Preprocessor
// ============================================================
// Scrubs PDF extraction artefacts from text before tokenisation.
//
// Text pulled out of a PDF often contains:
//   - Typographic ligatures (U+FB01 "ﬁ" instead of "fi")
//   - Soft hyphens (U+00AD) left over from justification
//   - Words hyphenated across a line break ("rev-\nenue")
//   - Non-breaking and zero-width spaces, byte order marks
//   - Tabs, carriage returns and other control characters
//
// Left alone, "proﬁt" and "profit" would become two different
// vocabulary entries, and "rev" + "enue" two meaningless ones.
//
// Cleaning steps (applied in order):
//   1. Expand ligatures, drop soft hyphens
//   2. Map whitespace variants and control chars to a space
//   3. Join words hyphenated across a line break
//   4. Collapse runs of spaces, trim the ends
//
// The same function runs on corpus sentences and on report
// paragraphs, so both sides of the model see identical text.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string for downstream tokenisation.
    pub fn clean(&self, text: &str) -> String {

        // ── Step 1: Ligatures and soft hyphens ───────────────────────────────
        let mut step1 = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '\u{FB00}' => step1.push_str("ff"),
                '\u{FB01}' => step1.push_str("fi"),
                '\u{FB02}' => step1.push_str("fl"),
                '\u{FB03}' => step1.push_str("ffi"),
                '\u{FB04}' => step1.push_str("ffl"),
                // Soft hyphen is invisible when rendered
                '\u{00AD}' => {}
                c => step1.push(c),
            }
        }

        // ── Step 2: Normalise whitespace and control characters ───────────────
        // Newlines survive this step so step 3 can see line breaks.
        // A CRLF pair is one line break, a lone CR is treated as one too
        let step2: String = step1
            .replace("\r\n", "\n")
            .chars()
            .map(|c| match c {
                '\t' | '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                '\r' => '\n',
                c if c.is_control() && c != '\n' => ' ',
                c => c,
            })
            .collect();

        // ── Step 3: Re-join words broken across lines ─────────────────────────
        // "rev-\nenue" → "revenue", only when letters sit on both sides
        let chars: Vec<char> = step2.chars().collect();
        let mut step3 = String::with_capacity(step2.len());
        let mut i = 0usize;
        while i < chars.len() {
            let broken_word = chars[i] == '-'
                && i > 0
                && chars[i - 1].is_alphabetic()
                && chars.get(i + 1) == Some(&'\n')
                && chars.get(i + 2).is_some_and(|c| c.is_alphabetic());

            if broken_word {
                i += 2;
                continue;
            }
            step3.push(if chars[i] == '\n' { ' ' } else { chars[i] });
            i += 1;
        }

        // ── Step 4: Collapse spaces ───────────────────────────────────────────
        let mut out        = String::with_capacity(step3.len());
        let mut last_space = false;
        for c in step3.chars() {
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        out.trim().to_string()
    }
}

/// Implement Default so Preprocessor can be created with Preprocessor::default()
impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("net   sales\t\tgrew"), "net sales grew");
    }

    #[test]
    fn test_expands_ligatures() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("pro\u{FB01}t and cash\u{FB02}ow"), "profit and cashflow");
    }

    #[test]
    fn test_joins_hyphenated_line_break() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("total rev-\nenue rose"), "total revenue rose");
        assert_eq!(p.clean("total rev-\r\nenue rose"), "total revenue rose");
        assert_eq!(p.clean("total rev-\renue rose"), "total revenue rose");
        // A real dash between words is kept
        assert_eq!(p.clean("year-on-year"), "year-on-year");
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("first line\r\nsecond\u{00AD} line"), "first line second line");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
        assert_eq!(p.clean(" \u{200B}\n "), "");
    }
}
