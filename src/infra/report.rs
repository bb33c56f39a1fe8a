// ============================================================
// Layer 6 - Prediction Report
// ============================================================
// Writes scored paragraphs as CSV, one row per paragraph in
// document order:
//
//   page_number,paragraph_number,label,score,text
//   1,1,1,0.812345,"Net sales rose 12 percent"
//   2,2,-1,-0.430211,"Operating loss widened"
//
// The text column is always quoted; embedded quotes are doubled.

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use crate::domain::document::ScoredParagraph;

const HEADER: &str = "page_number,paragraph_number,label,score,text";

pub fn write_report<W: Write>(rows: &[ScoredParagraph], mut out: W) -> Result<()> {
    writeln!(out, "{HEADER}")?;
    for row in rows {
        let p = &row.paragraph;
        writeln!(
            out,
            "{},{},{},{:.6},{}",
            p.page_number,
            p.paragraph_number,
            row.label.value(),
            row.score,
            quote(&p.text),
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_report_file(rows: &[ScoredParagraph], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Cannot create report '{}'", path.display()))?;
    write_report(rows, BufWriter::new(file))?;

    tracing::info!("Wrote {} scored paragraphs to '{}'", rows.len(), path.display());
    Ok(())
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Paragraph;
    use crate::domain::labeled_example::Sentiment;

    #[test]
    fn test_rows_in_paragraph_order() {
        let rows = vec![
            ScoredParagraph::new(Paragraph::new(1, 1, "Sales rose"), Sentiment::Positive, 0.5),
            ScoredParagraph::new(Paragraph::new(2, 2, "He said \"no\""), Sentiment::Negative, -0.25),
        ];
        let mut buf = Vec::new();
        write_report(&rows, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "page_number,paragraph_number,label,score,text\n\
             1,1,1,0.500000,\"Sales rose\"\n\
             2,2,-1,-0.250000,\"He said \"\"no\"\"\"\n"
        );
    }

    #[test]
    fn test_file_report() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.csv");
        write_report_file(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), HEADER);
    }
}
