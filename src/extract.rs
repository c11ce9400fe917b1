//! Outline extraction from text exports of the input documents.
//!
//! Documents arrive as Markdown/plain-text conversions (one `# ` line per
//! section, one `## ` line per subsection, form feeds between pages) or as
//! pre-extracted JSON outlines. Either way the result is a flat list of
//! [`Section`] records tagged with their source file name.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

use crate::models::{Section, Subsection};

const PAGE_BREAK: char = '\u{000c}';

/// Parse a Markdown outline into sections.
///
/// Body lines attach to the current subsection if one is open, otherwise to
/// the current section. Text before the first `# ` heading is dropped. With
/// no `# ` heading at all, the document becomes a single section whose
/// subsections are its paragraphs.
pub fn parse_outline(document: &str, content: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;
    let mut sub: Option<Subsection> = None;
    let mut page = 0u32;

    for line in content.lines() {
        let breaks = line.matches(PAGE_BREAK).count() as u32;
        page += breaks;
        let line = line.trim_start_matches(PAGE_BREAK);

        if let Some(title) = line.strip_prefix("# ") {
            if let Some(mut sec) = current.take() {
                sec.subsections.extend(sub.take());
                sections.push(sec);
            }
            sub = None;
            current = Some(Section {
                document: document.to_string(),
                heading: title.trim().to_string(),
                page,
                text: String::new(),
                subsections: Vec::new(),
            });
        } else if let Some(title) = line.strip_prefix("## ") {
            if let (Some(sec), Some(done)) = (current.as_mut(), sub.take()) {
                sec.subsections.push(done);
            }
            sub = Some(Subsection {
                document: document.to_string(),
                heading: title.trim().to_string(),
                page,
                text: String::new(),
            });
        } else if let Some(open) = sub.as_mut() {
            open.text.push_str(line);
            open.text.push('\n');
        } else if let Some(sec) = current.as_mut() {
            sec.text.push_str(line);
            sec.text.push('\n');
        }
    }

    if let Some(mut sec) = current.take() {
        sec.subsections.extend(sub.take());
        sections.push(sec);
    }

    if sections.is_empty() {
        return vec![paragraph_fallback(document, content)];
    }
    sections
}

/// One section per document, one subsection per blank-line separated paragraph.
fn paragraph_fallback(document: &str, content: &str) -> Section {
    let subsections = content
        .replace(PAGE_BREAK, "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(i, para)| Subsection {
            document: document.to_string(),
            heading: format!("Paragraph {}", i + 1),
            page: 0,
            text: para.to_string(),
        })
        .collect();

    Section {
        document: document.to_string(),
        heading: document.to_string(),
        page: 0,
        text: String::new(),
        subsections,
    }
}

/// Load a pre-extracted outline: a JSON array of sections.
pub fn load_outline_json(path: &Path) -> Result<Vec<Section>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read outline {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Malformed section outline in {}", path.display()))
}

/// Extract sections from every supported file under `dir`, in file-name order.
pub fn extract_sections_from_folder(dir: &Path) -> Result<Vec<Section>> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_supported(e.path()))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(b.file_name()));

    let mut all = Vec::new();
    for entry in files {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        let mut sections = if has_extension(path, &["json"]) {
            load_outline_json(path)?
        } else {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse_outline(&name, &content)
        };

        for sec in &mut sections {
            if sec.document.is_empty() {
                sec.document = name.clone();
            }
            for sub in &mut sec.subsections {
                if sub.document.is_empty() {
                    sub.document = sec.document.clone();
                }
            }
        }

        tracing::info!("Extracted {} sections from {}", sections.len(), name);
        all.extend(sections);
    }

    Ok(all)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_supported(path: &Path) -> bool {
    has_extension(path, &["md", "markdown", "txt", "json"])
}

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_and_subsections() {
        let md = "preamble dropped\n# Intro\nIntro body.\n## Detail\nDetail body.\n# Method\nMethod body.\n";
        let sections = parse_outline("paper.md", md);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Intro");
        assert_eq!(sections[0].text, "Intro body.\n");
        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(sections[0].subsections[0].heading, "Detail");
        assert_eq!(sections[0].subsections[0].text, "Detail body.\n");
        assert_eq!(sections[1].heading, "Method");
        assert!(sections[1].subsections.is_empty());
        assert!(sections.iter().all(|s| s.document == "paper.md"));
    }

    #[test]
    fn test_form_feeds_advance_pages() {
        let md = "# One\ntext\n\u{000c}# Two\nmore\n\u{000c}\n## Sub\nx\n";
        let sections = parse_outline("doc.txt", md);
        assert_eq!(sections[0].page, 0);
        assert_eq!(sections[1].page, 1);
        assert_eq!(sections[1].subsections[0].page, 2);
    }

    #[test]
    fn test_paragraph_fallback_without_headings() {
        let text = "First paragraph.\n\nSecond one\nspans lines.\n\n\n";
        let sections = parse_outline("notes.txt", text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "notes.txt");
        assert_eq!(sections[0].text, "");
        let subs = &sections[0].subsections;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].heading, "Paragraph 1");
        assert_eq!(subs[1].text, "Second one\nspans lines.");
    }

    #[test]
    fn test_subsection_only_document_falls_back() {
        let sections = parse_outline("x.md", "## Orphan\nbody\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "x.md");
    }

    #[test]
    fn test_folder_extraction_sorted_and_tagged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.md"), "# Beta\nbody b\n").unwrap();
        std::fs::write(dir.path().join("a.md"), "# Alpha\nbody a\n").unwrap();
        std::fs::write(dir.path().join("image.png"), [0u8, 1, 2]).unwrap();
        std::fs::write(dir.path().join(".hidden.md"), "# Hidden\n").unwrap();
        std::fs::write(
            dir.path().join("c.json"),
            r#"[{"title":"Gamma","page":3,"text":"body c","subsections":[{"title":"G1","text":"sub"}]}]"#,
        )
        .unwrap();

        let sections = extract_sections_from_folder(dir.path()).unwrap();
        let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(sections[2].document, "c.json");
        assert_eq!(sections[2].page, 3);
        assert_eq!(sections[2].subsections[0].document, "c.json");
    }

    #[test]
    fn test_malformed_outline_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), r#"[{"title":"No text"}]"#).unwrap();
        assert!(extract_sections_from_folder(dir.path()).is_err());
    }
}
