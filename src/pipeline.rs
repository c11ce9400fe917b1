//! End-to-end run: persona + job in, ranked and condensed sections out.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::config::RetrievalConfig;
use crate::llm::Embedder;
use crate::models::Section;
use crate::session::{RetrievalSession, SessionOptions};

/// Contents of `persona.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonaConfig {
    pub persona: String,
    pub job: String,
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl PersonaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Malformed {}", path.display()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub metadata: Metadata,
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEntry {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    pub importance_rank: usize,
    pub refined_text: String,
    pub subsections: Vec<SubsectionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionEntry {
    pub document: String,
    pub page: u32,
    pub section_title: String,
    pub importance_rank: usize,
    pub refined_text: String,
}

/// Combine persona and job into the retrieval query.
pub fn build_context_string(persona: &str, job: &str) -> String {
    format!("Persona: {persona}. Task: {job}")
}

/// Rank `sections` for the persona's job and assemble the output document.
pub fn run_pipeline<E: Embedder>(
    sections: Vec<Section>,
    persona: &str,
    job: &str,
    config: &RetrievalConfig,
    embedder: E,
) -> Result<PipelineOutput> {
    anyhow::ensure!(!sections.is_empty(), "No sections found in input documents");

    let documents: Vec<String> = sections
        .iter()
        .map(|s| s.document.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let query = build_context_string(persona, job);
    tracing::info!("Query: {query}");

    let session = RetrievalSession::new(sections, embedder, SessionOptions::from(config))
        .context("Failed to index sections")?;
    let ranked = session
        .rank_sections(&query, config.top_k, config.max_sentences)
        .context("Failed to rank sections")?;

    let entries = ranked
        .into_iter()
        .map(|r| {
            let sec = &session.sections()[r.section_index];
            SectionEntry {
                document: sec.document.clone(),
                page: sec.page,
                section_title: sec.heading.clone(),
                importance_rank: r.importance_rank,
                refined_text: r.refined_text,
                subsections: r
                    .subsections
                    .into_iter()
                    .map(|s| {
                        let sub = &sec.subsections[s.subsection_index];
                        SubsectionEntry {
                            document: sub.document.clone(),
                            page: sub.page,
                            section_title: sub.heading.clone(),
                            importance_rank: s.importance_rank,
                            refined_text: s.refined_text,
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(PipelineOutput {
        metadata: Metadata {
            documents,
            persona: persona.to_string(),
            job_to_be_done: job.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        },
        sections: entries,
    })
}

/// Write the output as pretty JSON, creating parent directories as needed.
pub fn save_output(output: &PipelineOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(output)?;
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::HashingEmbedder;
    use crate::models::Subsection;

    fn corpus() -> Vec<Section> {
        vec![
            Section {
                document: "b.md".to_string(),
                heading: "Packing list".to_string(),
                page: 1,
                text: "Bring layers. Pack sunscreen.".to_string(),
                subsections: vec![Subsection {
                    document: "b.md".to_string(),
                    heading: "Shoes".to_string(),
                    page: 2,
                    text: "Comfortable shoes matter.".to_string(),
                }],
            },
            Section {
                document: "a.md".to_string(),
                heading: "Nightlife".to_string(),
                page: 4,
                text: "Bars open late.".to_string(),
                subsections: vec![],
            },
        ]
    }

    #[test]
    fn test_context_string_format() {
        assert_eq!(
            build_context_string("Travel Planner", "Plan a trip"),
            "Persona: Travel Planner. Task: Plan a trip"
        );
    }

    #[test]
    fn test_run_pipeline_shapes_output() {
        let config = RetrievalConfig {
            top_k: 5,
            ..RetrievalConfig::default()
        };
        let out = run_pipeline(
            corpus(),
            "Travel Planner",
            "pack for a trip",
            &config,
            HashingEmbedder::new(128),
        )
        .unwrap();

        assert_eq!(out.metadata.documents, vec!["a.md", "b.md"]);
        assert_eq!(out.metadata.job_to_be_done, "pack for a trip");
        assert_eq!(out.sections.len(), 2);
        let ranks: Vec<usize> = out.sections.iter().map(|s| s.importance_rank).collect();
        assert_eq!(ranks, vec![1, 2]);

        let packing = out
            .sections
            .iter()
            .find(|s| s.section_title == "Packing list")
            .unwrap();
        assert_eq!(packing.page, 1);
        assert_eq!(packing.subsections.len(), 1);
        assert_eq!(packing.subsections[0].section_title, "Shoes");
        assert_eq!(packing.subsections[0].page, 2);
        assert_eq!(
            packing.subsections[0].refined_text,
            "Comfortable shoes matter."
        );
    }

    #[test]
    fn test_run_pipeline_rejects_empty_input() {
        let err = run_pipeline(
            vec![],
            "p",
            "j",
            &RetrievalConfig::default(),
            HashingEmbedder::new(8),
        )
        .unwrap_err();
        assert!(err.to_string().contains("No sections"));
    }

    #[test]
    fn test_save_output_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/result.json");
        let out = run_pipeline(
            corpus(),
            "Travel Planner",
            "pack",
            &RetrievalConfig::default(),
            HashingEmbedder::new(32),
        )
        .unwrap();
        save_output(&out, &path).unwrap();

        let back: PipelineOutput =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.sections.len(), out.sections.len());
        assert_eq!(back.metadata.persona, "Travel Planner");
    }

    #[test]
    fn test_persona_config_top_k_optional() {
        let cfg: PersonaConfig =
            serde_json::from_str(r#"{"persona":"Analyst","job":"Summarize"}"#).unwrap();
        assert!(cfg.top_k.is_none());
    }
}
