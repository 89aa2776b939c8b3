//! Deterministic markdown-to-article parser.
//!
//! Turns the raw generated text into a [`BlogArticle`] without ever erroring:
//! malformed input degrades to fallback titles and empty structure rather
//! than failing the pipeline.

use chrono::Utc;
use scrivano_core::{
    ArticleMetadata, ArticleSection, BlogArticle, EnhancedBrief, GenerationRequest,
    GenerationStatus,
};

/// Parser output: the structured article plus a flag recording whether the
/// title had to be recovered from the brief or the request.
#[derive(Debug, Clone)]
pub struct ParsedArticle {
    /// The structured article
    pub article: BlogArticle,
    /// True when no `# ` title line was found in the raw text
    pub used_fallback: bool,
}

/// Parse raw generated markdown into a structured article.
///
/// Rules, applied after dropping blank lines:
/// - the first `# ` line becomes the title; lines after it are introduction
///   until a section heading appears;
/// - `## ` and `### ` lines open a new section; the previous section is
///   pushed with the next order index, starting at 0;
/// - a heading containing "conclusion" (case-insensitive) ends section
///   parsing; every remaining non-heading line becomes the conclusion;
/// - section body lines are joined with blank lines;
/// - when no title line exists, the brief's enhanced title is used, then the
///   request topic, and `used_fallback` is set.
///
/// `word_count` is the whitespace-token count of the entire raw input, not
/// the sum of the structured parts.
pub fn parse_article(
    content: &str,
    brief: &EnhancedBrief,
    request: &GenerationRequest,
) -> ParsedArticle {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut title = String::new();
    let mut introduction = String::new();
    let mut conclusion = String::new();
    let mut sections: Vec<ArticleSection> = Vec::new();

    let mut current_section: Option<(String, Vec<String>)> = None;
    let mut in_intro = false;
    let mut section_order = 0;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        // Title is the first `# ` heading
        if title.is_empty() && line.starts_with("# ") {
            title = line.trim_start_matches('#').trim().to_string();
            in_intro = true;
            i += 1;
            continue;
        }

        if is_section_heading(line) {
            if let Some((heading, body)) = current_section.take() {
                sections.push(ArticleSection {
                    heading,
                    content: body.join("\n\n"),
                    order: section_order,
                });
                section_order += 1;
            }

            let heading = strip_heading_markers(line);
            if heading.to_lowercase().contains("conclusion") {
                // Everything after the conclusion heading that is not itself
                // a heading belongs to the conclusion
                let remainder: Vec<&str> = lines[i + 1..]
                    .iter()
                    .filter(|l| !is_any_heading(l))
                    .copied()
                    .collect();
                conclusion = remainder.join("\n\n").trim().to_string();
                break;
            }

            current_section = Some((heading, Vec::new()));
            in_intro = false;
            i += 1;
            continue;
        }

        match &mut current_section {
            Some((_, body)) => body.push(line.to_string()),
            None if in_intro => {
                if !introduction.is_empty() {
                    introduction.push_str("\n\n");
                }
                introduction.push_str(line);
            }
            None => {}
        }
        i += 1;
    }

    if let Some((heading, body)) = current_section.take() {
        sections.push(ArticleSection {
            heading,
            content: body.join("\n\n"),
            order: section_order,
        });
    }

    let used_fallback = title.is_empty();
    if used_fallback {
        title = if brief.enhanced_title.is_empty() {
            request.topic.clone()
        } else {
            brief.enhanced_title.clone()
        };
    }

    let word_count = content.split_whitespace().count();

    let keywords = if brief.enhanced_keywords.is_empty() {
        request.keywords.clone()
    } else {
        brief.enhanced_keywords.clone()
    };
    let primary_keyword = keywords.first().cloned().unwrap_or_default();
    let seo_description = format!(
        "{} - {}",
        title,
        introduction.chars().take(150).collect::<String>()
    );

    let article = BlogArticle {
        title,
        introduction: (!introduction.is_empty()).then_some(introduction),
        sections,
        conclusion: (!conclusion.is_empty()).then_some(conclusion),
        metadata: ArticleMetadata {
            keywords,
            target_audience: request.target_audience.clone(),
            primary_keyword,
            seo_description: Some(seo_description),
        },
        status: GenerationStatus::Completed,
        generated_at: Utc::now(),
        word_count,
    };

    ParsedArticle {
        article,
        used_fallback,
    }
}

fn is_section_heading(line: &str) -> bool {
    line.starts_with("## ") || line.starts_with("### ")
}

fn is_any_heading(line: &str) -> bool {
    line.starts_with("# ") || is_section_heading(line)
}

fn strip_heading_markers(line: &str) -> String {
    line.trim_start_matches('#').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            topic: "Fallback Topic".to_string(),
            keywords: vec!["alpha".to_string(), "beta".to_string()],
            target_audience: Some("developers".to_string()),
            additional_context: None,
            options: None,
        }
    }

    fn brief() -> EnhancedBrief {
        EnhancedBrief::fallback(&request())
    }

    #[test]
    fn test_round_trip_structure() {
        let content = "\
# The Title

An introduction paragraph.

## First Section

Body of first.

## Second Section

Body of second.

## Conclusion

Closing thoughts.
";
        let parsed = parse_article(content, &brief(), &request());
        let article = parsed.article;

        assert!(!parsed.used_fallback);
        assert_eq!(article.title, "The Title");
        assert_eq!(article.introduction.as_deref(), Some("An introduction paragraph."));
        assert_eq!(article.sections.len(), 2);
        assert_eq!(article.sections[0].heading, "First Section");
        assert_eq!(article.sections[0].content, "Body of first.");
        assert_eq!(article.sections[1].heading, "Second Section");
        assert_eq!(article.conclusion.as_deref(), Some("Closing thoughts."));
        assert_eq!(article.word_count, content.split_whitespace().count());
    }

    #[test]
    fn test_order_indices_contiguous_from_zero() {
        let content = "\
# T
## A
one
### B
two
## C
three
";
        let parsed = parse_article(content, &brief(), &request());
        let orders: Vec<usize> = parsed.article.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_conclusion_heading_is_case_insensitive() {
        let content = "\
# T
## Section
body
## In CONCLUSION
final words
more final words
";
        let parsed = parse_article(content, &brief(), &request());
        assert_eq!(parsed.article.sections.len(), 1);
        assert_eq!(
            parsed.article.conclusion.as_deref(),
            Some("final words\n\nmore final words")
        );
    }

    #[test]
    fn test_missing_title_falls_back_to_brief() {
        let content = "just prose, no headings at all";
        let parsed = parse_article(content, &brief(), &request());
        assert!(parsed.used_fallback);
        // Fallback brief echoes the topic
        assert_eq!(parsed.article.title, "Fallback Topic");
        assert!(parsed.article.sections.is_empty());
    }

    #[test]
    fn test_missing_title_falls_back_to_topic_when_brief_blank() {
        let mut b = brief();
        b.enhanced_title = String::new();
        let parsed = parse_article("no headings", &b, &request());
        assert!(parsed.used_fallback);
        assert_eq!(parsed.article.title, "Fallback Topic");
    }

    #[test]
    fn test_blank_lines_dropped_and_bodies_joined() {
        let content = "# T\n\n\n## S\n\nline one\n\n\nline two\n";
        let parsed = parse_article(content, &brief(), &request());
        assert_eq!(parsed.article.sections[0].content, "line one\n\nline two");
    }

    #[test]
    fn test_word_count_covers_entire_raw_text() {
        let content = "# T\nunclassifiable trailing words here";
        let parsed = parse_article(content, &brief(), &request());
        assert_eq!(parsed.article.word_count, 6);
    }

    #[test]
    fn test_metadata_comes_from_brief() {
        let content = "# T\n\nIntro.";
        let parsed = parse_article(content, &brief(), &request());
        let meta = parsed.article.metadata;
        assert_eq!(meta.keywords, vec!["alpha", "beta"]);
        assert_eq!(meta.primary_keyword, "alpha");
        assert_eq!(meta.target_audience.as_deref(), Some("developers"));
        assert_eq!(meta.seo_description.as_deref(), Some("T - Intro."));
    }

    #[test]
    fn test_never_errors_on_malformed_input() {
        for content in ["", "###", "#", "```\nunclosed fence", "## only a heading"] {
            let parsed = parse_article(content, &brief(), &request());
            assert_eq!(parsed.article.status, GenerationStatus::Completed);
        }
    }
}
