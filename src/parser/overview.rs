//! Competition overview extraction
//!
//! Fields are extracted independently and leniently: a selector that stops
//! matching after an upstream redesign leaves that one field empty. The call
//! only fails when the page carries none of the known top-level markers.

use scraper::{ElementRef, Html};
use std::collections::BTreeMap;

use crate::models::Competition;
use crate::parser::sanitize::{has_content, sanitize_text, single_line};
use crate::parser::selectors::{all_elements, first_match, OverviewSelectors};
use crate::utils::error::ExtractionError;

const TITLE_SUFFIXES: &[&str] = &[" | Kaggle", " - Kaggle"];

/// Field extractor for competition overview pages
pub struct OverviewParser {
    selectors: OverviewSelectors,
}

impl OverviewParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: OverviewSelectors::new(),
        }
    }

    /// Extract a `Competition` from overview page markup
    ///
    /// # Arguments
    /// * `html` - Raw overview page markup
    /// * `competition_id` - Slug taken from the requested URL
    /// * `page_url` - Canonical overview URL
    ///
    /// # Errors
    /// Returns `ExtractionError::UnrecognizedStructure` if no top-level
    /// marker is present
    pub fn extract(
        &self,
        html: &str,
        competition_id: &str,
        page_url: &str,
    ) -> Result<Competition, ExtractionError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        if !self.is_recognized(root) {
            return Err(ExtractionError::UnrecognizedStructure(format!(
                "no competition markers found on {page_url}"
            )));
        }

        let title = self.title(root).unwrap_or_default();
        let description = self.description(root).unwrap_or_default();
        let evaluation_metric = self.evaluation_metric(root).unwrap_or_default();
        let reward = self.reward(root);
        let timeline = self.timeline(root);

        tracing::debug!(
            competition = competition_id,
            has_title = !title.is_empty(),
            has_description = !description.is_empty(),
            has_metric = !evaluation_metric.is_empty(),
            has_reward = reward.is_some(),
            milestones = timeline.len(),
            "Extracted overview fields"
        );

        Ok(Competition {
            id: competition_id.to_string(),
            title,
            description,
            evaluation_metric,
            reward,
            timeline,
            url: page_url.to_string(),
        })
    }

    fn is_recognized(&self, root: ElementRef<'_>) -> bool {
        self.selectors
            .markers
            .iter()
            .any(|selector| root.select(selector).next().is_some())
    }

    /// Competition title without the site suffix
    pub fn title(&self, root: ElementRef<'_>) -> Option<String> {
        let raw = single_line(&first_match(root, self.selectors.title)?);
        let cleaned = TITLE_SUFFIXES
            .iter()
            .fold(raw, |title, suffix| {
                title.strip_suffix(suffix).map(str::to_string).unwrap_or(title)
            });
        let cleaned = cleaned.trim().to_string();
        has_content(&cleaned).then_some(cleaned)
    }

    /// Free-text description
    pub fn description(&self, root: ElementRef<'_>) -> Option<String> {
        first_match(root, self.selectors.description).map(|text| sanitize_text(&text))
    }

    /// Evaluation metric section text
    pub fn evaluation_metric(&self, root: ElementRef<'_>) -> Option<String> {
        first_match(root, self.selectors.evaluation).map(|text| sanitize_text(&text))
    }

    /// Prize text, absent on knowledge/playground competitions
    pub fn reward(&self, root: ElementRef<'_>) -> Option<String> {
        first_match(root, self.selectors.reward).map(|text| single_line(&text))
    }

    /// Named milestones and their dates
    pub fn timeline(&self, root: ElementRef<'_>) -> BTreeMap<String, String> {
        all_elements(root, self.selectors.timeline_items)
            .into_iter()
            .filter_map(|item| self.milestone(item))
            .collect()
    }

    fn milestone(&self, item: ElementRef<'_>) -> Option<(String, String)> {
        let full_text = single_line(&item.text().collect::<String>());
        let name = first_match(item, self.selectors.timeline_name).map(|n| single_line(&n));
        let date = first_match(item, self.selectors.timeline_date).map(|d| single_line(&d));

        let (name, date) = match (name, date) {
            (Some(name), Some(date)) => (name, date),
            (Some(name), None) => {
                let rest = full_text.replacen(&name, "", 1);
                (name, rest)
            }
            (None, Some(date)) => {
                let rest = full_text.replacen(&date, "", 1);
                (rest, date)
            }
            (None, None) => {
                let (name, date) = full_text.split_once(':')?;
                (name.to_string(), date.to_string())
            }
        };

        let name = name.trim().trim_end_matches(':').trim().to_string();
        let date = date.trim().trim_start_matches(':').trim().to_string();

        (has_content(&name) && has_content(&date)).then_some((name, date))
    }
}

impl Default for OverviewParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.kaggle.com/competitions/titanic";

    #[test]
    fn test_extract_meta_only_page() {
        let html = r#"<html><head>
            <title>Titanic - Machine Learning from Disaster | Kaggle</title>
            <meta name="description" content="Start here! Predict survival on the Titanic.">
        </head><body></body></html>"#;

        let competition = OverviewParser::new().extract(html, "titanic", URL).unwrap();
        assert_eq!(competition.id, "titanic");
        assert_eq!(competition.title, "Titanic - Machine Learning from Disaster");
        assert_eq!(competition.description, "Start here! Predict survival on the Titanic.");
        assert_eq!(competition.evaluation_metric, "");
        assert_eq!(competition.reward, None);
        assert!(competition.timeline.is_empty());
        assert_eq!(competition.url, URL);
    }

    #[test]
    fn test_meta_description_decoded_once() {
        let html = r#"<html><head>
            <title>AT&amp;T Churn | Kaggle</title>
            <meta name="description" content="Predict &amp;quot;survival&amp;quot; AT&amp;amp;T">
        </head><body></body></html>"#;

        let competition = OverviewParser::new().extract(html, "churn", URL).unwrap();
        assert_eq!(competition.title, "AT&T Churn");
        assert_eq!(competition.description, "Predict &quot;survival&quot; AT&amp;T");
    }

    #[test]
    fn test_unrecognized_page_fails() {
        let html = "<html><body><p>Just a paragraph</p></body></html>";
        let result = OverviewParser::new().extract(html, "titanic", URL);
        assert!(matches!(
            result,
            Err(ExtractionError::UnrecognizedStructure(_))
        ));
    }

    #[test]
    fn test_timeline_with_time_elements() {
        let html = r#"<html><head><title>T | Kaggle</title></head><body>
            <ul id="timeline">
                <li><strong>Start Date</strong> <time datetime="2024-03-01">March 1, 2024</time></li>
                <li><strong>Final Submission Deadline:</strong> <time datetime="2024-06-01">June 1</time></li>
            </ul>
        </body></html>"#;

        let competition = OverviewParser::new().extract(html, "t", URL).unwrap();
        assert_eq!(
            competition.timeline.get("Start Date").map(String::as_str),
            Some("2024-03-01")
        );
        assert_eq!(
            competition
                .timeline
                .get("Final Submission Deadline")
                .map(String::as_str),
            Some("2024-06-01")
        );
    }

    #[test]
    fn test_timeline_plain_text_items() {
        let html = r#"<html><head><title>T</title></head><body>
            <div class="competition-timeline"><ul>
                <li>Entry Deadline: May 25, 2024</li>
                <li>No separator here</li>
            </ul></div>
        </body></html>"#;

        let competition = OverviewParser::new().extract(html, "t", URL).unwrap();
        assert_eq!(competition.timeline.len(), 1);
        assert_eq!(
            competition.timeline.get("Entry Deadline").map(String::as_str),
            Some("May 25, 2024")
        );
    }
}
