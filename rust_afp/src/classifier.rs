//! Decide whether a discharge diagnosis justifies an AFP test
//!
//! A diagnosis is indicated if any taxonomy keyword occurs in it
//! as a substring. Keywords are tried in registration order and
//! only the first match is reported, even when keywords of other
//! categories also occur in the diagnosis.
//!

use serde::Serialize;

use crate::taxonomy::{Category, FlatIndex, Taxonomy};

/// The outcome of classifying one diagnosis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// The diagnosis text, as given
    diagnosis: String,
    /// Whether the test is indicated
    is_indicated: bool,
    /// The name of the matched category, if any
    category: Option<String>,
    /// Explanations for the decision. Never empty.
    reasons: Vec<String>,
}

impl Verdict {
    fn indicated(diagnosis: &str, category: &Category) -> Self {
        let reason = format!(
            "诊断为{}相关疾病（{}）。{}",
            category.label(),
            diagnosis,
            category.justification()
        );
        Self {
            diagnosis: String::from(diagnosis),
            is_indicated: true,
            category: Some(String::from(category.name())),
            reasons: vec![reason],
        }
    }

    fn not_indicated(diagnosis: &str, default_reason: &str) -> Self {
        Self {
            diagnosis: String::from(diagnosis),
            is_indicated: false,
            category: None,
            reasons: vec![String::from(default_reason)],
        }
    }

    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    pub fn is_indicated(&self) -> bool {
        self.is_indicated
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }
}

/// Classifies diagnoses against a borrowed taxonomy. The
/// keyword index is flattened once, when the classifier is made.
#[derive(Debug, Clone)]
pub struct Classifier<'t> {
    taxonomy: &'t Taxonomy,
    index: FlatIndex<'t>,
}

impl<'t> Classifier<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self {
            taxonomy,
            index: taxonomy.build_flat_index(),
        }
    }

    /// Classify one diagnosis. Any string is accepted, including
    /// the empty string; anything that contains no keyword gets
    /// the taxonomy's default reason.
    pub fn classify(&self, diagnosis: &str) -> Verdict {
        match self
            .index
            .iter()
            .find(|(keyword, _)| diagnosis.contains(*keyword))
        {
            Some((_, category)) => Verdict::indicated(diagnosis, category),
            None => Verdict::not_indicated(diagnosis, self.taxonomy.default_reason()),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn primary_liver_cancer_is_liver_disease() {
        let taxonomy = Taxonomy::afp();
        let verdict = Classifier::new(&taxonomy).classify("原发性肝癌");
        assert!(verdict.is_indicated());
        assert_eq!(verdict.category(), Some("liver disease"));
        assert_eq!(verdict.diagnosis(), "原发性肝癌");
    }

    #[test]
    fn positive_reason_quotes_diagnosis_and_justification() {
        let taxonomy = Taxonomy::afp();
        let verdict = Classifier::new(&taxonomy).classify("胃癌");
        assert_eq!(verdict.category(), Some("digestive tract tumor"));
        assert_eq!(verdict.reasons().len(), 1);
        let reason = &verdict.reasons()[0];
        assert!(reason.starts_with("诊断为消化道肿瘤相关疾病（胃癌）。"));
        assert!(reason.ends_with("同时需要排除肝转移的可能"));
    }

    #[test]
    fn hypertension_gets_default_reason() {
        let taxonomy = Taxonomy::afp();
        let verdict = Classifier::new(&taxonomy).classify("高血压");
        assert!(!verdict.is_indicated());
        assert_eq!(verdict.category(), None);
        assert_eq!(verdict.reasons(), &[String::from(taxonomy.default_reason())]);
    }

    #[test]
    fn empty_diagnosis_is_not_indicated() {
        let taxonomy = Taxonomy::afp();
        let verdict = Classifier::new(&taxonomy).classify("");
        assert!(!verdict.is_indicated());
        assert!(!verdict.reasons().is_empty());
    }

    /// Keywords match anywhere in the text, including inside
    /// longer terms.
    #[test]
    fn keyword_matches_as_substring() {
        let taxonomy = Taxonomy::afp();
        let classifier = Classifier::new(&taxonomy);
        assert_eq!(
            classifier.classify("乙型病毒性肝炎后肝硬化").category(),
            Some("liver disease")
        );
        assert_eq!(
            classifier.classify("左侧卵巢癌术后化疗").category(),
            Some("germ cell tumor")
        );
    }

    /// 转移性肝癌 is registered under "other possibly related", but
    /// 肝癌 is registered first, under liver disease.
    #[test]
    fn first_registered_match_wins() {
        let taxonomy = Taxonomy::afp();
        let verdict = Classifier::new(&taxonomy).classify("转移性肝癌");
        assert_eq!(verdict.category(), Some("liver disease"));

        let verdict = Classifier::new(&taxonomy).classify("胃癌伴肝占位");
        assert_eq!(verdict.category(), Some("digestive tract tumor"));
    }

    #[test]
    fn collided_keyword_reports_last_registration() {
        let taxonomy = Taxonomy::new(vec![
            Category::new("first", "", &["x"], "first reason"),
            Category::new("second", "", &["x"], "second reason"),
        ]);
        let verdict = Classifier::new(&taxonomy).classify("xyz");
        assert_eq!(verdict.category(), Some("second"));
        assert!(verdict.reasons()[0].ends_with("second reason"));
    }

    #[test]
    fn blank_label_reason_uses_name() {
        let taxonomy = Taxonomy::new(vec![Category::new("metabolic", " ", &["糖尿病"], "reason")]);
        let verdict = Classifier::new(&taxonomy).classify("2型糖尿病");
        assert_eq!(verdict.reasons()[0], "诊断为metabolic相关疾病（2型糖尿病）。reason");
    }
}
