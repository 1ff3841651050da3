//! Data structures for the taxonomy of diseases for which
//! an alpha-fetoprotein (AFP) test is indicated
//!

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};

mod afp;

/// A disease category
///
/// Each category holds the list of diagnosis terms (keywords)
/// which place a discharge diagnosis into the category, and the
/// clinical rationale for ordering an AFP test for a diagnosis
/// in the category.
#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    /// The identifier of the category; e.g. liver disease
    name: String,
    /// The display name used when writing reasons; e.g. 肝脏疾病.
    /// Falls back to the name if left empty.
    #[serde(default)]
    label: String,
    /// Diagnosis terms, in matching order
    keywords: Vec<String>,
    /// Why the test is justified for this category
    justification: String,
}

impl Category {
    pub fn new(name: &str, label: &str, keywords: &[&str], justification: &str) -> Self {
        Self {
            name: String::from(name),
            label: String::from(label),
            keywords: keywords.iter().map(|k| String::from(*k)).collect(),
            justification: String::from(justification),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }
}

/// A keyword registered under more than one category. Only
/// the most recent registration owns the keyword in the
/// flattened index.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct KeywordCollision {
    pub keyword: String,
    /// The category that owned the keyword before
    pub previous: String,
    /// The category that took it over
    pub replacement: String,
}

/// The taxonomy file structure
///
/// The built-in AFP taxonomy is available from [`Taxonomy::afp`].
/// Alternative taxonomies can be read from a yaml file of the
/// same shape using [`Taxonomy::from_reader`].
#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Clone)]
pub struct Taxonomy {
    /// Categories in registration order
    categories: Vec<Category>,
    /// The reason given when no keyword matches
    #[serde(default = "afp::default_reason")]
    default_reason: String,
}

/// Flattened view of the taxonomy mapping every keyword to
/// the category that owns it.
///
/// Entries are kept in registration order. If a keyword is
/// registered twice, it stays at the position of its first
/// registration but is owned by the category that registered
/// it last.
#[derive(Debug, Clone)]
pub struct FlatIndex<'t> {
    entries: Vec<(&'t str, &'t Category)>,
}

impl<'t> FlatIndex<'t> {
    /// Iterate over (keyword, owning category) in matching order
    pub fn iter(&self) -> impl Iterator<Item = (&'t str, &'t Category)> + '_ {
        self.entries.iter().copied()
    }

    /// Name of the category owning a keyword, if it is registered
    pub fn get(&self, keyword: &str) -> Option<&'t str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|&(_, category)| category.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Taxonomy {
    /// Make a taxonomy from a list of categories. The default
    /// reason is the one used by the AFP taxonomy.
    ///
    /// Unlike [`Taxonomy::from_reader`], the categories are not
    /// validated.
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            default_reason: afp::default_reason(),
        }
    }

    /// The built-in AFP taxonomy
    pub fn afp() -> Self {
        Self::new(afp::categories())
    }

    /// Read and validate a taxonomy from a byte source
    ///
    /// You can pass the result of std::fs::File::open() on
    /// a yaml file to this function.
    pub fn from_reader<R>(reader: R) -> Result<Self>
    where
        R: Read,
    {
        let taxonomy: Self = serde_yaml::from_reader(reader)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Read and validate a taxonomy from a yaml file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| AnalysisError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn default_reason(&self) -> &str {
        &self.default_reason
    }

    /// Check the invariants that the classifier relies on. An
    /// empty keyword would be a substring of every diagnosis.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(invalid("the taxonomy has no categories"));
        }
        if self.default_reason.trim().is_empty() {
            return Err(invalid("the default reason is empty"));
        }
        let mut names = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(invalid("a category has an empty name"));
            }
            if !names.insert(category.name.as_str()) {
                return Err(invalid(&format!(
                    "category '{}' is defined more than once",
                    category.name
                )));
            }
            if category.keywords.is_empty() {
                return Err(invalid(&format!(
                    "category '{}' has no keywords",
                    category.name
                )));
            }
            if category.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(invalid(&format!(
                    "category '{}' has an empty keyword",
                    category.name
                )));
            }
            if category.justification.trim().is_empty() {
                return Err(invalid(&format!(
                    "category '{}' has an empty justification",
                    category.name
                )));
            }
        }
        Ok(())
    }

    /// Flatten the taxonomy into a keyword index (see [`FlatIndex`])
    pub fn build_flat_index(&self) -> FlatIndex<'_> {
        let mut entries: Vec<(&str, &Category)> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();
        for category in &self.categories {
            for keyword in &category.keywords {
                match position.get(keyword.as_str()) {
                    Some(&n) => entries[n].1 = category,
                    None => {
                        position.insert(keyword.as_str(), entries.len());
                        entries.push((keyword.as_str(), category));
                    }
                }
            }
        }
        FlatIndex { entries }
    }

    /// Find every keyword that is registered more than once,
    /// in registration order
    pub fn keyword_collisions(&self) -> Vec<KeywordCollision> {
        let mut owner: HashMap<&str, &str> = HashMap::new();
        let mut collisions = Vec::new();
        for category in &self.categories {
            for keyword in &category.keywords {
                if let Some(previous) = owner.insert(keyword, &category.name) {
                    collisions.push(KeywordCollision {
                        keyword: keyword.clone(),
                        previous: String::from(previous),
                        replacement: category.name.clone(),
                    });
                }
            }
        }
        collisions
    }

    /// Load the taxonomy to classify with: the yaml file at path
    /// if one is given, otherwise the built-in AFP taxonomy.
    ///
    /// Keyword collisions are logged. If reject_collisions is set,
    /// any collision is an error instead.
    pub fn load(path: Option<&Path>, reject_collisions: bool) -> Result<Self> {
        let taxonomy = match path {
            Some(path) => {
                debug!(path = %path.display(), "reading taxonomy file");
                Self::from_path(path)?
            }
            None => Self::afp(),
        };
        let collisions = taxonomy.keyword_collisions();
        for collision in &collisions {
            warn!(
                keyword = %collision.keyword,
                previous = %collision.previous,
                replacement = %collision.replacement,
                "keyword registered under more than one category; the later category wins"
            );
        }
        if reject_collisions && !collisions.is_empty() {
            let keywords: Vec<&str> = collisions.iter().map(|c| c.keyword.as_str()).collect();
            return Err(AnalysisError::KeywordCollisions(keywords.join(", ")));
        }
        Ok(taxonomy)
    }
}

fn invalid(message: &str) -> AnalysisError {
    AnalysisError::InvalidTaxonomy(String::from(message))
}

/// Tests for the taxonomy
///
/// The following things need checking:
/// * whether a taxonomy file deserializes to the structure correctly
/// * whether invalid taxonomies are rejected
/// * whether the flat index keeps registration order and lets the
///   last category win on collisions
///
#[cfg(test)]
mod tests {

    use super::*;

    fn yaml_example_1() -> &'static str {
        r#"
        categories:
        - name: cat1
          label: category 1
          keywords:
          - kw11
          - kw12
          justification: reason 1
        - name: cat2
          keywords:
          - kw21
          justification: reason 2
        default_reason: no match
        "#
    }

    fn taxonomy_example_1() -> Taxonomy {
        Taxonomy {
            categories: vec![
                Category::new("cat1", "category 1", &["kw11", "kw12"], "reason 1"),
                Category::new("cat2", "", &["kw21"], "reason 2"),
            ],
            default_reason: String::from("no match"),
        }
    }

    fn colliding_taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            Category::new("first", "", &["a", "shared", "b"], "first reason"),
            Category::new("second", "", &["shared", "c"], "second reason"),
        ])
    }

    #[test]
    fn deserialize_taxonomy_file() {
        let taxonomy = Taxonomy::from_reader(yaml_example_1().as_bytes()).unwrap();
        assert_eq!(taxonomy, taxonomy_example_1());
    }

    #[test]
    fn missing_default_reason_falls_back_to_afp_reason() {
        let yaml = r#"
        categories:
        - name: cat1
          keywords: [kw]
          justification: reason
        "#;
        let taxonomy = Taxonomy::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(taxonomy.default_reason(), Taxonomy::afp().default_reason());
    }

    #[test]
    fn label_falls_back_to_name() {
        let taxonomy = taxonomy_example_1();
        assert_eq!(taxonomy.categories()[0].label(), "category 1");
        assert_eq!(taxonomy.categories()[1].label(), "cat2");
        let blank = Category::new("cat3", "  ", &["kw31"], "reason 3");
        assert_eq!(blank.label(), "cat3");
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let yaml = r#"
        categories:
        - name: cat1
          keywords: ["kw", " "]
          justification: reason
        "#;
        let error = Taxonomy::from_reader(yaml.as_bytes()).unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidTaxonomy(_)));
    }

    #[test]
    fn empty_justification_is_rejected() {
        let taxonomy = Taxonomy::new(vec![Category::new("cat", "", &["kw"], "")]);
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn duplicate_category_name_is_rejected() {
        let taxonomy = Taxonomy::new(vec![
            Category::new("cat", "", &["a"], "reason"),
            Category::new("cat", "", &["b"], "reason"),
        ]);
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn empty_taxonomy_is_rejected() {
        assert!(Taxonomy::new(Vec::new()).validate().is_err());
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let error = Taxonomy::from_reader("categories: 3".as_bytes()).unwrap_err();
        assert!(matches!(error, AnalysisError::Yaml(_)));
    }

    #[test]
    fn builtin_taxonomy_is_valid_and_collision_free() {
        let taxonomy = Taxonomy::afp();
        taxonomy.validate().unwrap();
        assert!(taxonomy.keyword_collisions().is_empty());
        assert_eq!(taxonomy.categories().len(), 6);
    }

    #[test]
    fn flat_index_keeps_registration_order() {
        let taxonomy = taxonomy_example_1();
        let index = taxonomy.build_flat_index();
        let keywords: Vec<&str> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keywords, vec!["kw11", "kw12", "kw21"]);
        assert_eq!(index.get("kw21"), Some("cat2"));
        assert_eq!(index.get("missing"), None);
    }

    /// A duplicate keyword keeps the position of its first
    /// registration, but the last category to register it owns it.
    #[test]
    fn flat_index_last_registration_wins() {
        let taxonomy = colliding_taxonomy();
        let index = taxonomy.build_flat_index();
        let entries: Vec<(&str, &str)> = index.iter().map(|(k, c)| (k, c.name())).collect();
        assert_eq!(
            entries,
            vec![
                ("a", "first"),
                ("shared", "second"),
                ("b", "first"),
                ("c", "second"),
            ]
        );
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn collisions_are_reported() {
        let collisions = colliding_taxonomy().keyword_collisions();
        assert_eq!(
            collisions,
            vec![KeywordCollision {
                keyword: String::from("shared"),
                previous: String::from("first"),
                replacement: String::from("second"),
            }]
        );
    }

    #[test]
    fn load_rejects_collisions_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.yaml");
        std::fs::write(
            &path,
            "categories:\n- {name: a, keywords: [x], justification: r}\n- {name: b, keywords: [x], justification: r}\n",
        )
        .unwrap();
        assert!(Taxonomy::load(Some(&path), false).is_ok());
        let error = Taxonomy::load(Some(&path), true).unwrap_err();
        assert!(matches!(error, AnalysisError::KeywordCollisions(_)));
    }

    #[test]
    fn load_without_path_is_builtin() {
        assert_eq!(Taxonomy::load(None, true).unwrap(), Taxonomy::afp());
    }
}
