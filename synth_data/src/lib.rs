//! Synthetic discharge records for trying out and testing the
//! AFP analysis.
//!
//! Every column is generated from its own random number
//! generator, derived from one global seed and the column name,
//! so adding a column does not change the data in the others.
//!

use blake2::{Blake2b512, Digest};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_afp::config::DEFAULT_DIAGNOSIS_COLUMN;
use rust_afp::Taxonomy;

/// Diagnoses that contain no keyword of the AFP taxonomy
pub const UNRELATED_DIAGNOSES: &[&str] = &[
    "高血压",
    "糖尿病",
    "冠心病",
    "肺炎",
    "脑梗死",
    "慢性阻塞性肺疾病",
    "股骨颈骨折",
    "白内障",
    "缺铁性贫血",
    "甲状腺功能亢进症",
    "急性阑尾炎",
    "支气管哮喘",
];

const PREFIXES: &[&str] = &["", "", "疑似", "复发性", "晚期"];
const SUFFIXES: &[&str] = &["", "", "术后", "伴腹水", "化疗后"];

/// Chance that a generated diagnosis comes from the taxonomy
const TAXONOMY_FRACTION: f64 = 0.4;

/// Make a random number generator from a global seed
/// and a string id.
///
/// The id concatenated with the global seed is hashed, and
/// the hash seeds the random number generator. Each
/// independent part of the synthetic data should use a
/// different id.
pub fn make_rng(global_seed: u64, id: &str) -> ChaCha8Rng {
    let message = format!("{id}{global_seed}");
    let mut hasher = Blake2b512::new();
    hasher.update(message);
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&hasher.finalize()[..32]);
    ChaCha8Rng::from_seed(seed)
}

pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

/// Generate a patient id (format "bristol_nnnn")
pub fn make_subject(rng: &mut ChaCha8Rng) -> String {
    let patient_id = rng.gen_range(1..=50000);
    format! {"bristol_{patient_id}"}
}

/// Pick gender uniform randomly (only male or female)
pub fn make_gender(rng: &mut ChaCha8Rng) -> Gender {
    if rng.gen() {
        Gender::Female
    } else {
        Gender::Male
    }
}

pub fn make_age(rng: &mut ChaCha8Rng) -> u32 {
    rng.gen_range(18..=95)
}

/// Generate a discharge diagnosis. Some are built around a
/// taxonomy keyword, with a clinical prefix or suffix, and the
/// rest are picked from [`UNRELATED_DIAGNOSES`].
pub fn make_discharge_diagnosis(rng: &mut ChaCha8Rng, taxonomy: &Taxonomy) -> String {
    let keyword = if rng.gen_bool(TAXONOMY_FRACTION) {
        taxonomy
            .categories()
            .choose(rng)
            .and_then(|category| category.keywords().choose(rng))
    } else {
        None
    };
    match keyword {
        Some(keyword) => {
            let prefix = PREFIXES.choose(rng).copied().unwrap_or_default();
            let suffix = SUFFIXES.choose(rng).copied().unwrap_or_default();
            format!("{prefix}{keyword}{suffix}")
        }
        None => {
            let diagnosis = UNRELATED_DIAGNOSES.choose(rng).copied().unwrap_or_default();
            String::from(diagnosis)
        }
    }
}

/// Make a table of synthetic discharge records with columns
/// subject, gender, age and the default diagnosis column.
pub fn make_discharge_table(
    global_seed: u64,
    rows: usize,
    taxonomy: &Taxonomy,
) -> PolarsResult<DataFrame> {
    let mut rng = make_rng(global_seed, "subject");
    let subjects: Vec<String> = (0..rows).map(|_| make_subject(&mut rng)).collect();

    let mut rng = make_rng(global_seed, "gender");
    let genders: Vec<&str> = (0..rows).map(|_| make_gender(&mut rng).as_str()).collect();

    let mut rng = make_rng(global_seed, "age");
    let ages: Vec<u32> = (0..rows).map(|_| make_age(&mut rng)).collect();

    let mut rng = make_rng(global_seed, "diagnosis");
    let diagnoses: Vec<String> = (0..rows)
        .map(|_| make_discharge_diagnosis(&mut rng, taxonomy))
        .collect();

    DataFrame::new(vec![
        Series::new("subject", subjects),
        Series::new("gender", genders),
        Series::new("age", ages),
        Series::new(DEFAULT_DIAGNOSIS_COLUMN, diagnoses),
    ])
}
