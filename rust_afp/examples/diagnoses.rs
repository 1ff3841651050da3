use rust_afp::report::Summary;
use rust_afp::{Classifier, Taxonomy};

fn main() {
    let taxonomy = Taxonomy::afp();
    let classifier = Classifier::new(&taxonomy);

    let diagnoses = ["原发性肝癌", "高血压", "病毒性肝炎", "糖尿病", "胃癌"];
    let batch = classifier.classify_batch(&diagnoses);

    println!("Results:");
    for row in &batch {
        println!("{}\t{}\t{}", row.diagnosis, row.indication, row.joined_reasons);
    }
    println!();
    println!("{}", Summary::from_batch(&batch));
}
