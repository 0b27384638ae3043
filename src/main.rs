use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use phishguard::{detection, features, LinearModel, PhishingDetector, UrlNormalizer};
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("phishguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hybrid URL phishing detector: trained classifier + semantic attack-pattern rules")
        .arg(
            Arg::new("url")
                .value_name("URL")
                .help("One or more URLs to evaluate")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Classifier artifact path (JSON)")
                .default_value("model.json"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Print full predictions as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("features")
                .long("features")
                .help("Print the 41-element feature vector instead of predicting (no model needed)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("semantic")
                .long("semantic")
                .help("Print the semantic indicators and score instead of predicting (no model needed)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-stage scores")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let urls: Vec<&String> = matches.get_many::<String>("url").unwrap().collect();
    let as_json = matches.get_flag("json");

    if matches.get_flag("features") {
        process::exit(dump_features(&urls));
    }
    if matches.get_flag("semantic") {
        process::exit(dump_semantic(&urls));
    }

    let model_path = matches.get_one::<String>("model").unwrap();
    let model = match LinearModel::load(Path::new(model_path)) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error loading classifier artifact: {e}");
            process::exit(1);
        }
    };
    let detector = PhishingDetector::new(Box::new(model));

    let mut failed = false;
    for url in urls {
        match detector.predict(url) {
            Ok(prediction) => {
                if as_json {
                    println!("{}", serde_json::to_string_pretty(&prediction).unwrap());
                } else {
                    let verdict = if prediction.label == 1 {
                        "PHISHING"
                    } else {
                        "legitimate"
                    };
                    println!("{url}");
                    println!("  verdict:     {verdict} (label {})", prediction.label);
                    println!("  probability: {:.1}%", prediction.probability * 100.0);
                    println!(
                        "  risk:        {} ({})",
                        prediction.risk_category, prediction.confidence_level
                    );
                    println!(
                        "  semantic:    {:.2} (brand {:.1}, keywords {:.1}, tld {:.1}, subdomains {:.1}, length {:.1})",
                        prediction.semantic_score,
                        prediction.indicators.brand_impersonation,
                        prediction.indicators.suspicious_keywords,
                        prediction.indicators.suspicious_tld,
                        prediction.indicators.subdomain_impersonation,
                        prediction.indicators.entropy_score
                    );
                }
            }
            Err(e) => {
                eprintln!("Error scoring '{url}': {e}");
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

fn dump_features(urls: &[&String]) -> i32 {
    let normalizer = UrlNormalizer::new();
    let mut code = 0;
    for url in urls {
        match normalizer.normalize(url) {
            Ok(normalized) => {
                let vector = features::extract(&normalized);
                println!("{}", serde_json::to_string_pretty(&vector).unwrap());
            }
            Err(e) => {
                eprintln!("Error normalizing '{url}': {e}");
                code = 1;
            }
        }
    }
    code
}

fn dump_semantic(urls: &[&String]) -> i32 {
    for url in urls {
        let indicators = detection::evaluate(url);
        let score = detection::semantic_score(&indicators);
        let output = serde_json::json!({
            "url": url,
            "indicators": indicators,
            "semantic_score": score,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    }
    0
}
