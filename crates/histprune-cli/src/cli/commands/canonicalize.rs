//! `histprune canonicalize <url>...` and `histprune same <a> <b>`.

use histprune_core::config::HistpruneConfig;
use histprune_core::Canonicalizer;

pub fn run_canonicalize(cfg: &HistpruneConfig, urls: &[String]) {
    let canonicalizer = Canonicalizer::new(cfg.tracking.clone());
    for url in urls {
        println!("{}", canonicalizer.canonicalize(url));
    }
}

pub fn run_same(cfg: &HistpruneConfig, a: &str, b: &str) {
    let canonicalizer = Canonicalizer::new(cfg.tracking.clone());
    if canonicalizer.same_resource(a, b) {
        println!("same: {}", canonicalizer.canonicalize(a));
    } else {
        println!("different");
        println!("  {}", canonicalizer.canonicalize(a));
        println!("  {}", canonicalizer.canonicalize(b));
    }
}
