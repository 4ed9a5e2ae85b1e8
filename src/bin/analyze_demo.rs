//! Demo that runs three sample inputs through the engine and prints a digest.

use credibility_analyzer::evaluation::{evaluate, AgentInfo};
use credibility_analyzer::{AnalysisInput, HeuristicEngine};

const SAMPLES: [(&str, &str, &str); 3] = [
    (
        "A recent study from Harvard Medical School shows significant results in medical research. According to researchers, the findings demonstrate clear benefits. The research was published in a peer-reviewed journal.",
        "https://news.harvard.edu/gazette/story/study",
        "Harvard Study Shows Medical Breakthrough",
    ),
    (
        "SHOCKING!!! You won't believe what they found!!! This secret will change everything!!! Click now before it's too late!!!",
        "https://facebook.com/posts/123",
        "Shocking Discovery",
    ),
    (
        "This photo shows what happened yesterday at the rally. The image proves that thousands attended.",
        "https://twitter.com/user/status/123",
        "Rally Photo",
    ),
];

fn preview(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    match serde_json::to_string_pretty(&AgentInfo::default()) {
        Ok(json) => println!("Agent configuration:\n{json}"),
        Err(e) => eprintln!("agent info: {e}"),
    }
    println!("\n{}", "=".repeat(60));

    let engine = HeuristicEngine::default();
    for (idx, (content, url, title)) in SAMPLES.iter().enumerate() {
        let input = AnalysisInput::new(*content).with_url(*url).with_title(*title);
        let result = engine.analyze(&input);
        let eval = evaluate(&result);

        println!("\nSample {}:", idx + 1);
        println!("URL: {url}");
        println!("Content preview: {}...", preview(content, 80));
        println!("Trust score: {}/100", result.trust_score);
        println!("Confidence: {}", result.confidence_label);
        println!("Content type: {}", result.content_type);
        println!("Claims found: {}", result.claims.len());
        println!("Flags raised: {}", result.flags.len());
        println!("Consistency: {:.1}", eval.consistency_score);
        println!("Summary: {}...", preview(&result.reasoning.summary, 150));
        println!("\n{}", "=".repeat(60));
    }
}
