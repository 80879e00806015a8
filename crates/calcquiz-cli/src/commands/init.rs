//! The `calcquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create calcquiz.toml
    if std::path::Path::new("calcquiz.toml").exists() {
        println!("calcquiz.toml already exists, skipping.");
    } else {
        std::fs::write("calcquiz.toml", SAMPLE_CONFIG)?;
        println!("Created calcquiz.toml");
    }

    // Create example question file
    std::fs::create_dir_all("questions")?;
    // topic is read from the file name
    let example_path = std::path::Path::new(EXAMPLE_PATH);
    if example_path.exists() {
        println!("{EXAMPLE_PATH} already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTIONS)?;
        println!("Created {EXAMPLE_PATH}");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in calcquiz.toml at your quiz server");
    println!("  2. Run: calcquiz validate --file {EXAMPLE_PATH}");
    println!("  3. Run: calcquiz play --file {EXAMPLE_PATH} --no-save");

    Ok(())
}

const EXAMPLE_PATH: &str = "questions/derivatives.json";

const SAMPLE_CONFIG: &str = r#"# calcquiz configuration

base_url = "http://localhost:5000"
timeout_secs = 30

# Value of the server's `session` cookie; needed for personalized quizzes
# and for saving results.
session_cookie = "${CALCQUIZ_SESSION}"

save_results = true
default_difficulty = "mixed"
"#;

const EXAMPLE_QUESTIONS: &str = r#"{
  "questions": [
    {
      "id": 1,
      "question": "\\( \\frac{d}{dx} x^3 \\)",
      "options": ["\\( 3x^2 \\)", "\\( x^2 \\)", "\\( 3x \\)", "\\( 0 \\)"],
      "correct": "\\( 3x^2 \\)",
      "explanation": "Power rule: bring the 3 down and lower the exponent to 2."
    },
    {
      "id": 2,
      "question": "\\( \\frac{d}{dx} \\cos(x) \\)",
      "options": ["\\( \\sin(x) \\)", "\\( -\\sin(x) \\)", "\\( \\cos(x) \\)", "\\( -\\cos(x) \\)"],
      "correct": "\\( -\\sin(x) \\)"
    },
    {
      "id": 3,
      "question": "\\( \\frac{d}{dx} \\sin(2x) \\)",
      "options": ["\\( \\cos(2x) \\)", "\\( 2\\cos(2x) \\)", "\\( -2\\cos(2x) \\)", "\\( 2\\sin(2x) \\)"],
      "correct": "\\( 2\\cos(2x) \\)"
    }
  ],
  "quiz_info": {
    "explanation": "Derivatives warm-up: power rule, trigonometric functions and the chain rule.",
    "quiz_type": "general",
    "total_questions": 3
  }
}
"#;
