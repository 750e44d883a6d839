//! The `triviaexam init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("triviaexam.toml").exists() {
        println!("triviaexam.toml already exists, skipping.");
    } else {
        std::fs::write("triviaexam.toml", SAMPLE_CONFIG)?;
        println!("Created triviaexam.toml");
    }

    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: triviaexam validate --bank banks/example.toml");
    println!("  2. Point bank_path in triviaexam.toml at your bank");
    println!("  3. Run: triviaexam serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# triviaexam configuration

host = "127.0.0.1"
port = 5000
session_lifetime_secs = 1800
cookie_secure = false
# bank_path = "banks/example.toml"
"#;

const EXAMPLE_BANK: &str = r#"[[questions]]
id = "q1"
question = "How many points is a touchdown worth?"
correct = "D"

[questions.options]
A = "3"
B = "4"
C = "5"
D = "6"

[[questions]]
id = "q2"
question = "How many yards must an offense gain for a first down?"
correct = "B"

[questions.options]
A = "5"
B = "10"
C = "15"
D = "20"
"#;
