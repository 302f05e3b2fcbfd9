use std::env;

use tempura::{subprocess_pipeline, FileEditor, Settings};

const USAGE: &str = "Usage:
  tempura scrape <url>
  tempura convert <metric|imperial> <file>
  tempura find";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(USAGE)?;

    let settings = Settings::load()?;
    let pipeline = subprocess_pipeline(settings);

    match command.as_str() {
        "scrape" => {
            let url = args.get(2).ok_or("Please provide a recipe URL")?;
            let mut editor = FileEditor::detached();
            if !pipeline.run_scrape(&mut editor, url) {
                std::process::exit(1);
            }
        }
        "convert" => {
            let system = args.get(2).ok_or("Please provide 'metric' or 'imperial'")?;
            let file = args.get(3).ok_or("Please provide a recipe file to convert")?;
            let mut editor = FileEditor::open_file(file)?;
            if !pipeline.run_convert(&mut editor, system) {
                std::process::exit(1);
            }
            editor.save()?;
        }
        "find" => {
            let mut editor = FileEditor::detached();
            for path in pipeline.find(&mut editor)? {
                println!("{}", path.display());
            }
        }
        other => {
            eprintln!("Unknown command '{}'\n{}", other, USAGE);
            std::process::exit(1);
        }
    }

    Ok(())
}
