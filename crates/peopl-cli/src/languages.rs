use clap::Command;
use console::Style;
use miette::{bail, Result};

pub fn command(name: impl Into<clap::builder::Str>) -> Command {
    Command::new(name).about("List the available grammars")
}

pub fn run() -> Result<()> {
    let name_style = Style::new().bold();
    let dim = Style::new().dim();
    let mut broken = 0;
    for grammar in peopl_languages::ALL {
        match grammar.language() {
            Ok(language) => println!(
                "{name} {display_name} v{version} {scope} {file_types}",
                name = name_style.apply_to(format!("{:<8}", grammar.name)),
                display_name = grammar.display_name,
                version = language.version(),
                scope = dim.apply_to(language.scope()),
                file_types = language
                    .file_types()
                    .iter()
                    .map(|file_type| format!(".{}", file_type))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Err(err) => {
                eprintln!("{:?}", miette::Report::new(err));
                broken += 1;
            }
        }
    }
    if broken > 0 {
        bail!("{} grammar(s) failed to load", broken);
    }
    Ok(())
}
