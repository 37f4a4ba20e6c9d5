//! Create command implementation
//!
//! Prompt flow, scaffolding and (when the project lands in a recognized
//! host) the core build-and-link pipeline. Missing answers are prompted
//! for; flags fill them in for non-interactive use. Declining the
//! confirmation exits cleanly without touching the filesystem.

use std::env;

use console::style;
use inquire::validator::Validation;
use inquire::{Confirm, Text};

use crate::cli::CreateArgs;
use crate::commands::helpers;
use crate::error::{BotforgeError, Result};
use crate::location;
use crate::manager::{PackageManager, probe};
use crate::scaffold::{self, Bindings};

/// Run the create command
pub fn run(args: CreateArgs, verbose: bool) -> Result<()> {
    println!(
        "{}",
        style("Scaffold a new corebot extension").cyan().bold()
    );

    let Some(bindings) = gather_answers(&args)? else {
        println!("Cancelled, nothing created.");
        return Ok(());
    };

    let parent = env::current_dir()?;
    let project = scaffold::create_project(&parent, &bindings)?;
    println!(
        "{} {}",
        style("Created").green().bold(),
        project.display()
    );

    let loc = location::classify(&project);
    if loc.inside_framework {
        println!(
            "Project lives inside the corebot monorepo; the workspace build resolves the core locally."
        );
        print_next_steps(&bindings.name, installed_manager_program());
        return Ok(());
    }
    if !loc.valid_host {
        println!(
            "{}",
            style("No corebot host detected around this directory.").yellow()
        );
        println!(
            "Skipping the core build. Scaffold extensions under a host's external/ \
             directory, or next to its corebot.yml, to have the core linked automatically."
        );
        return Ok(());
    }
    if args.skip_build {
        println!("Skipping the core build (--skip-build).");
        print_next_steps(&bindings.name, installed_manager_program());
        return Ok(());
    }

    let Some(manager) = probe::select_package_manager(!args.yes)? else {
        return Err(BotforgeError::NoPackageManager);
    };
    let built = helpers::build_core(manager, verbose)?;
    helpers::link_project(&project, &built, manager, verbose)?;

    println!(
        "{} extension is linked against corebot core {}",
        style("Ready:").green().bold(),
        built.version
    );
    print_next_steps(&bindings.name, manager.program());
    Ok(())
}

/// Resolve all scaffolding answers, prompting only for what the flags left
/// open. `None` means the user declined the final confirmation.
fn gather_answers(args: &CreateArgs) -> Result<Option<Bindings>> {
    let name = match &args.name {
        Some(name) => validated_name(name)?,
        None => Text::new("Extension name:")
            .with_help_message("kebab-case: lowercase letters, digits and hyphens")
            .with_validator(|input: &str| {
                if scaffold::is_kebab_case(input) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        "use kebab-case: lowercase letters, digits and hyphens".into(),
                    ))
                }
            })
            .prompt()?,
    };

    let default_display = scaffold::default_friendly_name(&name);
    let display_name = match &args.display_name {
        Some(display) => display.clone(),
        None if args.yes => default_display,
        None => Text::new("Display name:")
            .with_default(&default_display)
            .prompt()?,
    };

    let description = match &args.description {
        Some(description) => description.clone(),
        None if args.yes => String::new(),
        None => Text::new("Description:")
            .with_help_message("one line, may be left empty")
            .with_default("")
            .prompt()?,
    };

    let bindings = Bindings::new(&name, &display_name, &description);

    if !args.yes {
        let confirmed = Confirm::new(&format!("Create {}?", bindings.full_package_name))
            .with_default(true)
            .prompt()?;
        if !confirmed {
            return Ok(None);
        }
    }
    Ok(Some(bindings))
}

fn validated_name(name: &str) -> Result<String> {
    if scaffold::is_kebab_case(name) {
        Ok(name.to_string())
    } else {
        Err(BotforgeError::InvalidExtensionName {
            name: name.to_string(),
        })
    }
}

/// Program name to show in next-steps hints on paths where no manager was
/// selected: the first installed one, falling back to the primary.
fn installed_manager_program() -> &'static str {
    for manager in PackageManager::ALL {
        if which::which(manager.program()).is_ok() {
            return manager.program();
        }
    }
    PackageManager::Bun.program()
}

fn print_next_steps(name: &str, program: &str) {
    println!();
    println!("Next steps:");
    println!("  cd {name}");
    println!("  {program} install");
    println!("  {program} dev");
}
