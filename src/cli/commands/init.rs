//! `mcfg init` command - Initialize a new mcfg project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::catalog::{sample_document, CatalogError, SqliteCatalog};
use crate::core::config::Config;
use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Load the bundled sample catalog into the new database
    #[arg(long)]
    pub seed: bool,

    /// Force initialization even if .mcfg/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    let project = match project {
        Ok(project) => {
            if !global.quiet {
                println!(
                    "{} Initialized mcfg project at {}",
                    style("✓").green(),
                    style(project.root().display()).cyan()
                );
            }
            project
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} mcfg project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("mcfg init --force").yellow()
            );
            return Ok(());
        }
        Err(e) => return Err(miette::miette!("{}", e)),
    };

    let config = Config::load_for(Some(&project));
    let mut catalog = SqliteCatalog::open_project(&project, config.database.as_deref())
        .map_err(|e| miette::miette!("{}", e))?;

    if args.seed {
        let document = sample_document().map_err(|e| miette::miette!("{}", e))?;
        match catalog.import(&document, false) {
            Ok(stats) => {
                if !global.quiet {
                    println!(
                        "{} Loaded sample catalog: {} categories, {} options, {} modules, {} parts",
                        style("✓").green(),
                        stats.categories,
                        stats.options,
                        stats.modules,
                        stats.parts
                    );
                }
            }
            Err(CatalogError::NotEmpty) => {
                println!(
                    "{} Catalog already has data; sample not loaded",
                    style("!").yellow()
                );
            }
            Err(e) => return Err(miette::miette!("{}", e)),
        }
    }

    if !global.quiet {
        println!();
        println!("Next steps:");
        if !args.seed {
            println!(
                "  {} Load a catalog",
                style("mcfg catalog import catalog.yaml").yellow()
            );
        }
        println!(
            "  {} Browse categories and options",
            style("mcfg catalog show").yellow()
        );
        println!(
            "  {} Generate a BOM from the default options",
            style("mcfg bom --defaults").yellow()
        );
    }

    Ok(())
}
