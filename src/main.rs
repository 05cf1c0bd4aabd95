use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cookbook::localization::{init_localization, t_args_lang, t_error, t_lang};
use cookbook::{GenerationConfig, IngredientCollector, RecipeGenerator};

#[derive(Debug, Parser)]
#[command(name = "cookbook", version, about = "Generate recipes from the ingredients you have")]
struct Cli {
    /// Language for user-facing messages (e.g. "en", "fr")
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a recipe from a list of ingredients
    Generate {
        /// Ingredients to cook with
        ingredients: Vec<String>,

        /// Request timeout in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Retries on rate limiting or server errors
        #[arg(long, default_value_t = 0)]
        retries: u32,

        /// Model identifier overriding the provider default
        #[arg(long)]
        model: Option<String>,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json);
    init_localization()?;

    info!("Starting Cookbook recipe generator");

    match cli.command {
        Command::Generate {
            ingredients,
            timeout,
            retries,
            model,
        } => {
            let lang = cli.lang.as_deref();
            let mut collector = IngredientCollector::new();
            for ingredient in &ingredients {
                if !collector.add(ingredient) {
                    continue;
                }
                if let Some(added) = collector.ingredients().last() {
                    eprintln!("{}", t_args_lang("ingredient-added", &[("ingredient", added.as_str())], lang));
                }
            }

            let mut config = GenerationConfig {
                model,
                ..Default::default()
            };
            config.recovery.max_retries = retries;
            if let Some(secs) = timeout {
                config.recovery.request_timeout_secs = secs;
            }

            let result = match collector.submit() {
                Ok(list) => {
                    let joined = list.joined();
                    eprintln!(
                        "{}",
                        t_args_lang("ingredient-list", &[("ingredients", joined.as_str())], lang)
                    );
                    eprintln!("{}", t_lang("recipe-generating", lang));
                    let generator = RecipeGenerator::from_env(config)?;
                    generator.generate(&list).await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(draft) => {
                    eprintln!("{}", t_args_lang("recipe-generated", &[("title", &draft.title)], lang));
                    println!("{}", serde_json::to_string_pretty(&draft)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    error!(error = %e, "Recipe generation failed");
                    eprintln!("{}", t_error(&e, lang));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
