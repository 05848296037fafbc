use clap::{Parser as ClapParser, Subcommand};
use saffron_lang::{Context, Engine};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "saffron")]
#[command(about = "Saffron - a template language for rendering text from JSON data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against a JSON context
    Eval {
        /// The expression to evaluate
        expression: String,

        /// JSON context object (reads from stdin if not provided)
        #[arg(short, long)]
        context: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Fail on undefined variables instead of treating them as missing
        #[arg(long)]
        strict: bool,
    },

    /// Render a template against a JSON context
    Render {
        /// The template text
        template: String,

        /// JSON context object (reads from stdin if not provided)
        #[arg(short, long)]
        context: Option<String>,

        /// Fail on undefined variables instead of treating them as missing
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Json(serde_json::Error),
    Engine(saffron_lang::Error),
    Eval(saffron_lang::EvalError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON context: {}", e),
            CliError::Engine(e) => write!(f, "{}", e),
            CliError::Eval(e) => write!(f, "{}", e),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            context,
            pretty,
            syntax_only,
            strict,
        } => run_eval(expression, context, pretty, syntax_only, strict),
        Commands::Render {
            template,
            context,
            strict,
        } => run_render(template, context, strict),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_context(provided: Option<String>, strict: bool) -> Result<Context, CliError> {
    let text = match provided {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let json = match text {
        Some(text) if !text.trim().is_empty() => {
            serde_json::from_str(&text).map_err(CliError::Json)?
        }
        _ => serde_json::Value::Object(serde_json::Map::new()),
    };

    let ctx = Context::from_json(json).map_err(CliError::Eval)?;
    Ok(ctx.strict(strict))
}

fn run_eval(
    expression: String,
    context: Option<String>,
    pretty: bool,
    syntax_only: bool,
    strict: bool,
) -> Result<(), CliError> {
    if syntax_only {
        saffron_lang::parser::parse_expression(&expression)
            .map_err(|e| CliError::Engine(e.into()))?;
        println!("Syntax is valid");
        return Ok(());
    }

    let ctx = read_context(context, strict)?;
    let engine = Engine::new();
    let value = engine
        .eval_expression(&expression, Some(&ctx))
        .map_err(CliError::Engine)?;

    let output = if pretty {
        saffron_lang::to_json_pretty(&value)
    } else {
        saffron_lang::to_json(&value)
    };
    println!("{}", output);
    Ok(())
}

fn run_render(
    template: String,
    context: Option<String>,
    strict: bool,
) -> Result<(), CliError> {
    let ctx = read_context(context, strict)?;
    let engine = Engine::new();
    let output = engine
        .render_str(&template, Some(&ctx))
        .map_err(CliError::Engine)?;
    println!("{}", output);
    Ok(())
}
