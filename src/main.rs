#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "model2jsonschema",
    about = "Derive a JSON Schema (draft-04) from a typed object model"
)]
struct Cli {
    /// Path or URL to the model description input
    #[arg(value_name = "MODEL")]
    input: String,

    /// Path to the JSON Schema output file
    #[arg(value_name = "SCHEMA")]
    output: String,

    /// Root type to generate the schema for (defaults to the model's own root)
    #[arg(long)]
    root: Option<String>,

    /// Schema title override
    #[arg(long)]
    title: Option<String>,

    /// Schema description
    #[arg(long)]
    description: Option<String>,

    /// Use the HTML5 form-editor preset (titles, ordering, hidden type properties)
    #[arg(long, default_value_t = false)]
    html5: bool,

    /// Stamp propertyOrder in declaration order
    #[arg(long, default_value_t = false)]
    property_ordering: bool,
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = if cli.html5 {
        model2jsonschema::GeneratorConfig::html5()
    } else {
        model2jsonschema::GeneratorConfig::default()
    };
    if cli.property_ordering {
        config.use_property_ordering = true;
    }

    if let Err(e) = model2jsonschema::generator::convert_model_to_schema(
        &cli.input,
        &cli.output,
        cli.root.as_deref(),
        cli.title.as_deref(),
        cli.description.as_deref(),
        config,
    ) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
