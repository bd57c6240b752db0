//! skosbranch - extract the subbranch of a SKOS thesaurus from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Keep a concept and all of its broader concepts
//! skosbranch extract thesaurus.rdf --concept "http://vocab.example.org/C3"
//!
//! # Same, also keeping narrower concepts, written as Turtle
//! skosbranch extract thesaurus.rdf --concept "http://vocab.example.org/C3" \
//!     --descendants -o branch.ttl
//!
//! # Guess the URI space concepts are minted under
//! skosbranch urispace thesaurus.rdf
//!
//! # Keep concepts labelled in English or Spanish
//! skosbranch filter-lang thesaurus.rdf --lang en --lang es --only
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use skosbranch_core::filters::{find_urispace, LanguageFilter};
use skosbranch_core::{
    default_output_path, load_path, run, suffixed_path, vocab, write_atomic, ExtractConfig,
    HierarchyIndex, RdfFormat, SchemeRetention, TripleStore,
};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skosbranch")]
#[command(about = "Extract subbranches of SKOS concept hierarchies", long_about = None)]
struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep a concept, its ancestors, and the triples describing them
    Extract {
        /// Input file (.nt, .ttl, .rdf, .xml, .owl)
        input: PathBuf,

        /// Target concept IRI (or `_:label` for a blank node)
        #[arg(short, long)]
        concept: Option<String>,

        /// Hierarchy predicate IRI; `skos:` prefix allowed
        #[arg(short, long)]
        predicate: Option<String>,

        /// Output file [default: <input stem>_reduced.<ext>]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format [default: from the output extension]
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Also keep narrower concepts of the target
        #[arg(long)]
        descendants: bool,

        /// Also keep skos:member concepts of a target collection
        #[arg(long)]
        members: bool,

        /// Which concept schemes to keep
        #[arg(long)]
        schemes: Option<SchemeArg>,

        /// Drop broader/narrower links to concepts that were not kept
        #[arg(long)]
        prune_dangling: bool,

        /// Walk the hierarchy on all cores
        #[arg(long)]
        parallel: bool,

        /// TOML file with extraction settings; flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the most common URI space of the subjects
    Urispace {
        /// Input file
        input: PathBuf,
    },

    /// Keep concepts with a preferred label in the given languages
    FilterLang {
        /// Input file
        input: PathBuf,

        /// Language tag to keep (repeatable)
        #[arg(short, long = "lang", required = true)]
        languages: Vec<String>,

        /// Also drop literals tagged with other languages
        #[arg(long)]
        only: bool,

        /// Output file [default: <input stem>_<langs>[_only].<ext>]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format [default: from the output extension]
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Show statistics about a thesaurus
    Stats {
        /// Input file
        input: PathBuf,

        /// Hierarchy predicate IRI; `skos:` prefix allowed
        #[arg(short, long, default_value = vocab::SKOS_BROADER)]
        predicate: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// N-Triples (line-based)
    Ntriples,
    /// Turtle (human-readable)
    Turtle,
    /// RDF/XML (SKOS exchange format)
    Rdfxml,
}

impl From<OutputFormat> for RdfFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Ntriples => RdfFormat::NTriples,
            OutputFormat::Turtle => RdfFormat::Turtle,
            OutputFormat::Rdfxml => RdfFormat::RdfXml,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    /// Drop schemes
    None,
    /// Keep schemes referenced by kept concepts
    Referenced,
    /// Keep every scheme
    All,
}

impl From<SchemeArg> for SchemeRetention {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::None => SchemeRetention::None,
            SchemeArg::Referenced => SchemeRetention::Referenced,
            SchemeArg::All => SchemeRetention::All,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Extract {
            input,
            concept,
            predicate,
            output,
            format,
            descendants,
            members,
            schemes,
            prune_dangling,
            parallel,
            config,
            json,
        } => {
            let mut cfg = match &config {
                Some(path) => ExtractConfig::from_toml_file(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?,
                None => ExtractConfig::default(),
            };
            if let Some(concept) = concept {
                cfg.target = concept;
            }
            if let Some(predicate) = predicate {
                cfg.hierarchy_predicate = expand_skos(&predicate);
            }
            if let Some(schemes) = schemes {
                cfg.schemes = schemes.into();
            }
            cfg.include_descendants |= descendants;
            cfg.follow_members |= members;
            cfg.prune_dangling |= prune_dangling;
            cfg.parallel |= parallel;

            cmd_extract(&input, output, format, &cfg, json)
        }
        Commands::Urispace { input } => cmd_urispace(&input),
        Commands::FilterLang {
            input,
            languages,
            only,
            output,
            format,
        } => cmd_filter_lang(&input, &languages, only, output, format),
        Commands::Stats {
            input,
            predicate,
            json,
        } => cmd_stats(&input, &expand_skos(&predicate), json),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `skos:broader` -> full SKOS IRI. Anything else passes through.
fn expand_skos(predicate: &str) -> String {
    match predicate.strip_prefix("skos:") {
        Some(local) => format!("{}{local}", vocab::SKOS),
        None => predicate.to_string(),
    }
}

fn load_store(path: &Path) -> Result<TripleStore> {
    load_path(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn cmd_extract(
    input: &Path,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    config: &ExtractConfig,
    json: bool,
) -> Result<()> {
    if config.target.is_empty() {
        bail!("No target concept: pass --concept or set `target` in the config file");
    }
    let output = output.unwrap_or_else(|| default_output_path(input));
    debug!(?config, output = %output.display(), "resolved extraction settings");

    let report = run(input, &output, format.map(Into::into), config)
        .with_context(|| format!("Failed to extract {} from {}", config.target, input.display()))?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("Extracted subbranch of {}", report.target);
        println!("Concepts kept:  {} (depth {})", report.closure_size, report.closure_depth);
        println!("Schemes kept:   {}", report.schemes_kept);
        println!("Triples kept:   {} of {}", report.retained_triples, report.input_triples);
        println!("Written to      {}", output.display());
    }
    Ok(())
}

fn cmd_urispace(input: &Path) -> Result<()> {
    let store = load_store(input)?;
    match find_urispace(&store) {
        Some(prefix) => {
            println!("{prefix}");
            Ok(())
        }
        None => bail!("No http(s) URI space found in {}", input.display()),
    }
}

fn cmd_filter_lang(
    input: &Path,
    languages: &[String],
    only: bool,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let store = load_store(input)?;

    let output = output.unwrap_or_else(|| {
        let mut suffix = languages.join("_");
        if only {
            suffix.push_str("_only");
        }
        suffixed_path(input, &suffix)
    });
    let format = match format {
        Some(f) => f.into(),
        None => RdfFormat::from_path(&output)?,
    };

    let triples = LanguageFilter::new(languages.iter().cloned())
        .keep_other_languages(!only)
        .apply(&store)?;
    write_atomic(&triples, &output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Kept {} of {} triples -> {}", triples.len(), store.len(), output.display());
    Ok(())
}

fn cmd_stats(input: &Path, predicate: &str, json: bool) -> Result<()> {
    let store = load_store(input)?;
    let stats = store.stats();
    let index = HierarchyIndex::build(&store, predicate);

    if json {
        let value = serde_json::json!({
            "store": stats,
            "hierarchy": {
                "predicate": predicate,
                "concepts": index.concept_count(),
                "links": index.link_count(),
                "roots": index.roots().count(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Thesaurus Statistics");
    println!("====================");
    println!("Triples:        {}", stats.triple_count);
    println!("Subjects:       {}", stats.subject_count);
    println!("Predicates:     {}", stats.predicate_count);
    println!("Concepts:       {}", index.concept_count());
    println!("Links:          {}", index.link_count());
    println!("Top concepts:   {}", index.roots().count());

    println!();
    println!("Predicates by use:");
    for (predicate, count) in store.predicate_counts() {
        println!("  {predicate} ({count})");
    }
    Ok(())
}
