use anyhow::{Context, bail, ensure};
use clap::Parser;
use cli::{Args, LogFormat};
use oxentail::{
    Graph, OntologyLoader, ReasonerConfig, SplitReasoner, Target, reasoner, reasoner::ReasonerEntry,
};
use oxrdfio::{RdfFormat, RdfSerializer};
use std::ffi::OsStr;
use std::fs;
use std::io::{Write, stdout};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

const INPUT_FORMATS: [RdfFormat; 6] = [
    RdfFormat::Turtle,
    RdfFormat::NTriples,
    RdfFormat::NQuads,
    RdfFormat::TriG,
    RdfFormat::N3,
    RdfFormat::RdfXml,
];

const OUTPUT_FORMATS: [RdfFormat; 5] = [
    RdfFormat::Turtle,
    RdfFormat::NTriples,
    RdfFormat::NQuads,
    RdfFormat::TriG,
    RdfFormat::RdfXml,
];

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);
    run(&args)
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if args.list_reasoners
        || args.list_profiles
        || args.list_input_languages
        || args.list_output_formats
    {
        return list(args);
    }

    // Everything that can be wrong in the configuration is checked before loading anything
    let engine = reasoner::lookup(&args.reasoner)?.instantiate(
        args.profile.as_deref(),
        ReasonerConfig {
            max_iterations: args.max_iterations,
            timeout: args
                .timeout
                .map(Duration::try_from_secs_f64)
                .transpose()
                .context("Invalid --timeout value")?,
            ..ReasonerConfig::default()
        },
    )?;
    let input_language = args
        .input_language
        .as_deref()
        .map(rdf_format_from_name)
        .transpose()?;
    if let Some(name) = &args.output_format {
        ensure!(
            OUTPUT_FORMATS.contains(&rdf_format_from_name(name)?),
            "The {name} format can't be used for output"
        );
    }
    let reasoner = SplitReasoner::new(engine, !args.no_echo);

    let mut loader = OntologyLoader::new()
        .with_hint_format(input_language)
        .with_auto_import(!args.no_dereference_imports)
        .with_blacklist(&args.exclude_uri)
        .with_blacklist_regex(&args.exclude_uri_rx)
        .context("Invalid --exclude-uri-rx regular expression")?;
    loader.files(&args.input, Target::Main);
    loader.uris(&args.input_uri, Target::Main);
    loader.guess(&args.inputs, Target::Main);
    loader.files(&args.input_bg, Target::Background);
    loader.uris(&args.input_bg_uri, Target::Background);
    let default_format = input_language.or(loader.first_format());
    let (background, main) = loader.into_graphs();
    info!(
        background = background.len(),
        main = main.len(),
        profile = reasoner.profile(),
        "Reasoning over {} background and {} main triples",
        background.len(),
        main.len()
    );

    if args.split {
        let output = reasoner.split(&background, &main)?;
        if let Some(path) = &args.output_bg {
            write(&output.background, Some(path.as_path()), args, default_format)?;
        }
        write(&output.main, args.output.as_deref(), args, default_format)
    } else {
        let result = reasoner.apply_union(&background, &main)?;
        write(&result, args.output.as_deref(), args, default_format)
    }
}

fn list(args: &Args) -> anyhow::Result<()> {
    let mut out = String::new();
    if args.list_reasoners {
        print_list(
            &mut out,
            "Reasoners",
            reasoner::reasoners()
                .iter()
                .map(|r| format!("{}: {}", r.name(), r.description())),
        );
    }
    if args.list_input_languages {
        print_list(&mut out, "Input Languages", INPUT_FORMATS.iter().map(describe_format));
    }
    if args.list_output_formats {
        print_list(&mut out, "Output Formats", OUTPUT_FORMATS.iter().map(describe_format));
    }
    if args.list_profiles {
        let entry = reasoner::lookup(&args.reasoner)?;
        print_list(
            &mut out,
            &format!("Profiles for \"{}\" reasoner", entry.name()),
            profiles(entry),
        );
    }
    stdout().write_all(out.as_bytes())?;
    Ok(())
}

fn print_list(out: &mut String, kind: &str, items: impl IntoIterator<Item = String>) {
    out.push_str(&format!("List of {kind}:\n"));
    for item in items {
        out.push_str(&format!("\t- {item}\n"));
    }
    out.push('\n');
}

fn profiles(entry: &ReasonerEntry) -> impl Iterator<Item = String> + '_ {
    entry.profiles().iter().map(|profile| {
        if *profile == entry.default_profile() {
            format!("{profile} (default)")
        } else {
            (*profile).to_owned()
        }
    })
}

fn describe_format(format: &RdfFormat) -> String {
    format!(
        "{} ({}, {})",
        format.name(),
        format.file_extension(),
        format.media_type()
    )
}

/// Serializes the graph fully before touching the output so that a failure never leaves a truncated file.
fn write(
    graph: &Graph,
    path: Option<&Path>,
    args: &Args,
    default_format: Option<RdfFormat>,
) -> anyhow::Result<()> {
    let format = output_format(args.output_format.as_deref(), path, default_format)?;
    let mut serializer = RdfSerializer::from_format(format);
    for (prefix, iri) in graph.prefixes() {
        serializer = serializer
            .with_prefix(prefix, iri)
            .with_context(|| format!("Invalid IRI for prefix {prefix}: {iri}"))?;
    }
    let mut writer = serializer.for_writer(Vec::new());
    for triple in graph {
        writer.serialize_triple(triple)?;
    }
    let buffer = writer.finish()?;
    if let Some(path) = path {
        fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), triples = graph.len(), "Wrote {} triples to {}", graph.len(), path.display());
    } else {
        let mut stdout = stdout().lock();
        stdout.write_all(&buffer)?;
        stdout.flush()?;
    }
    Ok(())
}

/// The explicit format wins, then the output file extension, then the input format, then Turtle.
fn output_format(
    explicit: Option<&str>,
    path: Option<&Path>,
    default_format: Option<RdfFormat>,
) -> anyhow::Result<RdfFormat> {
    if let Some(name) = explicit {
        return rdf_format_from_name(name);
    }
    let from_extension = path
        .and_then(Path::extension)
        .and_then(OsStr::to_str)
        .and_then(RdfFormat::from_extension)
        .filter(|format| OUTPUT_FORMATS.contains(format));
    Ok(from_extension
        .or(default_format.filter(|format| OUTPUT_FORMATS.contains(format)))
        .unwrap_or(RdfFormat::Turtle))
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    if let Some(t) = INPUT_FORMATS.into_iter().find(|f| {
        f.name().eq_ignore_ascii_case(name) || simplified(f.name()) == simplified(name)
    }) {
        return Ok(t);
    }
    bail!("The format '{name}' is unknown")
}

fn simplified(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
