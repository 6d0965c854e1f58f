use crate::commands::{print_contacts, print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_filter_arg;
use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use dialsheet_core::send_link;
use dialsheet_import::ExportFormat;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    pub file: PathBuf,
    #[arg(long, short)]
    pub message: String,
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = ExportFormatArg::Json)]
    pub format: ExportFormatArg,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
    Vcf,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(format: ExportFormatArg) -> Self {
        match format {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Vcf => ExportFormat::Vcf,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendLink {
    number: String,
    name: String,
    link: String,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    format: &'static str,
    count: usize,
    output: String,
}

pub fn extract(ctx: &Context<'_>, args: ExtractArgs) -> Result<()> {
    let filter = parse_filter_arg(args.filter.as_deref())?;
    let response = ctx.pipeline(filter).extract_file(&args.file)?;
    print_contacts(ctx, &response)
}

pub fn links(ctx: &Context<'_>, args: LinksArgs) -> Result<()> {
    if args.message.trim().is_empty() {
        return Err(invalid_input("message cannot be empty"));
    }
    let filter = parse_filter_arg(args.filter.as_deref())?;
    let response = ctx.pipeline(filter).extract_file(&args.file)?;

    let links: Vec<SendLink> = response
        .contacts
        .iter()
        .map(|contact| SendLink {
            number: contact.number.to_string(),
            name: contact.name.clone(),
            link: send_link(contact, &args.message, &ctx.config.default_country_code),
        })
        .collect();

    if ctx.json {
        return print_json(&links);
    }
    for item in &links {
        println!("{}\t{}", item.name, item.link);
    }
    Ok(())
}

pub fn export(ctx: &Context<'_>, args: ExportArgs) -> Result<()> {
    let filter = parse_filter_arg(args.filter.as_deref())?;
    let response = ctx.pipeline(filter).extract_file(&args.file)?;
    let format = ExportFormat::from(args.format);
    let data = format.render(&response)?;

    let Some(path) = args.out else {
        if ctx.json && !matches!(format, ExportFormat::Json) {
            return Err(invalid_input("--json requires --out for csv and vcf exports"));
        }
        print!("{}", data);
        if !data.ends_with('\n') {
            println!();
        }
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create export directory {}", parent.display()))?;
        }
    }
    fs::write(&path, &data).with_context(|| format!("write export file {}", path.display()))?;

    if ctx.json {
        print_json(&ExportReport {
            format: format.extension(),
            count: response.count,
            output: path.display().to_string(),
        })
    } else {
        println!("Exported {} contacts to {}", response.count, path.display());
        Ok(())
    }
}
