use crate::commands::{print_contacts, print_json, Context};
use crate::util::{parse_filter_arg, text_or_stdin};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Entries separated by newlines, commas or semicolons; `-` reads stdin
    pub text: String,
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    pub number: String,
}

pub fn parse(ctx: &Context<'_>, args: ParseArgs) -> Result<()> {
    let filter = parse_filter_arg(args.filter.as_deref())?;
    let text = text_or_stdin(&args.text)?;
    let response = ctx.pipeline(filter).parse_manual(&text)?;
    print_contacts(ctx, &response)
}

pub fn validate(ctx: &Context<'_>, args: ValidateArgs) -> Result<()> {
    let validation = ctx.pipeline(None).validate(&args.number);
    if ctx.json {
        return print_json(&validation);
    }
    match &validation.cleaned_number {
        Some(number) => println!("valid: {}", number),
        None => println!("invalid: {}", validation.original),
    }
    Ok(())
}
